use embassy_stm32::peripherals::TIM3;
use embassy_stm32::timer::Channel as TimerChannel;
use embassy_stm32::timer::simple_pwm::SimplePwm;

use super::traits::PwmOutput;
use crate::selector::Channel;

/// TIM3 driving the four lamp outputs (PA6, PA7, PB0, PB1).
pub struct TimerPwm<'d> {
    pwm: SimplePwm<'d, TIM3>,
}

impl<'d> TimerPwm<'d> {
    /// Starts every channel dark.
    pub fn new(mut pwm: SimplePwm<'d, TIM3>) -> Self {
        for channel in Channel::ALL {
            let mut ch = pwm.channel(timer_channel(channel));
            ch.set_duty_cycle(0);
            ch.enable();
        }
        Self { pwm }
    }
}

fn timer_channel(channel: Channel) -> TimerChannel {
    match channel {
        Channel::Ch1 => TimerChannel::Ch1,
        Channel::Ch2 => TimerChannel::Ch2,
        Channel::Ch3 => TimerChannel::Ch3,
        Channel::Ch4 => TimerChannel::Ch4,
    }
}

impl PwmOutput for TimerPwm<'_> {
    fn set_duty_cycle(&mut self, channel: Channel, duty: u16) {
        let mut ch = self.pwm.channel(timer_channel(channel));
        ch.set_duty_cycle(duty);
        ch.enable();
    }

    fn max_duty_cycle(&self) -> u16 {
        self.pwm.max_duty_cycle()
    }
}
