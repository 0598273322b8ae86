//! Brightness to duty-cycle conversion.

use crate::hardware::traits::PwmOutput;
use crate::selector::Channel;

/// Duty for `logical_value` with a fixed per-step multiplier, saturated at `max_duty`.
pub const fn duty_for(logical_value: u16, duty_per_step: u16, max_duty: u16) -> u16 {
    let duty = logical_value as u32 * duty_per_step as u32;
    if duty > max_duty as u32 {
        max_duty
    } else {
        duty as u16
    }
}

/// Thin wrapper that scales logical brightness onto a [`PwmOutput`].
///
/// Holds no state besides the multiplier, so writing the same value twice is
/// harmless.
pub struct PwmDriver<P> {
    output: P,
    duty_per_step: u16,
}

impl<P: PwmOutput> PwmDriver<P> {
    pub fn new(output: P, duty_per_step: u16) -> Self {
        Self {
            output,
            duty_per_step,
        }
    }

    pub fn set_duty(&mut self, channel: Channel, logical_value: u16) {
        let duty = duty_for(
            logical_value,
            self.duty_per_step,
            self.output.max_duty_cycle(),
        );
        trace!("pwm {} <- {} ({})", channel, duty, logical_value);
        self.output.set_duty_cycle(channel, duty);
    }

    pub fn output(&self) -> &P {
        &self.output
    }
}
