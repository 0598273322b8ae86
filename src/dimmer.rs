//! The dimmer controller.
//!
//! [`Dimmer`] owns every piece of dimmer state. The main loop calls
//! [`Dimmer::poll_encoder`] and [`Dimmer::poll_button`]; the timer path calls
//! [`Dimmer::on_timer_elapsed`]. Each field has one writer: the main loop owns the
//! encoder position and the selection and arms the blink, the timer path steps it.

use embedded_hal_async::delay::DelayNs;

use crate::blink::BlinkSequencer;
use crate::button::{Debouncer, Edge};
use crate::config::{ConfigError, DimmerConfig};
use crate::diagnostics::Diagnostics;
use crate::encoder::{Direction, EncoderNormalizer, EncoderUpdate};
use crate::hardware::traits::{Button, Led, PwmOutput, QuadratureEncoder};
use crate::pwm::PwmDriver;
use crate::selector::{Channel, ChannelSelector, ChannelSwitch};

/// Which periodic timer fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerId {
    /// Status LED heartbeat.
    Heartbeat,
    /// Confirmation blink cadence.
    Blink,
}

pub struct Dimmer<P> {
    config: DimmerConfig,
    encoder: EncoderNormalizer,
    debouncer: Debouncer,
    selector: ChannelSelector,
    blink: BlinkSequencer,
    pwm: PwmDriver<P>,
    diagnostics: Diagnostics,
}

impl<P: PwmOutput> Dimmer<P> {
    /// Builds the controller, rejecting configs the state machines cannot run on.
    pub fn new(config: DimmerConfig, output: P) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            encoder: EncoderNormalizer::new(&config),
            debouncer: Debouncer::new(config.settle_ms),
            selector: ChannelSelector::new(),
            blink: BlinkSequencer::new(config.blink_level),
            pwm: PwmDriver::new(output, config.duty_per_step),
            diagnostics: Diagnostics::default(),
            config,
        })
    }

    /// Power-on state: status LED lit, every lamp dark, dial on the first channel.
    pub fn start<L: Led>(&mut self, status: &mut L) {
        status.on();
        for channel in Channel::ALL {
            self.pwm.set_duty(channel, 0);
        }
        info!("dimmer started on {}", self.selector.active());
    }

    /// Reads the encoder once and drives the active channel if the dial moved.
    pub fn poll_encoder<E: QuadratureEncoder>(&mut self, encoder: &mut E) -> EncoderUpdate {
        let update = self.encoder.normalize(encoder.count(), encoder.direction());

        if let Some(raw) = update.reseed {
            debug!("encoder: end of dial, counter reseeded to {}", raw);
            encoder.reset_count(raw);
            if raw == 0 {
                self.diagnostics.low_reseeds += 1;
            } else {
                self.diagnostics.high_reseeds += 1;
            }
        }
        if let Some(value) = update.value_changed {
            self.on_value_changed(value);
        }
        if let Some(direction) = update.direction_changed {
            self.on_direction_changed(direction);
        }
        update
    }

    /// Debounces the switch once. A confirmed press switches channel.
    ///
    /// A level change pauses for the settle delay before returning.
    pub async fn poll_button<B, E, D>(
        &mut self,
        button: &B,
        encoder: &mut E,
        delay: &mut D,
    ) -> Option<ChannelSwitch>
    where
        B: Button,
        E: QuadratureEncoder,
        D: DelayNs,
    {
        match self.debouncer.poll(button.is_pressed(), delay).await {
            Edge::Pressed => {
                self.diagnostics.presses += 1;
                Some(self.switch_channel(encoder))
            }
            Edge::Released => {
                self.diagnostics.releases += 1;
                None
            }
            Edge::None => None,
        }
    }

    /// Entry point for both periodic timers.
    pub fn on_timer_elapsed<L: Led>(&mut self, timer: TimerId, status: &mut L) {
        match timer {
            TimerId::Heartbeat => status.toggle(),
            TimerId::Blink => self.step_blink(),
        }
    }

    fn on_value_changed(&mut self, value: u16) {
        self.diagnostics.value_changes += 1;
        let channel = self.selector.active();
        debug!("encoder: {} -> {}", channel, value);
        self.pwm.set_duty(channel, value);
    }

    // Extension point; the outputs do not depend on turning direction yet.
    fn on_direction_changed(&mut self, direction: Direction) {
        self.diagnostics.direction_changes += 1;
        trace!("encoder: direction {}", direction);
    }

    fn switch_channel<E: QuadratureEncoder>(&mut self, encoder: &mut E) -> ChannelSwitch {
        encoder.reset_count(0);
        self.encoder.reset();

        let switch = self.selector.on_press_edge();
        self.pwm.set_duty(switch.previous, 0);

        if let Some(abandoned) = self.blink.arm(switch.previous) {
            self.diagnostics.blinks_abandoned += 1;
            warn!("blink on {} cut short", abandoned);
        }
        info!("channel {} -> {}", switch.previous, switch.active);
        switch
    }

    fn step_blink(&mut self) {
        if let Some(step) = self.blink.tick() {
            self.pwm.set_duty(step.channel, step.level);
            if step.finished {
                self.diagnostics.blinks_completed += 1;
                debug!("blink on {} done", step.channel);
            }
        }
    }

    pub fn active_channel(&self) -> Channel {
        self.selector.active()
    }

    pub fn logical_value(&self) -> u16 {
        self.encoder.logical_value()
    }

    pub fn blink(&self) -> &BlinkSequencer {
        &self.blink
    }

    pub fn diagnostics(&self) -> Diagnostics {
        self.diagnostics
    }

    pub fn config(&self) -> &DimmerConfig {
        &self.config
    }

    pub fn output(&self) -> &P {
        self.pwm.output()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{FakeButton, FakeEncoder, FakeLed, FakePwm, RecordingDelay};
    use embassy_futures::block_on;

    struct Rig {
        dimmer: Dimmer<FakePwm>,
        encoder: FakeEncoder,
        button: FakeButton,
        delay: RecordingDelay,
        led: FakeLed,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                dimmer: Dimmer::new(DimmerConfig::REV_50, FakePwm::new(10_000)).unwrap(),
                encoder: FakeEncoder::default(),
                button: FakeButton::default(),
                delay: RecordingDelay::default(),
                led: FakeLed::default(),
            }
        }

        fn turn_to(&mut self, count: u16) -> EncoderUpdate {
            self.encoder.count = count;
            self.dimmer.poll_encoder(&mut self.encoder)
        }

        fn click(&mut self) -> Option<ChannelSwitch> {
            self.button.pressed = true;
            let switch = block_on(self.dimmer.poll_button(
                &self.button,
                &mut self.encoder,
                &mut self.delay,
            ));
            self.button.pressed = false;
            block_on(self.dimmer.poll_button(
                &self.button,
                &mut self.encoder,
                &mut self.delay,
            ));
            switch
        }

        fn blink_tick(&mut self) {
            self.dimmer.on_timer_elapsed(TimerId::Blink, &mut self.led);
        }
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = DimmerConfig::REV_50;
        config.ticks_per_detent = 0;
        assert_eq!(
            Dimmer::new(config, FakePwm::new(10_000)).err(),
            Some(ConfigError::ZeroTicksPerDetent)
        );

        let config = DimmerConfig::REV_50.with_duty_per_step(0);
        assert_eq!(
            Dimmer::new(config, FakePwm::new(10_000)).err(),
            Some(ConfigError::ZeroDutyStep)
        );
    }

    #[test]
    fn start_lights_status_and_darkens_lamps() {
        let mut rig = Rig::new();
        rig.dimmer.start(&mut rig.led);
        assert!(rig.led.lit);
        assert_eq!(rig.led.toggles, 0);
        for channel in Channel::ALL {
            assert_eq!(rig.dimmer.output().last_for(channel), Some(0));
        }

        // First heartbeat after start turns the LED off.
        rig.dimmer.on_timer_elapsed(TimerId::Heartbeat, &mut rig.led);
        assert!(!rig.led.lit);
    }

    #[test]
    fn dial_drives_active_channel() {
        let mut rig = Rig::new();
        rig.turn_to(8);
        assert_eq!(rig.dimmer.output().writes, [(Channel::Ch1, 400)]);
        assert_eq!(rig.dimmer.logical_value(), 2);
    }

    #[test]
    fn unchanged_dial_writes_nothing() {
        let mut rig = Rig::new();
        rig.turn_to(8);
        rig.turn_to(9);
        rig.turn_to(11);
        assert_eq!(rig.dimmer.output().writes.len(), 1);
    }

    #[test]
    fn turning_below_zero_sticks_at_bottom() {
        let mut rig = Rig::new();
        let update = rig.turn_to(199);
        assert_eq!(update.value_changed, Some(49));

        let mut rig = Rig::new();
        rig.turn_to(200);
        assert_eq!(rig.encoder.resets, [0]);
        assert!(rig.dimmer.output().writes.is_empty());
        assert_eq!(rig.dimmer.diagnostics().low_reseeds, 1);
    }

    #[test]
    fn turning_past_top_sticks_at_top() {
        let mut rig = Rig::new();
        for count in (4..=200).step_by(4) {
            rig.turn_to(count);
        }
        rig.turn_to(0);
        assert_eq!(rig.encoder.resets, [200]);
        assert_eq!(rig.encoder.count, 200);
        assert_eq!(rig.dimmer.output().last_for(Channel::Ch1), Some(10_000));
        assert_eq!(rig.dimmer.diagnostics().high_reseeds, 1);
    }

    #[test]
    fn press_switches_channel_and_rezeroes_dial() {
        let mut rig = Rig::new();
        rig.turn_to(40);

        let switch = rig.click();
        assert_eq!(
            switch,
            Some(ChannelSwitch {
                active: Channel::Ch2,
                previous: Channel::Ch1
            })
        );
        assert_eq!(rig.dimmer.active_channel(), Channel::Ch2);
        assert_eq!(rig.encoder.count, 0);
        assert_eq!(rig.dimmer.logical_value(), 0);
        assert_eq!(rig.dimmer.output().last_for(Channel::Ch1), Some(0));
        assert!(rig.dimmer.blink().is_armed());
        assert_eq!(rig.dimmer.blink().target(), Channel::Ch1);
        assert_eq!(rig.delay.total_ms(), 4);
    }

    #[test]
    fn held_button_switches_once() {
        let mut rig = Rig::new();
        rig.button.pressed = true;
        for _ in 0..50 {
            block_on(
                rig.dimmer
                    .poll_button(&rig.button, &mut rig.encoder, &mut rig.delay),
            );
        }
        assert_eq!(rig.dimmer.active_channel(), Channel::Ch2);
        assert_eq!(rig.dimmer.diagnostics().presses, 1);
    }

    #[test]
    fn blink_ticks_end_dark() {
        let mut rig = Rig::new();
        rig.click();
        for _ in 0..4 {
            rig.blink_tick();
        }
        assert!(!rig.dimmer.blink().is_armed());
        assert_eq!(rig.dimmer.output().last_for(Channel::Ch1), Some(0));
        assert_eq!(rig.dimmer.diagnostics().blinks_completed, 1);

        let writes = rig.dimmer.output().writes.len();
        rig.blink_tick();
        assert_eq!(rig.dimmer.output().writes.len(), writes);
    }

    #[test]
    fn press_during_blink_rearms_on_new_channel() {
        let mut rig = Rig::new();
        rig.click();
        rig.blink_tick();
        rig.click();

        assert_eq!(rig.dimmer.blink().target(), Channel::Ch2);
        assert_eq!(rig.dimmer.diagnostics().blinks_abandoned, 1);
        // Ch1 was left mid-blink at full brightness.
        assert_eq!(rig.dimmer.output().last_for(Channel::Ch1), Some(10_000));
    }

    #[test]
    fn heartbeat_only_toggles_status_led() {
        let mut rig = Rig::new();
        rig.click();
        let writes = rig.dimmer.output().writes.len();

        rig.dimmer.on_timer_elapsed(TimerId::Heartbeat, &mut rig.led);
        rig.dimmer.on_timer_elapsed(TimerId::Heartbeat, &mut rig.led);

        assert_eq!(rig.led.toggles, 2);
        assert_eq!(rig.dimmer.output().writes.len(), writes);
        assert!(rig.dimmer.blink().is_armed());
    }

    #[test]
    fn direction_changes_are_counted_but_silent() {
        let mut rig = Rig::new();
        rig.encoder.direction = Direction::CounterClockwise;
        let update = rig.turn_to(2);
        assert_eq!(update.direction_changed, Some(Direction::CounterClockwise));
        assert!(rig.dimmer.output().writes.is_empty());
        assert_eq!(rig.dimmer.diagnostics().direction_changes, 1);
    }
}
