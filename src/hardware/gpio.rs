use super::traits::{Button, Led};
use embassy_stm32::gpio::{Input, Output};

/// Onboard status LED. PC13 on the Blue Pill sinks current, so driving the pin
/// low lights it.
pub struct StatusLed<'d> {
    pin: Output<'d>,
}

impl<'d> StatusLed<'d> {
    /// `pin` should be configured high so the LED stays dark until
    /// [`Led::on`] is called.
    pub fn new(pin: Output<'d>) -> Self {
        Self { pin }
    }
}

impl Led for StatusLed<'_> {
    fn on(&mut self) {
        self.pin.set_low();
    }

    fn toggle(&mut self) {
        self.pin.toggle();
    }
}

/// Encoder push-switch wired to ground. `pin` needs the internal pull-up so it
/// reads high while released.
pub struct EncoderSwitch<'d> {
    pin: Input<'d>,
}

impl<'d> EncoderSwitch<'d> {
    pub fn new(pin: Input<'d>) -> Self {
        Self { pin }
    }
}

impl Button for EncoderSwitch<'_> {
    fn is_pressed(&self) -> bool {
        self.pin.is_low()
    }
}
