//! Board seams used by the dimmer core.

use crate::encoder::Direction;
use crate::selector::Channel;

/// Status indicator: lit at power-on, then flipped by every heartbeat tick.
pub trait Led {
    fn on(&mut self);
    fn toggle(&mut self);
}

/// Encoder push-switch. Implementations translate the active-low pin level.
pub trait Button {
    fn is_pressed(&self) -> bool;
}

/// Timer running in encoder mode.
pub trait QuadratureEncoder {
    /// Raw counter value.
    fn count(&self) -> u16;
    /// Current counting direction.
    fn direction(&self) -> Direction;
    /// Forces the counter to `value`.
    fn reset_count(&mut self, value: u16);
}

/// Timer with one PWM output per [`Channel`].
pub trait PwmOutput {
    /// Programs `duty` (timer units) on `channel` and makes sure it is enabled.
    fn set_duty_cycle(&mut self, channel: Channel, duty: u16);
    fn max_duty_cycle(&self) -> u16;
}
