//! Push-button debouncing.
//!
//! A change of the raw level is accepted after a single settle pause rather than by
//! sampling the pin over several polls. The pause runs inline in the polling path,
//! so nothing else in the main loop runs while a press is being confirmed.

use embedded_hal_async::delay::DelayNs;

/// Clean transition reported by [`Debouncer::poll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    None,
    Pressed,
    Released,
}

pub struct Debouncer {
    settle_ms: u32,
    pressed: bool,
}

impl Debouncer {
    pub const fn new(settle_ms: u32) -> Self {
        Self {
            settle_ms,
            pressed: false,
        }
    }

    /// Feeds one raw observation (`true` = pressed) and returns the resulting edge.
    ///
    /// At most one edge is reported per physical transition: while the raw level
    /// matches the latched state this returns [`Edge::None`] without pausing.
    pub async fn poll<D: DelayNs>(&mut self, raw_pressed: bool, delay: &mut D) -> Edge {
        if raw_pressed == self.pressed {
            return Edge::None;
        }

        delay.delay_ms(self.settle_ms).await;
        self.pressed = raw_pressed;

        if raw_pressed {
            Edge::Pressed
        } else {
            Edge::Released
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }
}
