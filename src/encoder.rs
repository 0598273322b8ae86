//! Quadrature counter normalization.
//!
//! The timer counts four raw ticks per detent and wraps freely. [`EncoderNormalizer`]
//! turns that into a logical position in `0..=max_logical_value` that sticks at both
//! ends: turning past zero or past the top re-seeds the hardware counter instead
//! of wrapping around to the other end of the dial.

use crate::config::DimmerConfig;

/// Counting direction reported by the timer's DIR bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Upcounting, DIR bit clear.
    #[default]
    Clockwise,
    /// Downcounting, DIR bit set.
    CounterClockwise,
}

impl Direction {
    pub const fn from_dir_bit(bit: bool) -> Self {
        if bit {
            Direction::CounterClockwise
        } else {
            Direction::Clockwise
        }
    }
}

/// Result of one [`EncoderNormalizer::normalize`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderUpdate {
    /// Logical position derived from this raw reading.
    pub logical_value: u16,
    pub direction: Direction,
    /// New logical position, if it moved since the last accepted reading.
    pub value_changed: Option<u16>,
    /// New direction, if it flipped since the last accepted reading.
    pub direction_changed: Option<Direction>,
    /// Raw value the hardware counter must be forced to after crossing an end
    /// of the dial. No change events accompany a reseed.
    pub reseed: Option<u16>,
}

pub struct EncoderNormalizer {
    ticks_per_detent: u16,
    max_logical_value: u16,
    max_count: u16,
    logical_value: u16,
    direction: Direction,
}

impl EncoderNormalizer {
    pub const fn new(config: &DimmerConfig) -> Self {
        Self {
            ticks_per_detent: config.ticks_per_detent,
            max_logical_value: config.max_logical_value,
            max_count: config.max_count(),
            logical_value: 0,
            direction: Direction::Clockwise,
        }
    }

    /// Converts a raw counter reading into a bounded logical position.
    ///
    /// Readings past the configured range are clamped to `max_logical_value`
    /// so a counter with a wider auto-reload than the dial still lands on an end.
    pub fn normalize(&mut self, raw_count: u16, direction: Direction) -> EncoderUpdate {
        let logical_value = (raw_count / self.ticks_per_detent).min(self.max_logical_value);
        let mut update = EncoderUpdate {
            logical_value,
            direction,
            value_changed: None,
            direction_changed: None,
            reseed: None,
        };

        if logical_value == self.max_logical_value && self.logical_value == 0 {
            // Counter wrapped below zero.
            update.reseed = Some(0);
            return update;
        }
        if logical_value == 0 && self.logical_value == self.max_logical_value {
            // Counter wrapped above the top.
            update.reseed = Some(self.max_count);
            return update;
        }

        if logical_value != self.logical_value {
            self.logical_value = logical_value;
            update.value_changed = Some(logical_value);
        }
        if direction != self.direction {
            self.direction = direction;
            update.direction_changed = Some(direction);
        }
        update
    }

    /// Re-zeroes the dial after a channel switch.
    pub fn reset(&mut self) {
        self.logical_value = 0;
    }

    pub fn logical_value(&self) -> u16 {
        self.logical_value
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn max_count(&self) -> u16 {
        self.max_count
    }
}
