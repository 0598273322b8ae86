//! Test doubles for the board traits.

use crate::encoder::Direction;
use crate::hardware::traits::{Button, Led, PwmOutput, QuadratureEncoder};
use crate::selector::Channel;

/// Accumulates requested delays instead of waiting.
#[derive(Default)]
pub struct RecordingDelay {
    total_ns: u64,
}

impl RecordingDelay {
    pub fn total_ms(&self) -> u64 {
        self.total_ns / 1_000_000
    }
}

impl embedded_hal_async::delay::DelayNs for RecordingDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}

/// Records every duty written, in order.
pub struct FakePwm {
    pub max_duty: u16,
    pub writes: Vec<(Channel, u16)>,
}

impl FakePwm {
    pub fn new(max_duty: u16) -> Self {
        Self {
            max_duty,
            writes: Vec::new(),
        }
    }

    pub fn last_for(&self, channel: Channel) -> Option<u16> {
        self.writes
            .iter()
            .rev()
            .find(|(ch, _)| *ch == channel)
            .map(|(_, duty)| *duty)
    }
}

impl PwmOutput for FakePwm {
    fn set_duty_cycle(&mut self, channel: Channel, duty: u16) {
        self.writes.push((channel, duty));
    }

    fn max_duty_cycle(&self) -> u16 {
        self.max_duty
    }
}

#[derive(Default)]
pub struct FakeEncoder {
    pub count: u16,
    pub direction: Direction,
    pub resets: Vec<u16>,
}

impl QuadratureEncoder for FakeEncoder {
    fn count(&self) -> u16 {
        self.count
    }

    fn direction(&self) -> Direction {
        self.direction
    }

    fn reset_count(&mut self, value: u16) {
        self.count = value;
        self.resets.push(value);
    }
}

#[derive(Default)]
pub struct FakeButton {
    pub pressed: bool,
}

impl Button for FakeButton {
    fn is_pressed(&self) -> bool {
        self.pressed
    }
}

#[derive(Default)]
pub struct FakeLed {
    pub lit: bool,
    pub toggles: u32,
}

impl Led for FakeLed {
    fn on(&mut self) {
        self.lit = true;
    }

    fn toggle(&mut self) {
        self.lit = !self.lit;
        self.toggles += 1;
    }
}
