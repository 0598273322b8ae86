//! Double-blink confirmation played on a channel after it is deselected.
//!
//! Each blink tick advances one step: on, off, on, off. The last step leaves the
//! channel dark and returns the sequencer to idle.

use crate::selector::Channel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BlinkState {
    Idle,
    FirstOn,
    FirstOff,
    SecondOn,
    SecondOff,
}

/// Output requested by one blink step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BlinkStep {
    pub channel: Channel,
    /// Logical level to program: the configured blink level or 0.
    pub level: u16,
    /// `true` on the final step, after which the sequencer is idle.
    pub finished: bool,
}

pub struct BlinkSequencer {
    state: BlinkState,
    target: Channel,
    level: u16,
}

impl BlinkSequencer {
    pub const fn new(level: u16) -> Self {
        Self {
            state: BlinkState::Idle,
            target: Channel::Ch1,
            level,
        }
    }

    /// Starts the sequence from the first step on `target`.
    ///
    /// A sequence still in flight is dropped where it stands; its channel is
    /// returned so the caller can report it.
    pub fn arm(&mut self, target: Channel) -> Option<Channel> {
        let abandoned = self.is_armed().then_some(self.target);
        self.state = BlinkState::FirstOn;
        self.target = target;
        abandoned
    }

    /// Advances one step. Returns `None` while idle.
    pub fn tick(&mut self) -> Option<BlinkStep> {
        let (level, next) = match self.state {
            BlinkState::Idle => return None,
            BlinkState::FirstOn => (self.level, BlinkState::FirstOff),
            BlinkState::FirstOff => (0, BlinkState::SecondOn),
            BlinkState::SecondOn => (self.level, BlinkState::SecondOff),
            BlinkState::SecondOff => (0, BlinkState::Idle),
        };
        self.state = next;
        Some(BlinkStep {
            channel: self.target,
            level,
            finished: next == BlinkState::Idle,
        })
    }

    pub fn is_armed(&self) -> bool {
        self.state != BlinkState::Idle
    }

    pub fn state(&self) -> BlinkState {
        self.state
    }

    pub fn target(&self) -> Channel {
        self.target
    }
}
