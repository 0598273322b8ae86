//! Output channel selection.

/// One of the four PWM outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    #[default]
    Ch1,
    Ch2,
    Ch3,
    Ch4,
}

impl Channel {
    pub const ALL: [Channel; 4] = [Channel::Ch1, Channel::Ch2, Channel::Ch3, Channel::Ch4];

    /// Next channel in the fixed cycle `Ch1 -> Ch2 -> Ch3 -> Ch4 -> Ch1`.
    pub const fn next(self) -> Self {
        match self {
            Channel::Ch1 => Channel::Ch2,
            Channel::Ch2 => Channel::Ch3,
            Channel::Ch3 => Channel::Ch4,
            Channel::Ch4 => Channel::Ch1,
        }
    }

    /// Zero-based position, matching the timer's output compare channel minus one.
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Outcome of a confirmed button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelSwitch {
    /// Channel the dial now controls.
    pub active: Channel,
    /// Channel that was just released.
    pub previous: Channel,
}

pub struct ChannelSelector {
    active: Channel,
}

impl ChannelSelector {
    pub const fn new() -> Self {
        Self {
            active: Channel::Ch1,
        }
    }

    pub fn active(&self) -> Channel {
        self.active
    }

    /// Advances to the next channel. Called once per debounced press.
    pub fn on_press_edge(&mut self) -> ChannelSwitch {
        let previous = self.active;
        self.active = previous.next();
        ChannelSwitch {
            active: self.active,
            previous,
        }
    }
}

impl Default for ChannelSelector {
    fn default() -> Self {
        Self::new()
    }
}
