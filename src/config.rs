//! Board-level tuning for the dimmer.
//!
//! Hardware revisions differ only in how far the dial turns, so the encoder range,
//! the duty multiplier and the tick periods live here instead of in the state
//! machines.

/// Reasons a [`DimmerConfig`] is rejected at boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// `ticks_per_detent` is zero.
    ZeroTicksPerDetent,
    /// `max_logical_value` is zero, so the dial has no travel.
    EmptyRange,
    /// `max_logical_value * ticks_per_detent` does not fit the 16-bit counter.
    CounterOverflow,
    /// `duty_per_step` is zero, so every position drives the output off.
    ZeroDutyStep,
    /// One of the tick or poll periods is zero.
    ZeroPeriod,
}

/// Static configuration of one dimmer board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DimmerConfig {
    /// Raw quadrature counts per mechanical detent (x4 decoding).
    pub ticks_per_detent: u16,
    /// Highest logical brightness step the dial reaches.
    pub max_logical_value: u16,
    /// Duty-cycle units per logical step.
    pub duty_per_step: u16,
    /// Logical level used for the "on" phases of the confirmation blink.
    /// Saturates at the timer's maximum duty.
    pub blink_level: u16,
    /// Button settle delay in milliseconds.
    pub settle_ms: u32,
    /// Status LED heartbeat period in milliseconds.
    pub heartbeat_ms: u64,
    /// Cadence of the confirmation blink steps in milliseconds.
    pub blink_ms: u64,
    /// Main loop polling period in milliseconds.
    pub poll_ms: u64,
    /// PWM carrier frequency.
    pub pwm_frequency_hz: u32,
}

impl DimmerConfig {
    /// 50-step dial, 200-count encoder range.
    pub const REV_50: Self = Self {
        ticks_per_detent: 4,
        max_logical_value: 50,
        duty_per_step: 200,
        blink_level: 200,
        settle_ms: 2,
        heartbeat_ms: 500,
        blink_ms: 150,
        poll_ms: 1,
        pwm_frequency_hz: 1_000,
    };

    /// 100-step dial, 400-count encoder range.
    pub const REV_100: Self = Self::REV_50
        .with_max_logical_value(100)
        .with_duty_per_step(100)
        .with_blink_level(400);

    pub const fn with_max_logical_value(mut self, max_logical_value: u16) -> Self {
        self.max_logical_value = max_logical_value;
        self
    }

    pub const fn with_duty_per_step(mut self, duty_per_step: u16) -> Self {
        self.duty_per_step = duty_per_step;
        self
    }

    pub const fn with_blink_level(mut self, blink_level: u16) -> Self {
        self.blink_level = blink_level;
        self
    }

    /// Raw counter value of the top end of the dial.
    pub const fn max_count(&self) -> u16 {
        self.max_logical_value.saturating_mul(self.ticks_per_detent)
    }

    /// Checks the invariants the state machines rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ticks_per_detent == 0 {
            return Err(ConfigError::ZeroTicksPerDetent);
        }
        if self.max_logical_value == 0 {
            return Err(ConfigError::EmptyRange);
        }
        if self
            .max_logical_value
            .checked_mul(self.ticks_per_detent)
            .is_none()
        {
            return Err(ConfigError::CounterOverflow);
        }
        if self.duty_per_step == 0 {
            return Err(ConfigError::ZeroDutyStep);
        }
        if self.heartbeat_ms == 0 || self.blink_ms == 0 || self.poll_ms == 0 {
            return Err(ConfigError::ZeroPeriod);
        }
        Ok(())
    }
}

impl Default for DimmerConfig {
    fn default() -> Self {
        Self::REV_50
    }
}
