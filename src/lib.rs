//! Four-channel PWM light dimmer driven by a rotary encoder with push-button.
//!
//! Rotating the encoder sets the brightness of the selected channel; pressing the
//! button advances to the next channel and blinks the one that was just released.
//!
//! The state machines ([`encoder`], [`button`], [`selector`], [`blink`]) are plain
//! `no_std` code tied together by the [`Dimmer`] controller and talk to the board
//! only through the traits in [`hardware::traits`]. The STM32F103 implementations
//! of those traits are compiled with the `firmware` feature.

#![cfg_attr(not(test), no_std)]

// Must stay first so the logging macros are visible to the modules below.
mod fmt;

pub mod blink;
pub mod button;
pub mod config;
pub mod diagnostics;
pub mod dimmer;
pub mod encoder;
pub mod hardware;
pub mod pwm;
pub mod selector;

#[cfg(test)]
mod mock;

pub use config::{ConfigError, DimmerConfig};
pub use dimmer::{Dimmer, TimerId};
pub use encoder::Direction;
pub use selector::Channel;
