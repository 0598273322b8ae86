pub mod traits;

#[cfg(feature = "firmware")]
pub mod gpio;
#[cfg(feature = "firmware")]
pub mod qei_encoder;
#[cfg(feature = "firmware")]
pub mod timer_pwm;
