//! STM32F103 Blue Pill Four-Channel Encoder Dimmer
//! =============================================================================================
//!
//! This firmware drives four lamp channels from a single rotary encoder:
//! - Turning the encoder sets the brightness of the selected channel
//! - Pressing the encoder switch selects the next channel and double-blinks
//!   the channel that was just released
//! - Onboard LED heartbeat indicator
//!
//! Hardware Connections:
//!   Rotary Encoder:
//!      CLK  -> PB6 (TIM4_CH1)
//!      DT   -> PB7 (TIM4_CH2)
//!      SW   -> PB12 (with pull-up)
//!
//!   Lamp outputs (TIM3 PWM):
//!      CH1  -> PA6
//!      CH2  -> PA7
//!      CH3  -> PB0
//!      CH4  -> PB1
//!
//!   Status LED: PC13 (onboard)

#![no_std]
#![no_main]

use defmt_rtt as _; // Global logger
use embassy_executor::Spawner;
use embassy_futures::select::{Either, select};
use embassy_stm32::{
    gpio::{Input, Level, Output, OutputType, Pull, Speed},
    time::Hertz,
    timer::{
        qei::{Qei, QeiPin},
        simple_pwm::{PwmPin, SimplePwm},
    },
};
use embassy_sync::{blocking_mutex::raw::ThreadModeRawMutex, mutex::Mutex};
use embassy_time::{Delay, Duration, Ticker};
use encoder_dimmer::{
    Dimmer, DimmerConfig, TimerId,
    hardware::{
        gpio::{EncoderSwitch, StatusLed},
        qei_encoder::QeiEncoder,
        timer_pwm::TimerPwm,
        traits::PwmOutput,
    },
};
use panic_probe as _; // Panic handler
use static_cell::StaticCell;

type SharedDimmer = Mutex<ThreadModeRawMutex, Dimmer<TimerPwm<'static>>>;

// Controller shared by the main loop and the tick task
static DIMMER: StaticCell<SharedDimmer> = StaticCell::new();

// Diagnostics are logged every this many heartbeats
const DIAGNOSTICS_EVERY: u32 = 20;

/// Main application entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_stm32::init(Default::default());

    let config = DimmerConfig::REV_50;

    // Lamp outputs on TIM3, all four channels
    let pwm = TimerPwm::new(SimplePwm::new(
        p.TIM3,
        Some(PwmPin::new_ch1(p.PA6, OutputType::PushPull)),
        Some(PwmPin::new_ch2(p.PA7, OutputType::PushPull)),
        Some(PwmPin::new_ch3(p.PB0, OutputType::PushPull)),
        Some(PwmPin::new_ch4(p.PB1, OutputType::PushPull)),
        Hertz(config.pwm_frequency_hz),
        Default::default(),
    ));

    // Spread the dial over the whole duty range of the timer
    let max_duty = pwm.max_duty_cycle();
    let config = config.with_duty_per_step(max_duty / config.max_logical_value);
    defmt::unwrap!(config.validate());
    defmt::info!("dimmer config: {}", config);

    // Rotary encoder via TIM4 quadrature interface
    let encoder = QeiEncoder::new(
        Qei::new(p.TIM4, QeiPin::new_ch1(p.PB6), QeiPin::new_ch2(p.PB7)),
        config.max_count(),
    );

    let button = EncoderSwitch::new(Input::new(p.PB12, Pull::Up));
    let mut led = StatusLed::new(Output::new(p.PC13, Level::High, Speed::Low));

    let mut dimmer = defmt::unwrap!(Dimmer::new(config, pwm));
    dimmer.start(&mut led);
    let dimmer: &'static SharedDimmer = DIMMER.init(Mutex::new(dimmer));

    defmt::unwrap!(spawner.spawn(tick_task(
        dimmer,
        led,
        Duration::from_millis(config.heartbeat_ms),
        Duration::from_millis(config.blink_ms),
    )));

    control_loop(
        dimmer,
        encoder,
        button,
        Duration::from_millis(config.poll_ms),
    )
    .await
}

/// Main control loop
///
/// Polls the encoder and the switch once per period. A switch level change
/// holds the loop for the settle delay.
async fn control_loop(
    dimmer: &'static SharedDimmer,
    mut encoder: QeiEncoder<'static>,
    button: EncoderSwitch<'static>,
    period: Duration,
) -> ! {
    let mut ticker = Ticker::every(period);
    let mut delay = Delay;

    loop {
        {
            let mut dimmer = dimmer.lock().await;
            dimmer.poll_encoder(&mut encoder);
            dimmer.poll_button(&button, &mut encoder, &mut delay).await;
        }
        ticker.next().await;
    }
}

/// Periodic Timer Task
///
/// Responsibilities:
/// 1. Toggle the status LED on every heartbeat
/// 2. Step the confirmation blink on every blink tick
/// 3. Log a diagnostics snapshot now and then
#[embassy_executor::task]
async fn tick_task(
    dimmer: &'static SharedDimmer,
    mut led: StatusLed<'static>,
    heartbeat_period: Duration,
    blink_period: Duration,
) {
    let mut heartbeat = Ticker::every(heartbeat_period);
    let mut blink = Ticker::every(blink_period);
    let mut beats: u32 = 0;

    loop {
        let timer = match select(heartbeat.next(), blink.next()).await {
            Either::First(()) => TimerId::Heartbeat,
            Either::Second(()) => TimerId::Blink,
        };

        let mut dimmer = dimmer.lock().await;
        dimmer.on_timer_elapsed(timer, &mut led);

        if timer == TimerId::Heartbeat {
            beats = beats.wrapping_add(1);
            if beats % DIAGNOSTICS_EVERY == 0 {
                defmt::info!(
                    "{} on {}: {}",
                    dimmer.logical_value(),
                    dimmer.active_channel(),
                    dimmer.diagnostics()
                );
            }
        }
    }
}
