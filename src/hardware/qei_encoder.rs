use embassy_stm32::pac;
use embassy_stm32::peripherals::TIM4;
use embassy_stm32::timer::qei::{self, Qei};

use super::traits::QuadratureEncoder;
use crate::encoder::Direction;

/// TIM4 in encoder mode (CH1 = PB6, CH2 = PB7).
///
/// The driver does not expose the counter registers, so the auto-reload and
/// count writes go through the PAC.
pub struct QeiEncoder<'d> {
    qei: Qei<'d, TIM4>,
}

impl<'d> QeiEncoder<'d> {
    /// Takes over the timer and limits the counter to `0..=max_count`, so turning
    /// past either end wraps straight onto the other end of the dial.
    pub fn new(qei: Qei<'d, TIM4>, max_count: u16) -> Self {
        pac::TIM4.arr().write(|w| w.set_arr(max_count));
        pac::TIM4.cnt().write(|w| w.set_cnt(0));
        Self { qei }
    }
}

impl QuadratureEncoder for QeiEncoder<'_> {
    fn count(&self) -> u16 {
        self.qei.count()
    }

    fn direction(&self) -> Direction {
        match self.qei.read_direction() {
            qei::Direction::Upcounting => Direction::Clockwise,
            qei::Direction::Downcounting => Direction::CounterClockwise,
        }
    }

    fn reset_count(&mut self, value: u16) {
        pac::TIM4.cnt().write(|w| w.set_cnt(value));
    }
}
