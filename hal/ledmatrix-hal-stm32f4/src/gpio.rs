//! GPIO glue for STM32F4

use embassy_stm32::gpio::Output;
use ledmatrix_hal::OutputPin;

/// Slave-select line driven by an embassy push-pull output
///
/// Create the output with `Level::High` so the chip sees an idle line
/// before the first transaction.
pub struct ChipSelect<'d> {
    pin: Output<'d>,
}

impl<'d> ChipSelect<'d> {
    pub fn new(pin: Output<'d>) -> Self {
        Self { pin }
    }
}

impl OutputPin for ChipSelect<'_> {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}
