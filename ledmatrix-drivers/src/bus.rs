//! Bus adapters
//!
//! Two ways to get a [`SerialBus`]:
//!
//! - [`SpiDeviceBus`]: any `embedded-hal` 1.0 `SpiBus<u16>` plus a
//!   chip-select pin. This is what the firmware uses with embassy-stm32.
//!   Frame completion comes from the HAL's `write` and `flush`.
//! - [`PolledBus`]: a register-level [`SpiPeripheral`] whose completion is
//!   detected by polling the BSY/TXE status flags.
//!
//! Plus [`HalDelay`], which lets any `embedded-hal` delay serve as the
//! millisecond delay of the demo runner.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::spi::SpiBus;
use ledmatrix_hal::spi::spin_until;
use ledmatrix_hal::{DelayMs, OutputPin, SerialBus, SpiPeripheral};

/// `embedded-hal` SPI bus with a manually driven chip-select
///
/// The SPI peripheral must be configured for 16-bit words, MSB first,
/// mode 0.
///
/// `wait_complete` maps to `SpiBus::flush`. How long that waits is up to the
/// HAL. On embassy-stm32 the blocking `write` already returns only after
/// each word has been clocked out, and `flush` is a no-op. A HAL whose
/// `write` returns early must finish the transfer in `flush`, or the
/// chip-select rises mid-frame.
pub struct SpiDeviceBus<SPI, CS> {
    spi: SPI,
    cs: CS,
}

impl<SPI, CS: OutputPin> SpiDeviceBus<SPI, CS> {
    /// Wrap a bus and chip-select; the chip-select is driven high (idle)
    pub fn new(spi: SPI, mut cs: CS) -> Self {
        cs.set_high();
        Self { spi, cs }
    }

    /// Give back the SPI bus and chip-select pin
    pub fn release(self) -> (SPI, CS) {
        (self.spi, self.cs)
    }
}

impl<SPI, CS> SerialBus for SpiDeviceBus<SPI, CS>
where
    SPI: SpiBus<u16>,
    CS: OutputPin,
{
    type Error = SPI::Error;

    fn select(&mut self) -> Result<(), Self::Error> {
        self.cs.set_low();
        Ok(())
    }

    fn write_frame(&mut self, frame: u16) -> Result<(), Self::Error> {
        self.spi.write(&[frame])
    }

    fn wait_complete(&mut self) -> Result<(), Self::Error> {
        self.spi.flush()
    }

    fn deselect(&mut self) -> Result<(), Self::Error> {
        self.cs.set_high();
        Ok(())
    }
}

/// Register-level SPI with busy-wait completion
///
/// Cannot fail: the link has no handshake, so a fault is indistinguishable
/// from a correct transfer.
pub struct PolledBus<P, CS> {
    peripheral: P,
    cs: CS,
}

impl<P: SpiPeripheral, CS: OutputPin> PolledBus<P, CS> {
    /// Wrap a peripheral and chip-select; the chip-select is driven high (idle)
    pub fn new(peripheral: P, mut cs: CS) -> Self {
        cs.set_high();
        Self { peripheral, cs }
    }

    /// Give back the peripheral and chip-select pin
    pub fn release(self) -> (P, CS) {
        (self.peripheral, self.cs)
    }
}

impl<P: SpiPeripheral, CS: OutputPin> SerialBus for PolledBus<P, CS> {
    type Error = Infallible;

    fn select(&mut self) -> Result<(), Infallible> {
        self.cs.set_low();
        Ok(())
    }

    fn write_frame(&mut self, frame: u16) -> Result<(), Infallible> {
        self.peripheral.write_data(frame);
        Ok(())
    }

    fn wait_complete(&mut self) -> Result<(), Infallible> {
        let peripheral = &self.peripheral;
        spin_until(|| peripheral.status().is_transfer_complete());
        Ok(())
    }

    fn deselect(&mut self) -> Result<(), Infallible> {
        self.cs.set_high();
        Ok(())
    }
}

/// Millisecond delay backed by an `embedded-hal` delay
pub struct HalDelay<D>(pub D);

impl<D: DelayNs> DelayMs for HalDelay<D> {
    fn delay_ms(&mut self, ms: u32) {
        DelayNs::delay_ms(&mut self.0, ms);
    }
}
