//! SPI glue for STM32F4
//!
//! embassy-stm32 configures word size per transfer, so the 16-bit frame
//! format comes from writing `u16` words; only clock, mode and bit order
//! are carried in the config.

use embassy_stm32::spi::{self, BitOrder as EmbassyBitOrder, MODE_0, MODE_1, MODE_2, MODE_3};
use embassy_stm32::time::Hertz;
use ledmatrix_hal::spi::{BitOrder, Mode, SpiConfig};

/// Translate a bus config into embassy's SPI config
pub fn embassy_config(config: &SpiConfig) -> spi::Config {
    let mut out = spi::Config::default();
    out.frequency = Hertz(config.frequency);
    out.mode = match config.mode {
        Mode::Mode0 => MODE_0,
        Mode::Mode1 => MODE_1,
        Mode::Mode2 => MODE_2,
        Mode::Mode3 => MODE_3,
    };
    out.bit_order = match config.bit_order {
        BitOrder::MsbFirst => EmbassyBitOrder::MsbFirst,
        BitOrder::LsbFirst => EmbassyBitOrder::LsbFirst,
    };
    out
}

/// Error from SPI operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiBusError {
    /// Frame format error
    Framing,
    /// CRC mismatch
    Crc,
    /// Another master drove NSS
    ModeFault,
    /// Receive overrun
    Overrun,
    /// Other error
    Other,
}

impl From<spi::Error> for SpiBusError {
    fn from(e: spi::Error) -> Self {
        #[allow(unreachable_patterns)]
        match e {
            spi::Error::Framing => SpiBusError::Framing,
            spi::Error::Crc => SpiBusError::Crc,
            spi::Error::ModeFault => SpiBusError::ModeFault,
            spi::Error::Overrun => SpiBusError::Overrun,
            _ => SpiBusError::Other,
        }
    }
}
