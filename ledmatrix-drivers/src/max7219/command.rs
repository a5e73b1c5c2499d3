//! Register frames and configuration commands
//!
//! Every write to the chip is one 16-bit frame:
//!
//! ```text
//!  15        8 7         0
//! ┌───────────┬───────────┐
//! │  address  │   value   │   shifted MSB first
//! └───────────┴───────────┘
//! ```

use ledmatrix_core::bitmap::{BitmapError, ROWS};
use ledmatrix_core::config::{RegisterMap, MAX_INTENSITY};

use super::MatrixError;

/// One `(address << 8) | value` frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterFrame(u16);

impl RegisterFrame {
    pub const fn new(address: u8, value: u8) -> Self {
        Self(((address as u16) << 8) | value as u16)
    }

    pub const fn address(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn value(self) -> u8 {
        self.0 as u8
    }

    /// Raw frame as shifted onto the wire
    pub const fn bits(self) -> u16 {
        self.0
    }
}

impl From<RegisterFrame> for u16 {
    fn from(frame: RegisterFrame) -> u16 {
        frame.bits()
    }
}

/// Closed set of writes the driver issues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Shifted through without effect
    NoOp,
    /// Raw bitmap mode (no 7-segment decoding on any row)
    DecodeOff,
    /// Brightness 0-15
    Intensity(u8),
    /// Number of scanned rows, 1-8
    ScanLimit(u8),
    /// Blank the display, keep register contents
    Shutdown,
    /// Leave shutdown
    NormalOperation,
    /// All LEDs on at full brightness while set
    DisplayTest(bool),
    /// Bitmap for one row (1-8)
    Row { row: u8, bits: u8 },
}

impl Command {
    /// Encode against a register map
    ///
    /// Out-of-range arguments are rejected here, before anything reaches
    /// the bus.
    pub fn frame<E>(&self, regs: &RegisterMap) -> Result<RegisterFrame, MatrixError<E>> {
        let (address, value) = match *self {
            Command::NoOp => (regs.noop, 0x00),
            Command::DecodeOff => (regs.decode_mode, 0x00),
            Command::Intensity(level) => {
                if level > MAX_INTENSITY {
                    return Err(MatrixError::InvalidIntensity(level));
                }
                (regs.intensity, level)
            }
            Command::ScanLimit(rows) => {
                if !(1..=ROWS).contains(&rows) {
                    return Err(MatrixError::InvalidScanLimit(rows));
                }
                // The register holds the index of the last scanned row
                (regs.scan_limit, rows - 1)
            }
            Command::Shutdown => (regs.shutdown, 0x00),
            Command::NormalOperation => (regs.shutdown, 0x01),
            Command::DisplayTest(on) => (regs.display_test, on as u8),
            Command::Row { row, bits } => {
                if !(1..=ROWS).contains(&row) {
                    return Err(MatrixError::Bitmap(BitmapError::InvalidRow(row)));
                }
                let address = regs.row(row).ok_or(MatrixError::RowAddressOverflow(row))?;
                (address, bits)
            }
        };

        Ok(RegisterFrame::new(address, value))
    }
}
