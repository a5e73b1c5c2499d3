//! MAX7219 LED matrix driver
//!
//! The MAX7219 drives an 8x8 matrix as eight "digits", one per row, in
//! no-decode mode. Every operation is a sequence of single-frame
//! transactions; the chip has no readable state.
//!
//! # Initialization
//!
//! [`Max7219::init`] must run once before any row data is written. The order
//! is fixed because decode mode changes how row bytes are interpreted:
//!
//! 1. decode mode off
//! 2. intensity
//! 3. scan limit (all 8 rows for a full matrix)
//! 4. normal operation (leave shutdown)
//! 5. display test off
//! 6. clear all rows
//!
//! Render operations are not guarded against running before `init`; the
//! chip simply shows whatever its power-on state makes of the data.

mod command;
mod render;

pub use command::{Command, RegisterFrame};

use ledmatrix_core::bitmap::{BitmapError, ROWS};
use ledmatrix_core::config::{DeviceConfig, DisplayConfig, RegisterMap};
use ledmatrix_hal::SerialBus;

use crate::transaction::transmit;

/// Errors from driver operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MatrixError<E> {
    /// The bus reported an error (host buses only)
    Bus(E),
    /// Intensity above 15
    InvalidIntensity(u8),
    /// Scan limit outside 1..=8 rows
    InvalidScanLimit(u8),
    /// Row or coordinate outside the matrix
    Bitmap(BitmapError),
    /// The register map puts this row past address 0xFF
    RowAddressOverflow(u8),
}

impl<E> MatrixError<E> {
    /// Convert the bus error, leaving validation errors as they are
    pub fn map_bus<F>(self, f: impl FnOnce(E) -> F) -> MatrixError<F> {
        match self {
            MatrixError::Bus(e) => MatrixError::Bus(f(e)),
            MatrixError::InvalidIntensity(level) => MatrixError::InvalidIntensity(level),
            MatrixError::InvalidScanLimit(rows) => MatrixError::InvalidScanLimit(rows),
            MatrixError::Bitmap(e) => MatrixError::Bitmap(e),
            MatrixError::RowAddressOverflow(row) => MatrixError::RowAddressOverflow(row),
        }
    }
}

impl<E> From<BitmapError> for MatrixError<E> {
    fn from(e: BitmapError) -> Self {
        MatrixError::Bitmap(e)
    }
}

/// MAX7219 driver over a [`SerialBus`]
pub struct Max7219<B> {
    bus: B,
    registers: RegisterMap,
    display: DisplayConfig,
    initialized: bool,
}

impl<B: SerialBus> Max7219<B> {
    /// Create a driver; nothing is sent until [`Max7219::init`]
    pub fn new(bus: B, registers: RegisterMap, display: DisplayConfig) -> Self {
        Self {
            bus,
            registers,
            display,
            initialized: false,
        }
    }

    /// Create a driver from the register map and display settings of a device config
    pub fn from_config(bus: B, config: &DeviceConfig) -> Self {
        Self::new(bus, config.registers, config.display)
    }

    /// Whether [`Max7219::init`] has completed
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// The register map in use
    pub fn registers(&self) -> &RegisterMap {
        &self.registers
    }

    /// Borrow the underlying bus
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Mutably borrow the underlying bus
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Give back the underlying bus
    pub fn release(self) -> B {
        self.bus
    }

    /// Write one register in a single transaction
    pub fn write_register(&mut self, address: u8, value: u8) -> Result<(), MatrixError<B::Error>> {
        self.write_frame(RegisterFrame::new(address, value))
    }

    fn write_frame(&mut self, frame: RegisterFrame) -> Result<(), MatrixError<B::Error>> {
        transmit(&mut self.bus, frame.bits()).map_err(MatrixError::Bus)
    }

    /// Fail before any traffic if some row has no register address
    pub(crate) fn check_row_registers(&self) -> Result<(), MatrixError<B::Error>> {
        if self.registers.rows_fit() {
            Ok(())
        } else {
            Err(MatrixError::RowAddressOverflow(ROWS))
        }
    }

    /// Encode and send one command
    pub fn send(&mut self, command: Command) -> Result<(), MatrixError<B::Error>> {
        let frame = command.frame::<B::Error>(&self.registers)?;
        self.write_frame(frame)
    }

    /// Run the power-up sequence and blank the display
    ///
    /// The configured intensity, scan limit and row addresses are validated
    /// before the first frame goes out, so a bad config leaves the bus
    /// untouched.
    pub fn init(&mut self) -> Result<(), MatrixError<B::Error>> {
        self.check_row_registers()?;

        let sequence = [
            Command::DecodeOff,
            Command::Intensity(self.display.intensity),
            Command::ScanLimit(self.display.scan_limit),
            Command::NormalOperation,
            Command::DisplayTest(false),
        ];

        let mut frames = [RegisterFrame::new(0, 0); 5];
        for (frame, command) in frames.iter_mut().zip(sequence.iter()) {
            *frame = command.frame::<B::Error>(&self.registers)?;
        }

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "max7219: init intensity={} scan_limit={}",
            self.display.intensity,
            self.display.scan_limit
        );

        for frame in frames {
            self.write_frame(frame)?;
        }
        self.clear()?;

        self.initialized = true;
        Ok(())
    }

    /// Write 0x00 to every row register, rows 1..=8 in order
    pub fn clear(&mut self) -> Result<(), MatrixError<B::Error>> {
        self.check_row_registers()?;
        for row in 1..=ROWS {
            self.write_row(row, 0x00)?;
        }
        Ok(())
    }

    /// Write a raw bitmap byte to one row (1..=8)
    pub fn write_row(&mut self, row: u8, bits: u8) -> Result<(), MatrixError<B::Error>> {
        self.send(Command::Row { row, bits })
    }

    /// Change brightness (0-15)
    pub fn set_intensity(&mut self, level: u8) -> Result<(), MatrixError<B::Error>> {
        self.send(Command::Intensity(level))?;
        self.display.intensity = level;
        Ok(())
    }

    /// Change how many rows are scanned (1-8)
    pub fn set_scan_limit(&mut self, rows: u8) -> Result<(), MatrixError<B::Error>> {
        self.send(Command::ScanLimit(rows))?;
        self.display.scan_limit = rows;
        Ok(())
    }

    /// Enter or leave shutdown
    pub fn set_shutdown(&mut self, shutdown: bool) -> Result<(), MatrixError<B::Error>> {
        if shutdown {
            self.send(Command::Shutdown)
        } else {
            self.send(Command::NormalOperation)
        }
    }

    /// Turn display test mode on or off
    pub fn set_display_test(&mut self, on: bool) -> Result<(), MatrixError<B::Error>> {
        self.send(Command::DisplayTest(on))
    }
}
