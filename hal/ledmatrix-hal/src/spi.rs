//! SPI bus abstractions
//!
//! The matrix link is simplex: the controller only ever shifts 16-bit frames
//! out, one per slave-select window. These traits split a transaction into
//! its four hardware steps so every implementation preserves the same order:
//!
//! ```text
//! select ──▶ write_frame ──▶ wait_complete ──▶ deselect
//! ```
//!
//! The driver chip latches data on the rising edge of slave-select, so
//! deselecting before the shift register has drained corrupts the frame.

/// Step-wise access to a slave-select framed serial bus
///
/// Bare-metal implementations have nothing to report (the bus has no
/// handshake line) and use [`core::convert::Infallible`] as their error.
/// Host adapters may surface transport errors.
pub trait SerialBus {
    /// Error type for bus operations
    type Error;

    /// Assert slave-select (drive the line low)
    fn select(&mut self) -> Result<(), Self::Error>;

    /// Load one 16-bit frame into the transmit data register
    fn write_frame(&mut self, frame: u16) -> Result<(), Self::Error>;

    /// Block until the frame has been completely shifted out
    fn wait_complete(&mut self) -> Result<(), Self::Error>;

    /// Deassert slave-select (drive the line high)
    fn deselect(&mut self) -> Result<(), Self::Error>;
}

impl<T: SerialBus + ?Sized> SerialBus for &mut T {
    type Error = T::Error;

    fn select(&mut self) -> Result<(), Self::Error> {
        (**self).select()
    }

    fn write_frame(&mut self, frame: u16) -> Result<(), Self::Error> {
        (**self).write_frame(frame)
    }

    fn wait_complete(&mut self) -> Result<(), Self::Error> {
        (**self).wait_complete()
    }

    fn deselect(&mut self) -> Result<(), Self::Error> {
        (**self).deselect()
    }
}

/// Snapshot of the SPI status register flags that matter for transmit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiStatus {
    /// BSY: a frame is still being shifted
    pub busy: bool,
    /// TXE: the transmit buffer is empty
    pub tx_empty: bool,
}

impl SpiStatus {
    /// BSY bit position in the STM32 SPI_SR register
    pub const BSY_BIT: u32 = 7;
    /// TXE bit position in the STM32 SPI_SR register
    pub const TXE_BIT: u32 = 1;

    /// Decode the flags from a raw status register value
    pub const fn from_bits(sr: u32) -> Self {
        Self {
            busy: sr & (1 << Self::BSY_BIT) != 0,
            tx_empty: sr & (1 << Self::TXE_BIT) != 0,
        }
    }

    /// Both conditions are required: not busy AND transmit buffer empty
    pub const fn is_transfer_complete(&self) -> bool {
        !self.busy && self.tx_empty
    }
}

/// Register-level SPI peripheral
///
/// The lowest seam: a data register and a status register. A polled bus
/// built on top of this spins on [`SpiStatus::is_transfer_complete`].
pub trait SpiPeripheral {
    /// Write a frame into the data register
    fn write_data(&mut self, frame: u16);

    /// Read the current status flags
    fn status(&self) -> SpiStatus;
}

/// Spin until `ready` returns true
///
/// Replacement for the hardware busy-wait loops. There is no timeout: the
/// peripheral always drains eventually, and a stuck bus is unobservable.
pub fn spin_until<F: FnMut() -> bool>(mut ready: F) {
    while !ready() {
        core::hint::spin_loop();
    }
}

/// SPI configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpiConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
    /// Clock polarity and phase
    pub mode: Mode,
    /// Bit order on the wire
    pub bit_order: BitOrder,
}

impl Default for SpiConfig {
    fn default() -> Self {
        Self {
            frequency: 2_000_000, // 2 MHz
            mode: Mode::Mode0,
            bit_order: BitOrder::MsbFirst,
        }
    }
}

/// SPI clock mode (CPOL, CPHA)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// Mode 0: CPOL=0, CPHA=0
    #[default]
    Mode0,
    /// Mode 1: CPOL=0, CPHA=1
    Mode1,
    /// Mode 2: CPOL=1, CPHA=0
    Mode2,
    /// Mode 3: CPOL=1, CPHA=1
    Mode3,
}

impl Mode {
    /// Mode from its conventional number (0-3)
    pub const fn from_number(n: u8) -> Option<Self> {
        match n {
            0 => Some(Mode::Mode0),
            1 => Some(Mode::Mode1),
            2 => Some(Mode::Mode2),
            3 => Some(Mode::Mode3),
            _ => None,
        }
    }
}

/// Bit order on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BitOrder {
    /// Most significant bit first (MAX7219 expects this)
    #[default]
    MsbFirst,
    /// Least significant bit first
    LsbFirst,
}
