//! Device configuration types
//!
//! Bus parameters, register addresses and timings are fields rather than
//! constants. Defaults describe a MAX7219 on SPI1 of an STM32F4 with CS on
//! PA4.

use ledmatrix_hal::spi::SpiConfig;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::bitmap::ROWS;
use crate::demo::DemoPattern;

/// Highest intensity level the driver chip accepts
pub const MAX_INTENSITY: u8 = 0x0F;

/// Chip-select pin identity, e.g. `PA4`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinId {
    /// GPIO port letter ('A'..='K')
    pub port: char,
    /// Pin number within the port (0-15)
    pub pin: u8,
}

impl PinId {
    /// Create a pin identity
    pub const fn new(port: char, pin: u8) -> Self {
        Self { port, pin }
    }

    /// Parse a pin string from config
    ///
    /// Supports `"PA4"` style names, case-insensitive on the port letter.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let rest = s.strip_prefix('P').or_else(|| s.strip_prefix('p'))?;

        let mut chars = rest.chars();
        let port = chars.next()?.to_ascii_uppercase();
        if !('A'..='K').contains(&port) {
            return None;
        }

        let pin: u8 = chars.as_str().parse().ok()?;
        if pin > 15 {
            return None;
        }

        Some(Self { port, pin })
    }
}

impl Default for PinId {
    fn default() -> Self {
        Self::new('A', 4)
    }
}

/// Register addresses of the matrix driver chip
///
/// Defaults are the MAX7219 map. Row data lives at `digit0 + row - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RegisterMap {
    pub noop: u8,
    /// Register for row 1
    pub digit0: u8,
    pub decode_mode: u8,
    pub intensity: u8,
    pub scan_limit: u8,
    pub shutdown: u8,
    pub display_test: u8,
}

impl Default for RegisterMap {
    fn default() -> Self {
        Self {
            noop: 0x00,
            digit0: 0x01,
            decode_mode: 0x09,
            intensity: 0x0A,
            scan_limit: 0x0B,
            shutdown: 0x0C,
            display_test: 0x0F,
        }
    }
}

impl RegisterMap {
    /// Register address for a 1-based row
    ///
    /// `None` for row 0 or when the address would pass 0xFF.
    pub const fn row(&self, row: u8) -> Option<u8> {
        match row.checked_sub(1) {
            Some(offset) => self.digit0.checked_add(offset),
            None => None,
        }
    }

    /// Whether every row 1..=8 has an address
    pub const fn rows_fit(&self) -> bool {
        self.row(ROWS).is_some()
    }
}

/// Display settings applied during initialization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Brightness level (0-15)
    pub intensity: u8,
    /// Number of rows actively scanned (1-8)
    pub scan_limit: u8,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            intensity: 0x02, // 5/32 duty
            scan_limit: ROWS,
        }
    }
}

/// Demo animation timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DemoConfig {
    pub pattern: DemoPattern,
    /// Delay after each reveal stage
    pub step_ms: u32,
    /// How long the full pattern and the blank screen are held
    pub hold_ms: u32,
    /// Pause at the end of a cycle
    pub blank_ms: u32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            pattern: DemoPattern::Rows,
            step_ms: 500,
            hold_ms: 500,
            blank_ms: 1000,
        }
    }
}

/// Complete device configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeviceConfig {
    pub spi: SpiConfig,
    pub chip_select: PinId,
    pub display: DisplayConfig,
    pub registers: RegisterMap,
    pub demo: DemoConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pin() {
        assert_eq!(PinId::parse("PA4"), Some(PinId::new('A', 4)));
        assert_eq!(PinId::parse(" pb15 "), Some(PinId::new('B', 15)));
        assert_eq!(PinId::parse("PA16"), None);
        assert_eq!(PinId::parse("PZ1"), None);
        assert_eq!(PinId::parse("A4"), None);
        assert_eq!(PinId::parse("P"), None);
    }

    #[test]
    fn test_row_registers() {
        let map = RegisterMap::default();
        assert_eq!(map.row(1), Some(0x01));
        assert_eq!(map.row(8), Some(0x08));
        assert_eq!(map.row(0), None);
        assert!(map.rows_fit());
    }

    #[test]
    fn test_row_registers_do_not_wrap() {
        let map = RegisterMap {
            digit0: 0xFA,
            ..RegisterMap::default()
        };
        assert_eq!(map.row(6), Some(0xFF));
        assert_eq!(map.row(7), None);
        assert_eq!(map.row(8), None);
        assert!(!map.rows_fit());

        let edge = RegisterMap {
            digit0: 0xF8,
            ..RegisterMap::default()
        };
        assert_eq!(edge.row(8), Some(0xFF));
        assert!(edge.rows_fit());
    }

    #[test]
    fn test_defaults_match_board() {
        let config = DeviceConfig::default();
        assert_eq!(config.spi.frequency, 2_000_000);
        assert_eq!(config.chip_select, PinId::new('A', 4));
        assert_eq!(config.display.intensity, 2);
        assert_eq!(config.display.scan_limit, 8);
    }
}
