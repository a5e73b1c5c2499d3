//! Embedded configuration
//!
//! Falls back to built-in defaults if the embedded file does not parse.
//! build.rs rejects a bad `matrix.toml`, so the fallback only matters when
//! the two validators disagree.

use defmt::*;

use ledmatrix_core::config::{parse_config, DeviceConfig, PinId};

/// Embedded configuration (compiled into firmware)
/// Edit matrix.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../../matrix.toml");

/// Slave-select pin wired in `main`
pub const BOARD_CHIP_SELECT: PinId = PinId::new('A', 4);

/// Parse the embedded configuration
pub fn load_config() -> DeviceConfig {
    let config = match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Loaded matrix.toml");
            config
        }
        Err(e) => {
            warn!("matrix.toml rejected ({}), using defaults", e);
            DeviceConfig::default()
        }
    };

    // Peripherals are typed, so the pin is fixed at compile time
    if config.chip_select != BOARD_CHIP_SELECT {
        warn!(
            "matrix.toml selects {}, but the board drives {}",
            config.chip_select, BOARD_CHIP_SELECT
        );
    }

    info!(
        "SPI {} Hz {}, intensity {}, scan limit {}, demo {}",
        config.spi.frequency,
        config.spi.mode,
        config.display.intensity,
        config.display.scan_limit,
        config.demo.pattern
    );

    config
}
