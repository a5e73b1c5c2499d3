//! Configuration types and parsing
//!
//! The device configuration replaces the compile-time register constants
//! of a bare-metal build: bus speed, chip-select line, register map, display
//! settings and demo timing all live in [`DeviceConfig`].

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use types::*;
