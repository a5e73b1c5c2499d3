//! Configuration loading
//!
//! The board config is `matrix.toml`, embedded at compile time and parsed
//! by the no_std parser in `ledmatrix-core`.

pub mod loader;

pub use loader::{load_config, BOARD_CHIP_SELECT};
