//! STM32F4-specific HAL for the ledmatrix firmware
//!
//! Glue between embassy-stm32 and the `ledmatrix-hal` traits. Supported
//! chips:
//!
//! - STM32F411RE (NUCLEO-F411RE)
//! - STM32F401RE
//!
//! # Features
//!
//! - `stm32f411re` / `stm32f401re` - Select the chip
//! - `defmt` - Enable debug formatting support
//!
//! # Usage
//!
//! The firmware creates embassy's blocking SPI with [`spi::embassy_config`]
//! and wraps the slave-select output in [`gpio::ChipSelect`]; both then go
//! into `ledmatrix_drivers::SpiDeviceBus`.

#![no_std]

pub mod gpio;
pub mod spi;

pub use gpio::ChipSelect;
pub use spi::{embassy_config, SpiBusError};
