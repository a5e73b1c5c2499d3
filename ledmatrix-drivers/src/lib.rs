//! Hardware driver implementations
//!
//! This crate turns the bus traits of `ledmatrix-hal` into a working
//! display stack:
//!
//! - Serial transaction primitive (select, write, wait, deselect)
//! - Bus adapters (`embedded-hal` 1.0 SPI, register-level polled SPI)
//! - MAX7219 register protocol, initialization and render operations
//! - Runner that plays the demo sequence from `ledmatrix-core`

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod bus;
pub mod demo;
pub mod max7219;
pub mod transaction;

#[cfg(test)]
pub(crate) mod mock;

pub use bus::{HalDelay, PolledBus, SpiDeviceBus};
pub use max7219::{Command, MatrixError, Max7219, RegisterFrame};
pub use transaction::transmit;
