//! ledmatrix Hardware Abstraction Layer
//!
//! This crate defines the narrow hardware seams the matrix driver depends on.
//! Chip-specific crates (or host test doubles) implement them, so the same
//! driver code runs against real registers, an `embedded-hal` bus, or a
//! recording mock.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (ledmatrix-firmware, demo) │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  ledmatrix-drivers (MAX7219, render)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  ledmatrix-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  ledmatrix-hal-stm32f4 / host doubles   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`spi::SerialBus`] - One select-bracketed 16-bit transaction, step by step
//! - [`spi::SpiPeripheral`] - Register-level data/status access for polled buses
//! - [`gpio::OutputPin`] - Chip-select and other digital outputs
//! - [`delay::DelayMs`] - Blocking millisecond delay

#![no_std]
#![deny(unsafe_code)]

pub mod delay;
pub mod gpio;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use delay::DelayMs;
pub use gpio::OutputPin;
pub use spi::{SerialBus, SpiPeripheral, SpiStatus};
