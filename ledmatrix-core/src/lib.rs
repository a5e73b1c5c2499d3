//! Board-agnostic core logic for the LED matrix driver stack
//!
//! This crate contains everything that does not touch a bus:
//!
//! - Frame buffer model and (x, y) coordinate translation
//! - Device configuration types and the `matrix.toml` parser
//! - The demonstration animation as a pure step sequence

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod bitmap;
pub mod config;
pub mod demo;

pub use bitmap::{translate, BitmapError, FrameBuffer, Pixel};
pub use config::DeviceConfig;
pub use demo::{DemoPattern, DemoSequence, DemoStep};
