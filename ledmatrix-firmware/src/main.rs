//! ledmatrix - MAX7219 8x8 LED matrix demo firmware
//!
//! Drives a MAX7219 on SPI1 of an STM32F411 (NUCLEO-F411RE) from the
//! 16 MHz HSI:
//!
//! | Signal | Pin |
//! |--------|-----|
//! | SCK    | PA5 |
//! | MOSI   | PA7 |
//! | CS     | PA4 |
//!
//! After initializing the chip it plays the heart animation forever.

#![no_std]
#![no_main]

mod config;

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::gpio::{Level, Output, Speed};
use embassy_stm32::spi::Spi;
use embassy_time::{Delay, Timer};
use {defmt_rtt as _, panic_probe as _};

use ledmatrix_core::bitmap::FrameBuffer;
use ledmatrix_core::demo::{DemoSequence, HEART};
use ledmatrix_drivers::demo::run_cycle;
use ledmatrix_drivers::{HalDelay, Max7219, SpiDeviceBus};
use ledmatrix_hal_stm32f4::{embassy_config, ChipSelect, SpiBusError};

use crate::config::load_config;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("ledmatrix firmware starting...");

    // Default clocks run the core from the HSI
    let p = embassy_stm32::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();

    // Transmit-only: the chip has no data output
    let spi = Spi::new_blocking_txonly(p.SPI1, p.PA5, p.PA7, embassy_config(&config.spi));
    let cs = ChipSelect::new(Output::new(p.PA4, Level::High, Speed::VeryHigh));
    let mut matrix = Max7219::from_config(SpiDeviceBus::new(spi, cs), &config);

    if let Err(e) = matrix.init() {
        error!("MAX7219 init failed: {}", e.map_bus(SpiBusError::from));
        return;
    }
    info!("MAX7219 initialized");

    let heart = match FrameBuffer::from_coords(HEART) {
        Ok(buffer) => buffer,
        Err(e) => {
            error!("Demo pattern rejected: {}", e);
            return;
        }
    };
    info!("Heart pattern: {} pixels lit", heart.lit_count());
    debug!("Heart rows: {:#04x}", heart.as_rows());

    let mut delay = HalDelay(Delay);
    let mut cycles: u32 = 0;

    loop {
        match run_cycle(&mut matrix, &heart, DemoSequence::new(&config.demo), &mut delay) {
            Ok(()) => {
                cycles = cycles.wrapping_add(1);
                trace!("Demo cycle {} complete", cycles);
            }
            Err(e) => {
                warn!("Demo cycle aborted: {}", e.map_bus(SpiBusError::from));
                // Back off before the next cycle
                Timer::after_millis(config.demo.blank_ms as u64).await;
            }
        }
    }
}
