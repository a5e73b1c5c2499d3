//! Test doubles shared by the driver tests

use ledmatrix_hal::{DelayMs, SerialBus};

/// One observed bus step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusEvent {
    Select,
    Write(u16),
    Wait,
    Deselect,
}

/// Bus that records every step instead of driving hardware
#[derive(Debug, Default)]
pub struct RecordingBus {
    pub events: Vec<BusEvent>,
    /// Make `write_frame` fail
    pub fail_writes: bool,
}

impl RecordingBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames of all transactions, checking each one is well formed
    ///
    /// Panics unless the log is an exact repetition of
    /// `Select, Write, Wait, Deselect`.
    pub fn transactions(&self) -> Vec<u16> {
        assert_eq!(self.events.len() % 4, 0, "partial transaction");
        self.events
            .chunks(4)
            .map(|chunk| match chunk {
                [BusEvent::Select, BusEvent::Write(frame), BusEvent::Wait, BusEvent::Deselect] => {
                    *frame
                }
                other => panic!("malformed transaction: {:?}", other),
            })
            .collect()
    }

    /// Transactions split into (register, value)
    pub fn writes(&self) -> Vec<(u8, u8)> {
        self.transactions()
            .into_iter()
            .map(|frame| ((frame >> 8) as u8, frame as u8))
            .collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl SerialBus for RecordingBus {
    type Error = ();

    fn select(&mut self) -> Result<(), ()> {
        self.events.push(BusEvent::Select);
        Ok(())
    }

    fn write_frame(&mut self, frame: u16) -> Result<(), ()> {
        if self.fail_writes {
            return Err(());
        }
        self.events.push(BusEvent::Write(frame));
        Ok(())
    }

    fn wait_complete(&mut self) -> Result<(), ()> {
        self.events.push(BusEvent::Wait);
        Ok(())
    }

    fn deselect(&mut self) -> Result<(), ()> {
        self.events.push(BusEvent::Deselect);
        Ok(())
    }
}

/// Delay that only records the requested durations
#[derive(Debug, Default)]
pub struct RecordingDelay {
    pub calls: Vec<u32>,
}

impl RecordingDelay {
    pub fn total_ms(&self) -> u32 {
        self.calls.iter().sum()
    }
}

impl DelayMs for RecordingDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.calls.push(ms);
    }
}
