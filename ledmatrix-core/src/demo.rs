//! Demonstration animation as a pure step sequence
//!
//! The demo never touches a bus. It yields [`DemoStep`]s that a runner
//! (see `ledmatrix-drivers::demo`) executes against a driver and a delay.
//! One pass of a [`DemoSequence`] is one cycle of the animation; the
//! firmware simply starts a new sequence when the previous one ends.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::bitmap::ROWS;
use crate::config::DemoConfig;

/// Heart outline used by the demo, as (x, y) pairs
pub const HEART: [(u8, u8); 16] = [
    (1, 5),
    (1, 6),
    (2, 4),
    (2, 7),
    (3, 3),
    (3, 7),
    (4, 2),
    (4, 6),
    (5, 2),
    (5, 6),
    (6, 3),
    (6, 7),
    (7, 4),
    (7, 7),
    (8, 5),
    (8, 6),
];

/// Reveal style of the animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DemoPattern {
    /// Rows appear one at a time from row 1 downwards
    #[default]
    Rows,
    /// Columns appear left to right
    Columns,
}

/// One action of the demo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DemoStep {
    /// Write a single row of the pattern
    RenderRow(u8),
    /// Write all rows with columns past `col` masked off
    RenderColumnsUpTo(u8),
    /// Write the whole pattern
    RenderFull,
    /// Blank every row on the chip
    Clear,
    /// Block for this many milliseconds
    Delay(u32),
}

/// Iterator over one cycle of the demo animation
///
/// Rows cycle:
///
/// ```text
/// for i in 1..=8 { RenderRow(1..=i); Delay(step) }
/// Clear, Delay(hold), RenderFull, Delay(hold), Clear, Delay(blank)
/// ```
///
/// Columns cycle:
///
/// ```text
/// for c in 1..=8 { RenderColumnsUpTo(c); Delay(step) }
/// Delay(hold), Clear, Delay(hold), RenderFull, Delay(hold), Clear, Delay(blank)
/// ```
#[derive(Debug, Clone)]
pub struct DemoSequence {
    pattern: DemoPattern,
    step_ms: u32,
    hold_ms: u32,
    blank_ms: u32,
    /// Reveal stage, 1..=8 while revealing
    stage: u8,
    /// Next row to render within a rows stage (1-based); for columns,
    /// anything above 1 means the stage has already been rendered
    cursor: u8,
    /// Position in the closing steps once the reveal is done
    tail: u8,
}

impl DemoSequence {
    /// Start a new cycle
    pub fn new(config: &DemoConfig) -> Self {
        Self {
            pattern: config.pattern,
            step_ms: config.step_ms,
            hold_ms: config.hold_ms,
            blank_ms: config.blank_ms,
            stage: 1,
            cursor: 1,
            tail: 0,
        }
    }

    /// Total time one cycle spends in delays
    pub fn cycle_delay_ms(config: &DemoConfig) -> u32 {
        Self::new(config)
            .map(|step| match step {
                DemoStep::Delay(ms) => ms,
                _ => 0,
            })
            .sum()
    }

    fn next_reveal(&mut self) -> DemoStep {
        match self.pattern {
            DemoPattern::Rows => {
                if self.cursor <= self.stage {
                    let row = self.cursor;
                    self.cursor += 1;
                    DemoStep::RenderRow(row)
                } else {
                    self.advance_stage()
                }
            }
            DemoPattern::Columns => {
                if self.cursor <= 1 {
                    self.cursor = 2;
                    DemoStep::RenderColumnsUpTo(self.stage)
                } else {
                    self.advance_stage()
                }
            }
        }
    }

    fn advance_stage(&mut self) -> DemoStep {
        self.stage += 1;
        self.cursor = 1;
        DemoStep::Delay(self.step_ms)
    }

    fn next_tail(&mut self) -> Option<DemoStep> {
        // Columns holds the fully revealed pattern once more before blanking
        let index = match self.pattern {
            DemoPattern::Rows => self.tail,
            DemoPattern::Columns if self.tail == 0 => {
                self.tail += 1;
                return Some(DemoStep::Delay(self.hold_ms));
            }
            DemoPattern::Columns => self.tail - 1,
        };

        let step = match index {
            0 => DemoStep::Clear,
            1 => DemoStep::Delay(self.hold_ms),
            2 => DemoStep::RenderFull,
            3 => DemoStep::Delay(self.hold_ms),
            4 => DemoStep::Clear,
            5 => DemoStep::Delay(self.blank_ms),
            _ => return None,
        };
        self.tail += 1;
        Some(step)
    }
}

impl Iterator for DemoSequence {
    type Item = DemoStep;

    fn next(&mut self) -> Option<DemoStep> {
        if self.stage <= ROWS {
            Some(self.next_reveal())
        } else {
            self.next_tail()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::FrameBuffer;

    fn config(pattern: DemoPattern) -> DemoConfig {
        DemoConfig {
            pattern,
            step_ms: 500,
            hold_ms: 500,
            blank_ms: 1000,
        }
    }

    #[test]
    fn test_heart_pattern_rows() {
        let heart = FrameBuffer::from_coords(HEART).unwrap();
        assert_eq!(
            heart.as_rows(),
            &[0x00, 0x18, 0x24, 0x42, 0x81, 0x99, 0x66, 0x00]
        );
        // No coordinate repeats
        assert_eq!(heart.lit_count(), HEART.len() as u32);
    }

    #[test]
    fn test_rows_cycle_shape() {
        let steps: Vec<DemoStep> = DemoSequence::new(&config(DemoPattern::Rows)).collect();

        // 1 + 2 + ... + 8 row writes, 8 step delays, 6 closing steps
        assert_eq!(steps.len(), 36 + 8 + 6);
        assert_eq!(
            &steps[..6],
            &[
                DemoStep::RenderRow(1),
                DemoStep::Delay(500),
                DemoStep::RenderRow(1),
                DemoStep::RenderRow(2),
                DemoStep::Delay(500),
                DemoStep::RenderRow(1),
            ]
        );
        assert_eq!(
            &steps[steps.len() - 6..],
            &[
                DemoStep::Clear,
                DemoStep::Delay(500),
                DemoStep::RenderFull,
                DemoStep::Delay(500),
                DemoStep::Clear,
                DemoStep::Delay(1000),
            ]
        );
    }

    #[test]
    fn test_rows_last_stage_renders_every_row() {
        let steps: Vec<DemoStep> = DemoSequence::new(&config(DemoPattern::Rows)).collect();
        let last_stage = &steps[36 + 7 - 8..36 + 7];
        for (i, step) in last_stage.iter().enumerate() {
            assert_eq!(*step, DemoStep::RenderRow(i as u8 + 1));
        }
    }

    #[test]
    fn test_columns_cycle_shape() {
        let steps: Vec<DemoStep> = DemoSequence::new(&config(DemoPattern::Columns)).collect();

        assert_eq!(steps.len(), 16 + 7);
        for col in 1..=8u8 {
            let i = (col as usize - 1) * 2;
            assert_eq!(steps[i], DemoStep::RenderColumnsUpTo(col));
            assert_eq!(steps[i + 1], DemoStep::Delay(500));
        }
        assert_eq!(
            &steps[16..],
            &[
                DemoStep::Delay(500),
                DemoStep::Clear,
                DemoStep::Delay(500),
                DemoStep::RenderFull,
                DemoStep::Delay(500),
                DemoStep::Clear,
                DemoStep::Delay(1000),
            ]
        );
    }

    #[test]
    fn test_cycle_delay() {
        assert_eq!(
            DemoSequence::cycle_delay_ms(&config(DemoPattern::Rows)),
            8 * 500 + 500 + 500 + 1000
        );
        assert_eq!(
            DemoSequence::cycle_delay_ms(&config(DemoPattern::Columns)),
            8 * 500 + 500 + 500 + 500 + 1000
        );
    }

    #[test]
    fn test_sequence_is_fused() {
        let mut seq = DemoSequence::new(&config(DemoPattern::Columns));
        for _ in seq.by_ref() {}
        assert_eq!(seq.next(), None);
        assert_eq!(seq.next(), None);
    }
}
