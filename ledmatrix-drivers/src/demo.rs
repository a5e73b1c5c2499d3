//! Demo runner
//!
//! Executes the [`DemoStep`]s produced by a [`DemoSequence`] against a
//! [`Max7219`] and a millisecond delay.

use ledmatrix_core::bitmap::FrameBuffer;
use ledmatrix_core::demo::{DemoSequence, DemoStep};
use ledmatrix_hal::{DelayMs, SerialBus};

use crate::max7219::{MatrixError, Max7219};

/// Execute one step
pub fn execute_step<B, D>(
    matrix: &mut Max7219<B>,
    pattern: &FrameBuffer,
    step: DemoStep,
    delay: &mut D,
) -> Result<(), MatrixError<B::Error>>
where
    B: SerialBus,
    D: DelayMs,
{
    match step {
        DemoStep::RenderRow(row) => matrix.render_row(pattern, row),
        DemoStep::RenderColumnsUpTo(col) => matrix.render_columns_up_to(pattern, col),
        DemoStep::RenderFull => matrix.render_full(pattern),
        DemoStep::Clear => matrix.clear(),
        DemoStep::Delay(ms) => {
            delay.delay_ms(ms);
            Ok(())
        }
    }
}

/// Play one full cycle, stopping at the first error
pub fn run_cycle<B, D>(
    matrix: &mut Max7219<B>,
    pattern: &FrameBuffer,
    sequence: DemoSequence,
    delay: &mut D,
) -> Result<(), MatrixError<B::Error>>
where
    B: SerialBus,
    D: DelayMs,
{
    for step in sequence {
        execute_step(matrix, pattern, step, delay)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{RecordingBus, RecordingDelay};
    use ledmatrix_core::config::{DemoConfig, DeviceConfig};
    use ledmatrix_core::demo::{DemoPattern, HEART};

    fn heart() -> FrameBuffer {
        FrameBuffer::from_coords(HEART).unwrap()
    }

    fn play(pattern: DemoPattern) -> (RecordingBus, RecordingDelay) {
        let config = DemoConfig {
            pattern,
            ..DemoConfig::default()
        };
        let mut matrix = Max7219::from_config(RecordingBus::new(), &DeviceConfig::default());
        let mut delay = RecordingDelay::default();

        run_cycle(&mut matrix, &heart(), DemoSequence::new(&config), &mut delay).unwrap();
        (matrix.release(), delay)
    }

    #[test]
    fn test_rows_cycle() {
        let (bus, delay) = play(DemoPattern::Rows);

        // 36 row writes, 3 x 8 for clear, full, clear
        let writes = bus.writes();
        assert_eq!(writes.len(), 36 + 24);
        assert_eq!(&writes[..3], &[(1, 0x00), (1, 0x00), (2, 0x18)]);

        assert_eq!(delay.calls.len(), 8 + 3);
        assert_eq!(delay.total_ms(), 8 * 500 + 500 + 500 + 1000);
    }

    #[test]
    fn test_columns_cycle_reveals_left_to_right() {
        let (bus, delay) = play(DemoPattern::Columns);

        let writes = bus.writes();
        assert_eq!(writes.len(), 8 * 8 + 24);

        // Row 5 of the heart is 0x81: column 1 shows first, column 8 last
        let row5: Vec<u8> = writes[..64]
            .chunks(8)
            .map(|stage| stage[4].1)
            .collect();
        assert_eq!(row5, vec![0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x81]);

        assert_eq!(delay.total_ms(), 8 * 500 + 3 * 500 + 1000);
    }

    #[test]
    fn test_cycle_ends_blank() {
        let (bus, _) = play(DemoPattern::Rows);
        let writes = bus.writes();
        let tail = &writes[writes.len() - 8..];
        assert!(tail.iter().all(|&(_, bits)| bits == 0x00));
    }

    #[test]
    fn test_delay_step_has_no_bus_traffic() {
        let mut matrix = Max7219::from_config(RecordingBus::new(), &DeviceConfig::default());
        let mut delay = RecordingDelay::default();

        execute_step(&mut matrix, &heart(), DemoStep::Delay(250), &mut delay).unwrap();

        assert!(matrix.bus().events.is_empty());
        assert_eq!(delay.calls, vec![250]);
    }

    #[test]
    fn test_bus_error_stops_cycle() {
        let mut bus = RecordingBus::new();
        bus.fail_writes = true;
        let mut matrix = Max7219::from_config(bus, &DeviceConfig::default());
        let mut delay = RecordingDelay::default();

        let sequence = DemoSequence::new(&DemoConfig::default());
        assert_eq!(
            run_cycle(&mut matrix, &heart(), sequence, &mut delay),
            Err(MatrixError::Bus(()))
        );
        assert!(delay.calls.is_empty());
    }
}
