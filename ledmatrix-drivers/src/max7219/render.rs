//! Render operations
//!
//! Push a [`FrameBuffer`] to the chip. The buffer is only ever read: every
//! masking step works on a copy of the row byte, so a caller can reveal the
//! same pattern again and again from its stored original.

use ledmatrix_core::bitmap::{FrameBuffer, ROWS};
use ledmatrix_hal::SerialBus;

use super::{MatrixError, Max7219};

impl<B: SerialBus> Max7219<B> {
    /// Write rows 1..=8 in ascending order, one transaction each
    pub fn render_full(&mut self, buffer: &FrameBuffer) -> Result<(), MatrixError<B::Error>> {
        self.check_row_registers()?;
        for (row, bits) in buffer.rows() {
            self.write_row(row, bits)?;
        }
        Ok(())
    }

    /// Write a single row (1..=8)
    pub fn render_row(
        &mut self,
        buffer: &FrameBuffer,
        row: u8,
    ) -> Result<(), MatrixError<B::Error>> {
        let bits = buffer.row(row)?;
        self.write_row(row, bits)
    }

    /// Write every row with columns past `col` switched off
    ///
    /// `col = 0` blanks every row, `col >= 8` is the same as
    /// [`Max7219::render_full`].
    pub fn render_columns_up_to(
        &mut self,
        buffer: &FrameBuffer,
        col: u8,
    ) -> Result<(), MatrixError<B::Error>> {
        self.check_row_registers()?;
        for row in 1..=ROWS {
            let bits = buffer.masked_row(row, col)?;
            self.write_row(row, bits)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::RecordingBus;
    use ledmatrix_core::bitmap::{translate, BitmapError};
    use ledmatrix_core::config::{DisplayConfig, RegisterMap};
    use proptest::prelude::*;

    fn driver() -> Max7219<RecordingBus> {
        Max7219::new(
            RecordingBus::new(),
            RegisterMap::default(),
            DisplayConfig::default(),
        )
    }

    fn scenario() -> FrameBuffer {
        let mut buffer = FrameBuffer::new();
        translate([(1, 5), (1, 6), (2, 4), (2, 7)], &mut buffer).unwrap();
        buffer
    }

    #[test]
    fn test_render_full_order() {
        let mut matrix = driver();
        matrix.render_full(&scenario()).unwrap();

        assert_eq!(
            matrix.bus().writes(),
            vec![
                (1, 0x00),
                (2, 0x00),
                (3, 0x00),
                (4, 0x02),
                (5, 0x01),
                (6, 0x01),
                (7, 0x02),
                (8, 0x00),
            ]
        );
    }

    #[test]
    fn test_render_row_writes_exactly_one_row() {
        let mut matrix = driver();
        matrix.render_row(&scenario(), 4).unwrap();
        assert_eq!(matrix.bus().writes(), vec![(4, 0x02)]);
    }

    #[test]
    fn test_render_row_out_of_range() {
        let mut matrix = driver();
        assert_eq!(
            matrix.render_row(&scenario(), 9),
            Err(MatrixError::Bitmap(BitmapError::InvalidRow(9)))
        );
        assert_eq!(
            matrix.render_row(&scenario(), 0),
            Err(MatrixError::Bitmap(BitmapError::InvalidRow(0)))
        );
        assert!(matrix.bus().events.is_empty());
    }

    #[test]
    fn test_overflowing_register_map_renders_nothing() {
        let registers = RegisterMap {
            digit0: 0xFA,
            ..RegisterMap::default()
        };
        let mut matrix = Max7219::new(RecordingBus::new(), registers, DisplayConfig::default());
        let buffer = FrameBuffer::from_rows([0xFF; 8]);

        assert_eq!(
            matrix.render_full(&buffer),
            Err(MatrixError::RowAddressOverflow(8))
        );
        assert_eq!(
            matrix.render_columns_up_to(&buffer, 4),
            Err(MatrixError::RowAddressOverflow(8))
        );
        assert_eq!(
            matrix.render_row(&buffer, 8),
            Err(MatrixError::RowAddressOverflow(8))
        );
        assert!(matrix.bus().events.is_empty());

        // Rows that still have an address render normally
        matrix.render_row(&buffer, 6).unwrap();
        assert_eq!(matrix.bus().writes(), vec![(0xFF, 0xFF)]);
    }

    #[test]
    fn test_render_columns_reveal() {
        let buffer = FrameBuffer::from_rows([0xFF; 8]);
        let mut matrix = driver();

        matrix.render_columns_up_to(&buffer, 3).unwrap();
        assert!(matrix.bus().writes().iter().all(|&(_, bits)| bits == 0x07));

        // A wider window after a narrower one still starts from the full pattern
        matrix.bus_mut().clear();
        matrix.render_columns_up_to(&buffer, 5).unwrap();
        assert!(matrix.bus().writes().iter().all(|&(_, bits)| bits == 0x1F));

        assert_eq!(buffer, FrameBuffer::from_rows([0xFF; 8]));
    }

    #[test]
    fn test_clear_then_render_blank() {
        let expected: Vec<(u8, u8)> = (1..=8).map(|row| (row, 0x00)).collect();

        let mut matrix = driver();
        matrix.clear().unwrap();
        assert_eq!(matrix.bus().writes(), expected);

        matrix.bus_mut().clear();
        matrix.render_full(&FrameBuffer::new()).unwrap();
        assert_eq!(matrix.bus().writes(), expected);
    }

    proptest! {
        #[test]
        fn prop_full_reveal_matches_render_full(rows in any::<[u8; 8]>(), col in 8u8..=255) {
            let buffer = FrameBuffer::from_rows(rows);

            let mut full = driver();
            full.render_full(&buffer).unwrap();

            let mut revealed = driver();
            revealed.render_columns_up_to(&buffer, col).unwrap();

            prop_assert_eq!(full.bus().events.clone(), revealed.bus().events.clone());
        }

        #[test]
        fn prop_zero_reveal_is_blank(rows in any::<[u8; 8]>()) {
            let mut matrix = driver();
            matrix.render_columns_up_to(&FrameBuffer::from_rows(rows), 0).unwrap();

            let writes = matrix.bus().writes();
            prop_assert_eq!(writes.len(), 8);
            for (i, &(addr, bits)) in writes.iter().enumerate() {
                prop_assert_eq!(addr, i as u8 + 1);
                prop_assert_eq!(bits, 0);
            }
        }

        #[test]
        fn prop_reveal_keeps_only_leading_columns(rows in any::<[u8; 8]>(), col in 0u8..=8) {
            let mut matrix = driver();
            matrix.render_columns_up_to(&FrameBuffer::from_rows(rows), col).unwrap();

            for (&(_, bits), &original) in matrix.bus().writes().iter().zip(rows.iter()) {
                for x in 1..=8u8 {
                    let lit = bits & (1 << (x - 1)) != 0;
                    let was_lit = original & (1 << (x - 1)) != 0;
                    prop_assert_eq!(lit, was_lit && x <= col);
                }
            }
        }

        #[test]
        fn prop_every_render_is_well_formed(rows in any::<[u8; 8]>(), col in 0u8..=8, row in 1u8..=8) {
            let buffer = FrameBuffer::from_rows(rows);
            let mut matrix = driver();
            matrix.render_full(&buffer).unwrap();
            matrix.render_row(&buffer, row).unwrap();
            matrix.render_columns_up_to(&buffer, col).unwrap();

            // Panics on any interleaved or partial transaction
            prop_assert_eq!(matrix.bus().transactions().len(), 8 + 1 + 8);
        }
    }
}
