//! 8x8 frame buffer and coordinate translation
//!
//! The buffer holds one byte per row. Bit `k` of a row byte lights column
//! `k + 1` (LSB = column 1), which is exactly the digit-register format of
//! the MAX7219 in no-decode mode.
//!
//! Rows and columns are 1-based at the public boundary to match the chip's
//! row addresses (digit registers 1..=8). Storage is a plain `[u8; 8]`.
//!
//! ```text
//!            x = 1 ............ 8
//!          ┌───────────────────────┐
//!  y = 1   │ bit0 bit1 ...    bit7 │  -> row register 1
//!   ...    │                       │
//!  y = 8   │ bit0 bit1 ...    bit7 │  -> row register 8
//!          └───────────────────────┘
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of rows in the matrix
pub const ROWS: u8 = 8;

/// Number of columns in the matrix
pub const COLS: u8 = 8;

/// Column to bitmask table (x = 1 -> bit 0 ... x = 8 -> bit 7)
const COLUMN_BITS: [u8; COLS as usize] = [0x01, 0x02, 0x04, 0x08, 0x10, 0x20, 0x40, 0x80];

/// Errors from bitmap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitmapError {
    /// x or y outside 1..=8
    InvalidCoordinate { x: u8, y: u8 },
    /// Row outside 1..=8
    InvalidRow(u8),
}

/// A single lit cell (x = column, y = row, both 1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pixel {
    pub x: u8,
    pub y: u8,
}

impl Pixel {
    /// Create a pixel without validating it
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Whether both coordinates are on the matrix
    pub const fn is_valid(&self) -> bool {
        self.x >= 1 && self.x <= COLS && self.y >= 1 && self.y <= ROWS
    }

    fn validate(self) -> Result<Self, BitmapError> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(BitmapError::InvalidCoordinate {
                x: self.x,
                y: self.y,
            })
        }
    }
}

impl From<(u8, u8)> for Pixel {
    fn from((x, y): (u8, u8)) -> Self {
        Self::new(x, y)
    }
}

/// Bitmask for a single column (1..=8)
pub const fn column_bit(col: u8) -> Option<u8> {
    if col >= 1 && col <= COLS {
        Some(COLUMN_BITS[(col - 1) as usize])
    } else {
        None
    }
}

/// Mask that keeps columns `1..=col` and clears the rest
///
/// `col = 0` keeps nothing; anything at or past 8 keeps every column.
pub const fn column_mask(col: u8) -> u8 {
    if col >= COLS {
        0xFF
    } else {
        ((1u16 << col) - 1) as u8
    }
}

/// 8x8 frame buffer, one byte per row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FrameBuffer {
    rows: [u8; ROWS as usize],
}

impl FrameBuffer {
    /// An all-dark buffer
    pub const fn new() -> Self {
        Self {
            rows: [0; ROWS as usize],
        }
    }

    /// Build a buffer from raw row bytes (index 0 = row 1)
    pub const fn from_rows(rows: [u8; ROWS as usize]) -> Self {
        Self { rows }
    }

    /// Build a buffer from a coordinate list
    pub fn from_coords<I>(coords: I) -> Result<Self, BitmapError>
    where
        I: IntoIterator<Item = (u8, u8)>,
    {
        let mut buffer = Self::new();
        translate(coords, &mut buffer)?;
        Ok(buffer)
    }

    /// Map a 1-based row to its storage index
    fn index(row: u8) -> Result<usize, BitmapError> {
        if row >= 1 && row <= ROWS {
            Ok((row - 1) as usize)
        } else {
            Err(BitmapError::InvalidRow(row))
        }
    }

    /// Bitmap byte for a row (1..=8)
    pub fn row(&self, row: u8) -> Result<u8, BitmapError> {
        Ok(self.rows[Self::index(row)?])
    }

    /// Replace the bitmap byte for a row (1..=8)
    pub fn set_row(&mut self, row: u8, value: u8) -> Result<(), BitmapError> {
        self.rows[Self::index(row)?] = value;
        Ok(())
    }

    /// Row byte with every column past `col` cleared
    ///
    /// Works on a copy; the stored row is never modified.
    pub fn masked_row(&self, row: u8, col: u8) -> Result<u8, BitmapError> {
        Ok(self.row(row)? & column_mask(col))
    }

    /// Light one pixel (bitwise OR, so repeated calls are idempotent)
    pub fn set(&mut self, pixel: Pixel) -> Result<(), BitmapError> {
        let pixel = pixel.validate()?;
        self.rows[(pixel.y - 1) as usize] |= COLUMN_BITS[(pixel.x - 1) as usize];
        Ok(())
    }

    /// Whether (x, y) is lit; off-matrix coordinates are never lit
    pub fn is_lit(&self, x: u8, y: u8) -> bool {
        match (column_bit(x), Self::index(y)) {
            (Some(bit), Ok(idx)) => self.rows[idx] & bit != 0,
            _ => false,
        }
    }

    /// Turn every pixel off
    pub fn clear(&mut self) {
        self.rows = [0; ROWS as usize];
    }

    /// Whether no pixel is lit
    pub fn is_blank(&self) -> bool {
        self.rows.iter().all(|&r| r == 0)
    }

    /// Number of lit pixels
    pub fn lit_count(&self) -> u32 {
        self.rows.iter().map(|r| r.count_ones()).sum()
    }

    /// Raw row bytes (index 0 = row 1)
    pub fn as_rows(&self) -> &[u8; ROWS as usize] {
        &self.rows
    }

    /// Iterate `(row_address, bitmap)` pairs for rows 1..=8 in order
    pub fn rows(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .map(|(i, &value)| (i as u8 + 1, value))
    }
}

/// Translate a coordinate list into lit pixels
///
/// Each (x, y) sets bit `x - 1` of row `y`. Translation is additive: lit
/// pixels already in `out` stay lit. If any coordinate is off the matrix the
/// call fails with [`BitmapError::InvalidCoordinate`] and `out` is left
/// exactly as it was.
pub fn translate<I>(coords: I, out: &mut FrameBuffer) -> Result<(), BitmapError>
where
    I: IntoIterator<Item = (u8, u8)>,
{
    let mut staged = *out;
    for coord in coords {
        staged.set(Pixel::from(coord))?;
    }
    *out = staged;
    Ok(())
}
