//! Grid geometry of the byte window.

/// Rows and columns of the hex grid.
///
/// Both dimensions are at least 1. `num_bytes` is the window size requested
/// on every fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    rows: u16,
    cols: u16,
}

/// Error returned when a geometry dimension is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Geometry must have at least one row and one column (got {rows}x{cols})")]
pub struct InvalidGeometry {
    /// Requested rows.
    pub rows: u16,
    /// Requested columns.
    pub cols: u16,
}

impl Geometry {
    /// Smart constructor that rejects zero rows or columns.
    pub fn new(rows: u16, cols: u16) -> Result<Self, InvalidGeometry> {
        if rows == 0 || cols == 0 {
            Err(InvalidGeometry { rows, cols })
        } else {
            Ok(Self { rows, cols })
        }
    }

    /// Number of rows in the window.
    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Number of bytes per row.
    pub fn cols(&self) -> u16 {
        self.cols
    }

    /// Bytes in one full window (`rows * cols`).
    pub fn num_bytes(&self) -> usize {
        usize::from(self.rows) * usize::from(self.cols)
    }

    /// Row delta of a chunk scroll. Leaves one row of overlap with the previous window.
    pub fn chunk_rows(&self) -> u16 {
        self.rows - 1
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self { rows: 20, cols: 20 }
    }
}
