//! Row-based scroll position

use crate::model::{Geometry, KeyAction};

/// Scroll position of the byte window, in rows.
///
/// # Invariant
/// `0 <= current_row <= max_row`, where
/// `max_row = max(0, ceil(file_len / cols) - rows)`.
/// All constructors clamp, so the invariant cannot be broken from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollState {
    current_row: u64,
    max_row: u64,
}

/// Enablement of the scroll controls for one rendered window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollButtons {
    /// True when the window is at row 0.
    pub up_disabled: bool,
    /// True when the window is at `max_row`.
    pub down_disabled: bool,
}

/// Last row the window may start at for a file of `file_len` bytes.
pub fn max_row(file_len: u64, geometry: Geometry) -> u64 {
    file_len
        .div_ceil(u64::from(geometry.cols()))
        .saturating_sub(u64::from(geometry.rows()))
}

impl ScrollState {
    /// Create a scroll state, clamping `current_row` into `[0, max_row]`.
    pub fn new(current_row: u64, max_row: u64) -> Self {
        Self {
            current_row: current_row.min(max_row),
            max_row,
        }
    }

    /// Top of a freshly selected file.
    pub fn for_file(file_len: u64, geometry: Geometry) -> Self {
        Self::new(0, max_row(file_len, geometry))
    }

    /// Row at the top of the window.
    pub fn current_row(&self) -> u64 {
        self.current_row
    }

    /// Largest valid `current_row`.
    pub fn max_row(&self) -> u64 {
        self.max_row
    }

    /// Byte offset of the window start, or `None` if it does not fit in a `u64`.
    pub fn offset(&self, geometry: Geometry) -> Option<u64> {
        self.current_row.checked_mul(u64::from(geometry.cols()))
    }

    /// Position after moving by `delta` rows, clamped to the valid range.
    ///
    /// Returns `None` when the clamped row equals the current row, i.e. the
    /// scroll is a no-op and nothing should be fetched.
    pub fn scrolled_by(&self, delta: i64) -> Option<Self> {
        let target = (i128::from(self.current_row) + i128::from(delta))
            .clamp(0, i128::from(self.max_row));
        let target = u64::try_from(target).unwrap_or(self.max_row);

        if target == self.current_row {
            None
        } else {
            Some(Self::new(target, self.max_row))
        }
    }

    /// Position after a geometry change: same row, new bounds.
    pub fn resized(&self, file_len: u64, geometry: Geometry) -> Self {
        Self::new(self.current_row, max_row(file_len, geometry))
    }

    /// Scroll control enablement for this position.
    pub fn buttons(&self) -> ScrollButtons {
        ScrollButtons {
            up_disabled: self.current_row == 0,
            down_disabled: self.current_row == self.max_row,
        }
    }
}

/// Row delta for a scroll action, or `None` for non-scroll actions.
///
/// Single-row actions move by one; chunk actions by `rows - 1`; top and bottom
/// saturate and are clamped by [`ScrollState::scrolled_by`].
pub fn delta_for(action: KeyAction, geometry: Geometry) -> Option<i64> {
    let chunk = i64::from(geometry.chunk_rows());
    match action {
        KeyAction::ScrollUp => Some(-1),
        KeyAction::ScrollDown => Some(1),
        KeyAction::ChunkUp => Some(-chunk),
        KeyAction::ChunkDown => Some(chunk),
        KeyAction::ScrollToTop => Some(i64::MIN),
        KeyAction::ScrollToBottom => Some(i64::MAX),
        _ => None,
    }
}
