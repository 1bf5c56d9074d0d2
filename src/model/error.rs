//! Error types for hexview.
//!
//! This module defines the error taxonomy using `thiserror`. Errors compose via `?`
//! and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level application error
//!   - [`SourceError`] - Byte-range read failures (no file bound, bad offset, I/O)
//!   - [`ViewError`] - View model misuse or a failed window fetch
//!   - `std::io::Error` - Terminal failures
//!
//! # Recovery Strategy
//!
//! Fetch failures are **non-fatal**: a failed read leaves the previous scroll state and
//! rendered window in place, and the error is reported to the status bar and the log.
//! Terminal errors are fatal and propagate to `main`.

use crate::model::geometry::InvalidGeometry;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error encompassing all failure modes.
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to open or read the selected file.
    #[error("Failed to read input: {0}")]
    Source(#[from] SourceError),

    /// The view model rejected an operation or a fetch failed.
    #[error("View error: {0}")]
    View(#[from] ViewError),

    /// Terminal or TUI rendering error. Fatal.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Errors encountered when reading a byte range from the bound file.
///
/// # Recovery Patterns
///
/// - **NoFileBound**: caller read before selecting a file; nothing to display yet
/// - **InvalidOffset**: window end not representable; the request is dropped
/// - **FileNotFound**: user supplied a path that does not exist
/// - **Io**: underlying read failed after retries; the view keeps its last window
#[derive(Debug, Error)]
pub enum SourceError {
    /// A read was issued before any file was bound.
    #[error("No file bound: select a file before reading")]
    NoFileBound,

    /// The requested window `[offset, offset + size)` does not fit in a file offset.
    ///
    /// # Examples
    ///
    /// ```
    /// use hexview::model::error::SourceError;
    ///
    /// let err = SourceError::InvalidOffset { offset: u64::MAX, size: 16 };
    /// assert!(err.to_string().contains("Invalid offset"));
    /// ```
    #[error("Invalid offset {offset} for a read of {size} bytes")]
    InvalidOffset {
        /// Requested start offset.
        offset: u64,
        /// Requested size in bytes.
        size: usize,
    },

    /// The file selected by path does not exist.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The filesystem path that was not found.
        path: PathBuf,
    },

    /// The underlying read mechanism failed.
    #[error("IO error at offset {offset}: {source}")]
    Io {
        /// Start offset of the failed read.
        offset: u64,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Errors surfaced by the view model.
#[derive(Debug, Error)]
pub enum ViewError {
    /// A file was selected before rows and columns were configured.
    #[error("View is not configured: set rows and columns first")]
    Unconfigured,

    /// Scrolling or highlighting was requested before a file was loaded.
    #[error("No file loaded")]
    NotLoaded,

    /// Rows or columns were zero.
    #[error(transparent)]
    Geometry(#[from] InvalidGeometry),

    /// The window start `row * cols` does not fit in a file offset.
    #[error("Row {row} with {cols} columns is past the addressable range")]
    RowOutOfRange {
        /// Requested window row.
        row: u64,
        /// Bytes per row.
        cols: u16,
    },

    /// The window fetch failed. Scroll state is unchanged.
    #[error("Fetch failed: {0}")]
    Fetch(#[from] SourceError),
}
