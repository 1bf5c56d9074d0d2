//! Windowed file-chunk view model.
//!
//! Turns file selection, scroll and resize events into byte-range fetches, and
//! resolved fetches into [`RenderedView`]s.
//!
//! # Request discipline
//!
//! At most one fetch is outstanding. Each fetch carries a [`Ticket`] with a
//! monotonically increasing generation; issuing a new fetch supersedes the
//! previous one, whose result is discarded whenever it arrives. Scroll state is
//! only committed when the current fetch succeeds, so a failed fetch leaves the
//! last window intact.

use super::highlight::{HighlightState, HighlightTransition};
use super::legend;
use super::rendered::RenderedView;
use super::scroll::{ScrollButtons, ScrollState};
use crate::model::{ByteChunk, Geometry, SourceError, ViewError};
use crate::source::{ByteFile, ByteSource, PendingRead};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Lifecycle of a view model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No geometry yet.
    Unconfigured,
    /// Geometry set, no file loaded.
    Configured,
    /// At least one window rendered.
    Loaded,
}

/// Why a fetch was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchReason {
    /// A new file was selected.
    FileSelected,
    /// The window moved.
    Scroll,
    /// Rows or columns changed.
    Resize,
}

/// Identifies one issued fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
    row: u64,
}

impl Ticket {
    /// Monotonic request number within one view model.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Row the fetch was issued for.
    pub fn row(&self) -> u64 {
        self.row
    }
}

/// A successfully applied fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewUpdate {
    /// Glyphs to paint.
    pub view: RenderedView,
    /// What triggered the fetch.
    pub reason: FetchReason,
    /// Highlight dropped by this render; repaint it plain.
    pub cleared_highlight: Option<usize>,
}

#[derive(Debug, Clone, Copy)]
struct FetchMeta {
    ticket: Ticket,
    reason: FetchReason,
    target: ScrollState,
    geometry: Geometry,
    file_len: u64,
}

#[derive(Debug)]
struct InFlight {
    meta: FetchMeta,
    read: PendingRead,
}

/// Owns geometry, scroll and highlight state for one viewer.
#[derive(Debug)]
pub struct ViewModel {
    phase: Phase,
    geometry: Option<Geometry>,
    source: ByteSource,
    loaded: Option<Arc<dyn ByteFile>>,
    loaded_len: u64,
    scroll: ScrollState,
    highlight: HighlightState,
    generation: u64,
    pending: Option<InFlight>,
    superseded: u64,
}

impl Default for ViewModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewModel {
    /// Unconfigured view model with a default source.
    pub fn new() -> Self {
        Self::with_source(ByteSource::new())
    }

    /// Unconfigured view model reading through `source`.
    pub fn with_source(source: ByteSource) -> Self {
        Self {
            phase: Phase::Unconfigured,
            geometry: None,
            source,
            loaded: None,
            loaded_len: 0,
            scroll: ScrollState::default(),
            highlight: HighlightState::default(),
            generation: 0,
            pending: None,
            superseded: 0,
        }
    }

    /// Set rows and columns.
    ///
    /// Before a file is loaded this only records the geometry. Afterwards it is
    /// a resize: `max_row` is recomputed for the loaded file, the row is clamped,
    /// and the window is refetched. The new geometry is committed together with
    /// the scroll state when that fetch succeeds; if it fails, the previous
    /// geometry stays in effect.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::Geometry` if either dimension is zero.
    pub fn configure(&mut self, rows: u16, cols: u16) -> Result<Option<Ticket>, ViewError> {
        let geometry = Geometry::new(rows, cols)?;
        debug!(rows, cols, "View configured");

        if self.phase == Phase::Unconfigured {
            self.phase = Phase::Configured;
        }
        if self.phase != Phase::Loaded {
            self.geometry = Some(geometry);
        }

        let (reason, file_len) = match self.pending.as_ref().map(|p| p.meta) {
            Some(meta) if meta.reason == FetchReason::FileSelected => {
                (FetchReason::FileSelected, meta.file_len)
            }
            Some(meta) => (FetchReason::Resize, meta.file_len),
            None if self.phase == Phase::Loaded => (FetchReason::Resize, self.loaded_len),
            None => return Ok(None),
        };

        let target = self.latest_target().resized(file_len, geometry);
        self.issue(reason, target, geometry, file_len).map(Some)
    }

    /// Bind `file`, reset to its first row and fetch the first window.
    ///
    /// Scroll state is replaced only when the fetch succeeds. If it fails, the
    /// previously loaded file is bound again.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::Unconfigured` if no geometry has been set.
    pub fn on_file_selected(&mut self, file: Arc<dyn ByteFile>) -> Result<Ticket, ViewError> {
        let geometry = self.requested_geometry().ok_or(ViewError::Unconfigured)?;
        let file_len = file.len();
        info!(name = file.name(), len = file_len, "File selected");

        self.source.bind(file);
        let target = ScrollState::for_file(file_len, geometry);
        self.issue(FetchReason::FileSelected, target, geometry, file_len)
    }

    /// Move the window by `row_delta` rows, clamped to `[0, max_row]`.
    ///
    /// The delta applies to the most recently requested row, so rapid scrolls
    /// accumulate. Returns `Ok(None)` without fetching when the clamped row is
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::NotLoaded` before the first file selection.
    pub fn scroll_by(&mut self, row_delta: i64) -> Result<Option<Ticket>, ViewError> {
        let geometry = self.requested_geometry().ok_or(ViewError::NotLoaded)?;
        if self.phase != Phase::Loaded && self.pending.is_none() {
            return Err(ViewError::NotLoaded);
        }

        let file_len = self
            .pending
            .as_ref()
            .map_or(self.loaded_len, |in_flight| in_flight.meta.file_len);

        match self.latest_target().scrolled_by(row_delta) {
            Some(target) => self
                .issue(FetchReason::Scroll, target, geometry, file_len)
                .map(Some),
            None => {
                debug!(
                    row_delta,
                    row = self.requested_row(),
                    "Scroll clamped to no-op"
                );
                Ok(None)
            }
        }
    }

    /// Apply the outstanding fetch if it has finished. Never blocks.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::Fetch` if the current fetch failed; state is unchanged.
    pub fn poll(&mut self) -> Result<Option<ViewUpdate>, ViewError> {
        let Some(result) = self.pending.as_mut().and_then(|p| p.read.try_take()) else {
            return Ok(None);
        };
        let Some(in_flight) = self.pending.take() else {
            return Ok(None);
        };
        self.resolve(in_flight.meta, result)
    }

    /// Block until the outstanding fetch finishes, then apply it.
    ///
    /// Returns `Ok(None)` when nothing is outstanding.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::Fetch` if the current fetch failed; state is unchanged.
    pub fn wait(&mut self) -> Result<Option<ViewUpdate>, ViewError> {
        let Some(InFlight { meta, read }) = self.pending.take() else {
            return Ok(None);
        };
        let result = read.wait();
        self.resolve(meta, result)
    }

    /// Highlight `index` in both columns. The index is not bounds-checked.
    pub fn highlight(&mut self, index: usize) -> HighlightTransition {
        self.highlight.select(index)
    }

    /// Move the highlight `dx` columns and `dy` rows within a chunk of
    /// `chunk_len` bytes. With nothing highlighted, the first byte is selected.
    ///
    /// Returns `None` before geometry is configured or for an empty chunk.
    pub fn move_highlight(
        &mut self,
        dx: i64,
        dy: i64,
        chunk_len: usize,
    ) -> Option<HighlightTransition> {
        let cols = self.geometry?.cols();
        let target = self.highlight.moved(dx, dy, cols, chunk_len)?;
        Some(self.highlight.select(target))
    }

    /// Drop the highlight, returning the index to repaint plain.
    pub fn clear_highlight(&mut self) -> Option<usize> {
        self.highlight.clear()
    }

    /// Legend offsets for a window starting at `starting_row`.
    ///
    /// Empty before geometry is configured.
    pub fn legend_offsets(&self, starting_row: u64) -> Vec<u64> {
        self.geometry
            .map(|geometry| legend::legend_offsets(starting_row, geometry))
            .unwrap_or_default()
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Geometry of the committed window, or the configured one before any
    /// window has been rendered.
    pub fn geometry(&self) -> Option<Geometry> {
        self.geometry
    }

    /// Geometry of the outstanding fetch, or the committed geometry when idle.
    pub fn requested_geometry(&self) -> Option<Geometry> {
        self.pending
            .as_ref()
            .map(|in_flight| in_flight.meta.geometry)
            .or(self.geometry)
    }

    /// Committed scroll state (last successful render).
    pub fn scroll(&self) -> ScrollState {
        self.scroll
    }

    /// Row of the outstanding fetch, or the committed row when idle.
    pub fn requested_row(&self) -> u64 {
        self.latest_target().current_row()
    }

    /// Scroll control enablement for the committed window.
    pub fn buttons(&self) -> ScrollButtons {
        self.scroll.buttons()
    }

    /// Current highlight.
    pub fn highlight_state(&self) -> HighlightState {
        self.highlight
    }

    /// Size of the loaded file in bytes.
    pub fn loaded_len(&self) -> u64 {
        self.loaded_len
    }

    /// Name of the loaded file, if any.
    pub fn file_name(&self) -> Option<&str> {
        self.loaded.as_ref().map(|file| file.name())
    }

    /// True while a fetch is outstanding.
    pub fn is_fetching(&self) -> bool {
        self.pending.is_some()
    }

    /// Number of fetches superseded before they were applied.
    pub fn superseded(&self) -> u64 {
        self.superseded
    }

    fn latest_target(&self) -> ScrollState {
        self.pending
            .as_ref()
            .map_or(self.scroll, |in_flight| in_flight.meta.target)
    }

    fn issue(
        &mut self,
        reason: FetchReason,
        target: ScrollState,
        geometry: Geometry,
        file_len: u64,
    ) -> Result<Ticket, ViewError> {
        let size = geometry.num_bytes();
        let offset = target
            .offset(geometry)
            .ok_or(ViewError::RowOutOfRange {
                row: target.current_row(),
                cols: geometry.cols(),
            })?;

        self.generation += 1;
        let ticket = Ticket {
            generation: self.generation,
            row: target.current_row(),
        };

        if let Some(previous) = self.pending.take() {
            self.superseded += 1;
            debug!(
                superseded = previous.meta.ticket.generation,
                by = ticket.generation,
                "Dropping outstanding fetch"
            );
        }

        debug!(
            ?reason,
            generation = ticket.generation,
            row = ticket.row,
            offset,
            size,
            "Fetching window"
        );
        let read = self.source.read(offset, size);
        self.pending = Some(InFlight {
            meta: FetchMeta {
                ticket,
                reason,
                target,
                geometry,
                file_len,
            },
            read,
        });
        Ok(ticket)
    }

    fn resolve(
        &mut self,
        meta: FetchMeta,
        result: Result<ByteChunk, SourceError>,
    ) -> Result<Option<ViewUpdate>, ViewError> {
        if meta.ticket.generation != self.generation {
            debug!(
                generation = meta.ticket.generation,
                current = self.generation,
                "Discarding stale fetch"
            );
            return Ok(None);
        }

        let chunk = match result {
            Ok(chunk) => chunk,
            Err(error) => {
                warn!(
                    %error,
                    reason = ?meta.reason,
                    row = meta.ticket.row,
                    "Window fetch failed"
                );
                if let Some(file) = &self.loaded {
                    self.source.bind(Arc::clone(file));
                }
                return Err(ViewError::Fetch(error));
            }
        };

        self.scroll = meta.target;
        self.geometry = Some(meta.geometry);
        self.loaded = self.source.file().cloned();
        self.loaded_len = meta.file_len;
        self.phase = Phase::Loaded;
        let cleared_highlight = self.highlight.clear();

        let view = RenderedView::build(&chunk, self.scroll, meta.geometry);
        debug!(
            row = self.scroll.current_row(),
            max_row = self.scroll.max_row(),
            bytes = chunk.len(),
            "Window rendered"
        );

        Ok(Some(ViewUpdate {
            view,
            reason: meta.reason,
            cleared_highlight,
        }))
    }
}

#[cfg(test)]
#[path = "view_model_tests.rs"]
mod tests;
