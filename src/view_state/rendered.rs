//! Derived glyph sequences for one render pass

use super::format::{format_hex, format_text};
use super::legend::legend_offsets;
use super::scroll::{ScrollButtons, ScrollState};
use crate::model::{ByteChunk, Geometry};

/// Everything the presentation layer paints for one window.
///
/// Derived from a resolved [`ByteChunk`]; never authoritative state. Built
/// all at once, so a render pass is all-or-nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedView {
    /// Row at the top of the window.
    pub start_row: u64,
    /// File offset of the first glyph.
    pub offset: u64,
    /// Bytes per row the glyphs were laid out for.
    pub cols: u16,
    /// One two-character hex glyph per byte.
    pub hex_glyphs: Vec<String>,
    /// One display character per byte.
    pub text_glyphs: Vec<char>,
    /// Offset label for each of the `rows` rows.
    pub legend_offsets: Vec<u64>,
    /// Scroll control enablement.
    pub buttons: ScrollButtons,
}

impl RenderedView {
    /// Derive all sequences from `chunk` at `scroll`.
    pub fn build(chunk: &ByteChunk, scroll: ScrollState, geometry: Geometry) -> Self {
        Self {
            start_row: scroll.current_row(),
            offset: chunk.offset(),
            cols: geometry.cols(),
            hex_glyphs: format_hex(chunk.as_bytes()),
            text_glyphs: format_text(chunk.as_bytes()),
            legend_offsets: legend_offsets(scroll.current_row(), geometry),
            buttons: scroll.buttons(),
        }
    }

    /// Number of bytes in the window.
    pub fn len(&self) -> usize {
        self.hex_glyphs.len()
    }

    /// True when the window holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.hex_glyphs.is_empty()
    }

    /// File offset of the glyph at `index`, if it is inside the window.
    pub fn offset_of(&self, index: usize) -> Option<u64> {
        (index < self.len()).then(|| self.offset + index as u64)
    }
}
