//! Legend, hex and text columns.

use super::styles::HexStyles;
use crate::model::Geometry;
use crate::view_state::format::PLACEHOLDER;
use crate::view_state::hit_test::{GridLayout, HEX_CELL_WIDTH};
use crate::view_state::legend::format_offset;
use crate::view_state::RenderedView;
use ratatui::{
    buffer::Buffer,
    layout::{Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthChar;

/// Width of an 8-digit offset label.
const LEGEND_WIDTH: u16 = 8;
/// Border cells around each column.
const BORDER: u16 = 2;
/// Cells that do not scale with `cols`: three bordered columns plus the
/// legend labels and the missing trailing hex separator.
const FIXED_WIDTH: u16 = LEGEND_WIDTH + 3 * BORDER - 1;
/// Screen cells used per byte: a hex glyph with separator and a text glyph.
const CELLS_PER_BYTE: u16 = HEX_CELL_WIDTH + 1;

/// Outer rectangles of the three columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneAreas {
    /// Offset labels.
    pub legend: Rect,
    /// Hex glyphs.
    pub hex: Rect,
    /// Text glyphs.
    pub text: Rect,
}

impl PaneAreas {
    /// Place the columns for `geometry` at the top-left of `area`, clipped to it.
    pub fn new(area: Rect, geometry: Geometry) -> Self {
        let height = geometry.rows().saturating_add(BORDER);
        let hex_width = geometry
            .cols()
            .saturating_mul(HEX_CELL_WIDTH)
            .saturating_sub(1)
            .saturating_add(BORDER);
        let text_width = geometry.cols().saturating_add(BORDER);

        let legend = Rect::new(area.x, area.y, LEGEND_WIDTH + BORDER, height);
        let hex = Rect::new(legend.right(), area.y, hex_width, height);
        let text = Rect::new(hex.right(), area.y, text_width, height);

        Self {
            legend: legend.intersection(area),
            hex: hex.intersection(area),
            text: text.intersection(area),
        }
    }

    /// Columns sized for `view`: one line per legend offset, `view.cols` bytes wide.
    pub fn for_view(area: Rect, view: &RenderedView) -> Self {
        let rows = u16::try_from(view.legend_offsets.len()).unwrap_or(u16::MAX);
        let geometry = Geometry::new(rows.max(1), view.cols.max(1)).unwrap_or_default();
        Self::new(area, geometry)
    }

    /// Hit-test layout for a chunk of `len` bytes.
    pub fn grid(&self, cols: u16, len: usize) -> GridLayout {
        GridLayout {
            hex: inner(self.hex),
            text: inner(self.text),
            cols,
            len,
        }
    }
}

fn inner(area: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(area)
}

/// Largest geometry no bigger than `preferred` that fits in `size`.
///
/// Never shrinks below one row and one column.
pub fn fit_geometry(preferred: Geometry, size: Size) -> Geometry {
    let rows = size.height.saturating_sub(BORDER + 1).clamp(1, preferred.rows());
    let cols = (size.width.saturating_sub(FIXED_WIDTH) / CELLS_PER_BYTE).clamp(1, preferred.cols());
    Geometry::new(rows, cols).unwrap_or(preferred)
}

/// Widget painting one [`RenderedView`].
pub struct HexPane<'a> {
    view: &'a RenderedView,
    highlight: Option<usize>,
    styles: &'a HexStyles,
    title: &'a str,
}

impl<'a> HexPane<'a> {
    /// Create a pane for `view`, emphasizing `highlight` if it is in range.
    pub fn new(
        view: &'a RenderedView,
        highlight: Option<usize>,
        styles: &'a HexStyles,
        title: &'a str,
    ) -> Self {
        Self {
            view,
            highlight,
            styles,
            title,
        }
    }

    fn glyph_style(&self, index: usize, base: Style) -> Style {
        if self.highlight == Some(index) {
            base.patch(self.styles.highlight)
        } else {
            base
        }
    }

    fn legend_lines(&self) -> Vec<Line<'static>> {
        self.view
            .legend_offsets
            .iter()
            .map(|offset| Line::styled(format_offset(*offset), self.styles.legend))
            .collect()
    }

    fn hex_lines(&self) -> Vec<Line<'_>> {
        let cols = usize::from(self.view.cols.max(1));
        self.view
            .hex_glyphs
            .chunks(cols)
            .enumerate()
            .map(|(row, glyphs)| {
                let mut spans = Vec::with_capacity(glyphs.len() * 2);
                for (col, glyph) in glyphs.iter().enumerate() {
                    if col > 0 {
                        spans.push(Span::raw(" "));
                    }
                    let style = self.glyph_style(row * cols + col, self.styles.hex);
                    spans.push(Span::styled(glyph.as_str(), style));
                }
                Line::from(spans)
            })
            .collect()
    }

    fn text_lines(&self) -> Vec<Line<'static>> {
        let cols = usize::from(self.view.cols.max(1));
        self.view
            .text_glyphs
            .chunks(cols)
            .enumerate()
            .map(|(row, glyphs)| {
                let spans: Vec<Span<'static>> = glyphs
                    .iter()
                    .enumerate()
                    .map(|(col, &glyph)| {
                        let (glyph, base) = self.cell(glyph);
                        let style = self.glyph_style(row * cols + col, base);
                        Span::styled(glyph.to_string(), style)
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }

    /// Terminal cell for a text glyph. Glyphs that are not one cell wide would
    /// break column alignment and are drawn as the placeholder.
    fn cell(&self, glyph: char) -> (char, Style) {
        if glyph == PLACEHOLDER {
            (glyph, self.styles.placeholder)
        } else if glyph.width() == Some(1) {
            (glyph, self.styles.text)
        } else {
            (PLACEHOLDER, self.styles.placeholder)
        }
    }

    fn block<'b>(&self, title: &'b str) -> Block<'b> {
        Block::default()
            .borders(Borders::ALL)
            .border_style(self.styles.border)
            .title(title)
    }
}

impl Widget for HexPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let areas = PaneAreas::for_view(area, self.view);

        Paragraph::new(self.legend_lines())
            .block(self.block(" Offset "))
            .render(areas.legend, buf);
        Paragraph::new(self.hex_lines())
            .block(self.block(self.title))
            .render(areas.hex, buf);
        Paragraph::new(self.text_lines())
            .block(self.block(" Text "))
            .render(areas.text, buf);
    }
}
