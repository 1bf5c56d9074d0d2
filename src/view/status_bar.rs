//! One-line status bar under the byte grid.

use super::styles::HexStyles;
use crate::view_state::legend::format_offset;
use crate::view_state::ScrollButtons;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Everything the status bar shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusInfo {
    /// Loaded file name.
    pub file_name: Option<String>,
    /// File offset of the window start.
    pub offset: u64,
    /// Committed row.
    pub row: u64,
    /// Last scrollable row.
    pub max_row: u64,
    /// Scroll control enablement.
    pub buttons: ScrollButtons,
    /// File offset of the highlighted byte.
    pub highlighted: Option<u64>,
    /// A fetch is outstanding.
    pub loading: bool,
    /// Most recent error, cleared by the next successful render.
    pub error: Option<String>,
}

/// Status bar widget.
pub struct StatusBar<'a> {
    info: &'a StatusInfo,
    styles: &'a HexStyles,
}

impl<'a> StatusBar<'a> {
    /// Create the widget.
    pub fn new(info: &'a StatusInfo, styles: &'a HexStyles) -> Self {
        Self { info, styles }
    }

    fn line(&self) -> Line<'static> {
        let info = self.info;
        let Some(name) = &info.file_name else {
            let mut spans = vec![Span::styled(
                "No file loaded. Press o to open one, ? for help",
                self.styles.muted,
            )];
            self.push_error(&mut spans);
            return Line::from(spans);
        };

        let control = |disabled: bool, glyph: &'static str| {
            let style = if disabled {
                self.styles.control_disabled
            } else {
                self.styles.control
            };
            Span::styled(glyph, style)
        };

        let mut spans = vec![
            Span::raw(format!(" {name} ")),
            control(info.buttons.up_disabled, "▲"),
            control(info.buttons.down_disabled, "▼"),
            Span::styled(
                format!(
                    " @{} row {}/{}",
                    format_offset(info.offset),
                    info.row,
                    info.max_row
                ),
                self.styles.muted,
            ),
        ];
        if let Some(offset) = info.highlighted {
            spans.push(Span::raw(format!("  sel {}", format_offset(offset))));
        }
        if info.loading {
            spans.push(Span::styled("  loading…", self.styles.muted));
        }
        self.push_error(&mut spans);
        Line::from(spans)
    }

    fn push_error(&self, spans: &mut Vec<Span<'static>>) {
        if let Some(error) = &self.info.error {
            spans.push(Span::styled(format!("  {error}"), self.styles.error));
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.line()).render(area, buf);
    }
}
