//! Help overlay widget displaying keyboard shortcuts.
//!
//! Shows a centered modal overlay with all keyboard shortcuts grouped by category.
//! Triggered by '?' key, dismissed by 'Esc' or '?'.

use super::styles::HexStyles;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Width percentage for the help popup.
const HELP_POPUP_WIDTH_PERCENT: u16 = 60;
/// Height percentage for the help popup.
const HELP_POPUP_HEIGHT_PERCENT: u16 = 80;

const SHORTCUTS: &[(&str, &[(&str, &str)])] = &[
    (
        "Scrolling",
        &[
            ("k/↑", "Up one row"),
            ("j/↓", "Down one row"),
            ("u/Page Up", "Up one screen"),
            ("d/Space/Page Down", "Down one screen"),
            ("g/Home", "First row"),
            ("G/End", "Last row"),
            ("Mouse wheel", "Up/down one row"),
        ],
    ),
    (
        "Highlight",
        &[
            ("h/←  l/→", "Previous/next byte"),
            ("Shift+↑/↓", "Byte above/below"),
            ("Click", "Highlight byte"),
            ("Esc", "Clear highlight"),
        ],
    ),
    (
        "Application",
        &[
            ("o", "Open file"),
            ("?", "Toggle this help"),
            ("q/Ctrl+C", "Quit"),
        ],
    ),
];

/// Render the help overlay centered on the screen.
pub fn render_help_overlay(frame: &mut Frame, styles: &HexStyles) {
    let popup_area = centered_rect(
        HELP_POPUP_WIDTH_PERCENT,
        HELP_POPUP_HEIGHT_PERCENT,
        frame.area(),
    );

    frame.render_widget(Clear, popup_area);

    let help_paragraph = Paragraph::new(build_help_content(styles))
        .block(
            Block::default()
                .title(" Keyboard Shortcuts ")
                .title_bottom(Line::from(" Press Esc or ? to close ").centered())
                .borders(Borders::ALL)
                .border_style(styles.border),
        )
        .alignment(Alignment::Left);

    frame.render_widget(help_paragraph, popup_area);
}

/// Calculate the centered rect for the help overlay.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_width = area.width * percent_x / 100;
    let popup_height = area.height * percent_y / 100;
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    Rect {
        x: area.x + popup_x,
        y: area.y + popup_y,
        width: popup_width,
        height: popup_height,
    }
}

fn build_help_content(styles: &HexStyles) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (i, (category, keys)) in SHORTCUTS.iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        lines.push(Line::styled(*category, styles.section_header));
        for (key, description) in keys.iter() {
            lines.push(Line::from(vec![
                Span::styled(format!("  {key:<18}"), styles.key),
                Span::raw(*description),
            ]));
        }
    }
    lines
}
