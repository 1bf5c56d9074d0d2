//! Styling for the hex viewer.
//!
//! Colors can be switched off; emphasis that carries meaning (the highlighted
//! byte, disabled scroll controls) falls back to text modifiers.

use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var_os("NO_COLOR").is_none();
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== HexStyles =====

/// Styles for every element the viewer paints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexStyles {
    /// Offset labels in the legend column.
    pub legend: Style,
    /// Hex glyphs.
    pub hex: Style,
    /// Text glyphs.
    pub text: Style,
    /// Text glyphs standing in for undisplayable bytes.
    pub placeholder: Style,
    /// The highlighted byte, in both columns.
    pub highlight: Style,
    /// Pane borders.
    pub border: Style,
    /// Enabled scroll indicator.
    pub control: Style,
    /// Disabled scroll indicator.
    pub control_disabled: Style,
    /// Error text in the status bar.
    pub error: Style,
    /// Secondary text (hints, labels).
    pub muted: Style,
    /// Category headers in the help overlay.
    pub section_header: Style,
    /// Key names in the help overlay.
    pub key: Style,
}

impl HexStyles {
    /// Styles honoring `NO_COLOR`.
    pub fn new() -> Self {
        Self::with_color_config(ColorConfig::from_env_and_args(false))
    }

    /// Styles for the given color configuration.
    pub fn with_color_config(config: ColorConfig) -> Self {
        let plain = Style::default();
        let highlight = Style::default().add_modifier(Modifier::REVERSED);
        let control_disabled = Style::default().add_modifier(Modifier::DIM);
        let bold = Style::default().add_modifier(Modifier::BOLD);

        if config.colors_enabled() {
            Self {
                legend: plain.fg(Color::DarkGray),
                hex: plain,
                text: plain.fg(Color::Green),
                placeholder: plain.fg(Color::DarkGray),
                highlight: highlight.fg(Color::Yellow),
                border: plain.fg(Color::Cyan),
                control: bold.fg(Color::Cyan),
                control_disabled: control_disabled.fg(Color::DarkGray),
                error: bold.fg(Color::Red),
                muted: plain.fg(Color::Gray),
                section_header: bold.fg(Color::Cyan),
                key: bold.fg(Color::Yellow),
            }
        } else {
            Self {
                legend: plain,
                hex: plain,
                text: plain,
                placeholder: plain,
                highlight,
                border: plain,
                control: bold,
                control_disabled,
                error: bold,
                muted: plain,
                section_header: bold,
                key: bold,
            }
        }
    }
}

impl Default for HexStyles {
    fn default() -> Self {
        Self::new()
    }
}

// ===== Tests =====
