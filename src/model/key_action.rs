//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Scrolling
    /// Scroll the window up by one row. Default: k/↑
    ScrollUp,
    /// Scroll the window down by one row. Default: j/↓
    ScrollDown,
    /// Scroll up by `rows - 1`, keeping one row of overlap. Default: u/Page Up
    ChunkUp,
    /// Scroll down by `rows - 1`, keeping one row of overlap. Default: d/Space/Page Down
    ChunkDown,
    /// Jump to the first row. Default: g/Home
    ScrollToTop,
    /// Jump to the last scrollable row. Default: G/End
    ScrollToBottom,

    // Highlight cursor
    /// Move the highlighted byte one column left. Default: h/←
    HighlightLeft,
    /// Move the highlighted byte one column right. Default: l/→
    HighlightRight,
    /// Move the highlighted byte one row up. Default: Shift+↑/K
    HighlightUp,
    /// Move the highlighted byte one row down. Default: Shift+↓/J
    HighlightDown,
    /// Clear the highlight. Default: Esc
    ClearHighlight,

    // Application
    /// Prompt for a file path to open. Default: o
    OpenFile,
    /// Toggle the help overlay. Default: ?
    Help,
    /// Exit the application. Default: q/Ctrl+c
    Quit,
}

impl KeyAction {
    /// True for actions that move the window.
    pub fn is_scroll(self) -> bool {
        matches!(
            self,
            KeyAction::ScrollUp
                | KeyAction::ScrollDown
                | KeyAction::ChunkUp
                | KeyAction::ChunkDown
                | KeyAction::ScrollToTop
                | KeyAction::ScrollToBottom
        )
    }
}
