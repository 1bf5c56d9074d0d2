//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crossterm::event::KeyEvent;
use std::collections::HashMap;

/// Maps keyboard events to viewer actions.
///
/// Provides default vim-style bindings alongside arrow and page keys.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&key).copied()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        use crossterm::event::{KeyCode, KeyModifiers};

        let none = KeyModifiers::NONE;
        let mut bindings = HashMap::new();
        let mut bind = |code: KeyCode, modifiers: KeyModifiers, action: KeyAction| {
            bindings.insert(KeyEvent::new(code, modifiers), action);
        };

        // Row scrolling
        bind(KeyCode::Char('k'), none, KeyAction::ScrollUp);
        bind(KeyCode::Char('j'), none, KeyAction::ScrollDown);
        bind(KeyCode::Up, none, KeyAction::ScrollUp);
        bind(KeyCode::Down, none, KeyAction::ScrollDown);

        // Chunk scrolling
        bind(KeyCode::PageUp, none, KeyAction::ChunkUp);
        bind(KeyCode::Char('u'), none, KeyAction::ChunkUp);
        bind(KeyCode::PageDown, none, KeyAction::ChunkDown);
        bind(KeyCode::Char('d'), none, KeyAction::ChunkDown);
        bind(KeyCode::Char(' '), none, KeyAction::ChunkDown);

        // Jumps
        bind(KeyCode::Char('g'), none, KeyAction::ScrollToTop);
        bind(KeyCode::Home, none, KeyAction::ScrollToTop);
        bind(KeyCode::Char('G'), KeyModifiers::SHIFT, KeyAction::ScrollToBottom);
        bind(KeyCode::End, none, KeyAction::ScrollToBottom);

        // Highlight cursor
        bind(KeyCode::Char('h'), none, KeyAction::HighlightLeft);
        bind(KeyCode::Left, none, KeyAction::HighlightLeft);
        bind(KeyCode::Char('l'), none, KeyAction::HighlightRight);
        bind(KeyCode::Right, none, KeyAction::HighlightRight);
        bind(KeyCode::Up, KeyModifiers::SHIFT, KeyAction::HighlightUp);
        bind(KeyCode::Down, KeyModifiers::SHIFT, KeyAction::HighlightDown);
        bind(KeyCode::Char('K'), KeyModifiers::SHIFT, KeyAction::HighlightUp);
        bind(KeyCode::Char('J'), KeyModifiers::SHIFT, KeyAction::HighlightDown);
        bind(KeyCode::Esc, none, KeyAction::ClearHighlight);

        // Application controls
        bind(KeyCode::Char('o'), none, KeyAction::OpenFile);
        bind(KeyCode::Char('?'), none, KeyAction::Help);
        bind(KeyCode::Char('q'), none, KeyAction::Quit);

        Self { bindings }
    }
}
