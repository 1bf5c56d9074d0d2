//! File path prompt opened with `o`.

use super::styles::HexStyles;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};
use std::path::PathBuf;

/// Height of the prompt box (border + input line).
pub const PROMPT_HEIGHT: u16 = 3;

/// What a key press did to the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    /// Still editing.
    Editing,
    /// Enter pressed on a non-empty path.
    Submit(PathBuf),
    /// Esc pressed.
    Cancel,
}

/// Editable path with a cursor measured in characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenPrompt {
    input: String,
    cursor: usize,
}

impl OpenPrompt {
    /// Empty prompt.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current input.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Apply one key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> PromptOutcome {
        match key.code {
            KeyCode::Esc => return PromptOutcome::Cancel,
            KeyCode::Enter => {
                let path = self.input.trim();
                if !path.is_empty() {
                    return PromptOutcome::Submit(PathBuf::from(path));
                }
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let at = self.byte_index();
                self.input.insert(at, ch);
                self.cursor += 1;
            }
            KeyCode::Backspace if self.cursor > 0 => {
                self.cursor -= 1;
                let at = self.byte_index();
                self.input.remove(at);
            }
            KeyCode::Delete if self.cursor < self.char_count() => {
                let at = self.byte_index();
                self.input.remove(at);
            }
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.char_count()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.char_count(),
            _ => {}
        }
        PromptOutcome::Editing
    }

    fn char_count(&self) -> usize {
        self.input.chars().count()
    }

    fn byte_index(&self) -> usize {
        self.input
            .char_indices()
            .nth(self.cursor)
            .map_or(self.input.len(), |(i, _)| i)
    }
}

/// Widget drawing an [`OpenPrompt`] with a block cursor.
pub struct OpenPromptWidget<'a> {
    prompt: &'a OpenPrompt,
    styles: &'a HexStyles,
}

impl<'a> OpenPromptWidget<'a> {
    /// Create the widget.
    pub fn new(prompt: &'a OpenPrompt, styles: &'a HexStyles) -> Self {
        Self { prompt, styles }
    }
}

impl Widget for OpenPromptWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let before: String = self.prompt.input.chars().take(self.prompt.cursor).collect();
        let mut after = self.prompt.input.chars().skip(self.prompt.cursor);
        let under_cursor = after.next().map_or_else(|| " ".to_string(), String::from);
        let rest: String = after.collect();

        let line = Line::from(vec![
            Span::raw(before),
            Span::styled(
                under_cursor,
                self.styles.highlight.add_modifier(Modifier::REVERSED),
            ),
            Span::raw(rest),
        ]);

        Clear.render(area, buf);
        Paragraph::new(line)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(self.styles.border)
                    .title(" Open file (Enter to open, Esc to cancel) "),
            )
            .render(area, buf);
    }
}
