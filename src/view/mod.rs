//! TUI rendering and terminal management (impure shell)
//!
//! Drives a [`ViewModel`] from crossterm events and paints its windows with
//! ratatui. Fetches complete on worker threads; the event loop polls for
//! finished fetches between input events.

mod help;
pub mod hex_pane;
pub mod open_prompt;
pub mod status_bar;
mod styles;

pub use help::render_help_overlay;
pub use hex_pane::{fit_geometry, HexPane, PaneAreas};
pub use open_prompt::{OpenPrompt, OpenPromptWidget, PromptOutcome};
pub use status_bar::{StatusBar, StatusInfo};
pub use styles::{ColorConfig, HexStyles};

use crate::config::{ConfigError, KeyBindings, ResolvedConfig};
use crate::model::{AppError, Geometry, KeyAction, ViewError};
use crate::source::{self, ByteFile, ByteSource};
use crate::view_state::scroll::delta_for;
use crate::view_state::{GridLayout, RenderedView, ViewModel, ViewUpdate};
use crossterm::{
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Layout, Rect, Size},
    Terminal,
};
use std::io::{self, Stdout};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Application error
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    model: ViewModel,
    key_bindings: KeyBindings,
    styles: HexStyles,
    /// Configured geometry; the live geometry may be smaller to fit the terminal.
    preferred: Geometry,
    /// Last successfully rendered window.
    view: Option<RenderedView>,
    /// Last error, cleared by the next successful render.
    error: Option<String>,
    prompt: Option<OpenPrompt>,
    help_visible: bool,
    /// Glyph placement from the last frame (for mouse click detection)
    last_grid: Option<GridLayout>,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen and mouse capture.
    pub fn new(config: &ResolvedConfig, colors: ColorConfig) -> Result<Self, TuiError> {
        let preferred = config.geometry()?;

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(crossterm::event::EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        Self::with_terminal(
            terminal,
            preferred,
            ByteSource::with_retries(config.io_retries),
            HexStyles::with_color_config(colors),
        )
    }

    /// Run the main event loop
    ///
    /// Returns when user quits (q or Ctrl+C). Redraws after input events and
    /// whenever an outstanding fetch resolves.
    pub fn run(&mut self) -> Result<(), TuiError> {
        // Poll interval while waiting for input; also bounds fetch latency.
        const TICK: Duration = Duration::from_millis(30);

        let mut dirty = true;
        loop {
            dirty |= self.apply_fetch_results();
            if dirty {
                self.draw()?;
                dirty = false;
            }

            if !event::poll(TICK)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if self.handle_key(key) {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => self.handle_mouse(mouse),
                Event::Resize(width, height) => self.handle_resize(Size::new(width, height))?,
                _ => continue,
            }
            dirty = true;
        }
    }
}

impl<B> TuiApp<B>
where
    B: Backend,
{
    fn with_terminal(
        terminal: Terminal<B>,
        preferred: Geometry,
        source: ByteSource,
        styles: HexStyles,
    ) -> Result<Self, TuiError> {
        let size = terminal.size()?;
        let mut app = Self {
            terminal,
            model: ViewModel::with_source(source),
            key_bindings: KeyBindings::default(),
            styles,
            preferred,
            view: None,
            error: None,
            prompt: None,
            help_visible: false,
            last_grid: None,
        };
        app.handle_resize(size)?;
        Ok(app)
    }

    /// Open the file at `path`; `-` reads stdin. Failures go to the status bar.
    pub fn open_path(&mut self, path: &Path) {
        match source::open_path(path) {
            Ok(file) => self.open_file(file),
            Err(error) => {
                warn!(path = %path.display(), %error, "Cannot open file");
                self.error = Some(error.to_string());
            }
        }
    }

    /// Select an already opened file and start fetching its first window.
    pub fn open_file(&mut self, file: Arc<dyn ByteFile>) {
        if let Err(error) = self.model.on_file_selected(file) {
            self.error = Some(error.to_string());
        }
    }

    /// Apply a finished fetch, if any. Returns true when the screen changed.
    fn apply_fetch_results(&mut self) -> bool {
        let result = self.model.poll();
        self.apply(result)
    }

    fn apply(&mut self, result: Result<Option<ViewUpdate>, ViewError>) -> bool {
        match result {
            Ok(Some(update)) => {
                if let Some(index) = update.cleared_highlight {
                    debug!(index, reason = ?update.reason, "Highlight cleared by render");
                }
                self.view = Some(update.view);
                self.error = None;
                true
            }
            Ok(None) => false,
            Err(error) => {
                // Keep the previous window on screen.
                self.error = Some(error.to_string());
                true
            }
        }
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Ctrl+C always quits, even while typing a path
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        // The open prompt captures every other key while visible
        if let Some(prompt) = self.prompt.as_mut() {
            match prompt.handle_key(key) {
                PromptOutcome::Editing => {}
                PromptOutcome::Cancel => self.prompt = None,
                PromptOutcome::Submit(path) => {
                    self.prompt = None;
                    info!(path = %path.display(), "Opening file from prompt");
                    self.open_path(&path);
                }
            }
            return false;
        }

        if key.code == KeyCode::Esc && self.help_visible {
            self.help_visible = false;
            return false;
        }

        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };

        // Help overlay blocks everything but closing it or quitting
        if self.help_visible && !matches!(action, KeyAction::Help | KeyAction::Quit) {
            return false;
        }

        match action {
            KeyAction::Quit => return true,
            KeyAction::Help => self.help_visible = !self.help_visible,
            KeyAction::OpenFile => self.prompt = Some(OpenPrompt::new()),
            KeyAction::ClearHighlight => {
                self.model.clear_highlight();
            }
            KeyAction::HighlightLeft => self.move_highlight(-1, 0),
            KeyAction::HighlightRight => self.move_highlight(1, 0),
            KeyAction::HighlightUp => self.move_highlight(0, -1),
            KeyAction::HighlightDown => self.move_highlight(0, 1),
            KeyAction::ScrollUp
            | KeyAction::ScrollDown
            | KeyAction::ChunkUp
            | KeyAction::ChunkDown
            | KeyAction::ScrollToTop
            | KeyAction::ScrollToBottom => {
                if let Some(delta) = self.model.geometry().and_then(|g| delta_for(action, g)) {
                    self.scroll_by(delta);
                }
            }
        }
        false
    }

    fn scroll_by(&mut self, delta: i64) {
        match self.model.scroll_by(delta) {
            Ok(_) => {}
            Err(ViewError::NotLoaded) => debug!(delta, "Scroll ignored, no file loaded"),
            Err(error) => self.error = Some(error.to_string()),
        }
    }

    fn move_highlight(&mut self, dx: i64, dy: i64) {
        let len = self.view.as_ref().map_or(0, RenderedView::len);
        self.model.move_highlight(dx, dy, len);
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.help_visible || self.prompt.is_some() {
            return;
        }

        match mouse.kind {
            MouseEventKind::ScrollUp => self.scroll_by(-1),
            MouseEventKind::ScrollDown => self.scroll_by(1),
            MouseEventKind::Down(MouseButton::Left) => {
                let hit = self
                    .last_grid
                    .and_then(|grid| grid.hit_test(mouse.column, mouse.row).index());
                if let Some(index) = hit {
                    self.model.highlight(index);
                }
            }
            _ => {}
        }
    }

    /// Shrink the window to fit a terminal of `size`, refetching if it changed.
    fn handle_resize(&mut self, size: Size) -> Result<(), TuiError> {
        let geometry = fit_geometry(self.preferred, size);
        if self.model.requested_geometry() != Some(geometry) {
            debug!(
                rows = geometry.rows(),
                cols = geometry.cols(),
                "Fitting window to terminal"
            );
            self.model
                .configure(geometry.rows(), geometry.cols())
                .map_err(AppError::from)?;
        }
        Ok(())
    }

    fn status_info(&self) -> StatusInfo {
        let scroll = self.model.scroll();
        let view = self.view.as_ref();
        StatusInfo {
            file_name: self.model.file_name().map(str::to_string),
            offset: view.map_or(0, |v| v.offset),
            row: scroll.current_row(),
            max_row: scroll.max_row(),
            buttons: self.model.buttons(),
            highlighted: self
                .model
                .highlight_state()
                .selected()
                .and_then(|index| view?.offset_of(index)),
            loading: self.model.is_fetching(),
            error: self.error.clone(),
        }
    }

    fn draw(&mut self) -> Result<(), TuiError> {
        let status = self.status_info();
        let highlight = self.model.highlight_state().selected();
        let styles = self.styles;
        let view = self.view.as_ref();
        let prompt = self.prompt.as_ref();
        let help_visible = self.help_visible;
        let mut grid = None;

        self.terminal.draw(|frame| {
            let [main, status_area] =
                Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

            if let Some(view) = view {
                frame.render_widget(HexPane::new(view, highlight, &styles, " Hex "), main);
                grid = Some(PaneAreas::for_view(main, view).grid(view.cols, view.len()));
            }
            frame.render_widget(StatusBar::new(&status, &styles), status_area);

            if let Some(prompt) = prompt {
                let height = open_prompt::PROMPT_HEIGHT.min(main.height);
                let prompt_area = Rect::new(main.x, main.bottom() - height, main.width, height);
                frame.render_widget(OpenPromptWidget::new(prompt, &styles), prompt_area);
            }
            if help_visible {
                render_help_overlay(frame, &styles);
            }
        })?;

        self.last_grid = grid;
        Ok(())
    }
}

/// Initialize and run the TUI, opening `file` first if given.
///
/// Handles terminal setup, runs the event loop, and restores the terminal
/// even when the loop fails.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_with_file(
    file: Option<PathBuf>,
    config: &ResolvedConfig,
    colors: ColorConfig,
) -> Result<(), TuiError> {
    let mut app = TuiApp::new(config, colors)?;
    if let Some(path) = file {
        app.open_path(&path);
    }

    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(crossterm::event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "tui_tests.rs"]
mod tests;
