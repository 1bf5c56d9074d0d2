//! Tests for the windowed view model.

use super::*;
use crate::model::SourceError;
use crate::source::testing::{FlakyFile, SlowFile};
use crate::source::MemoryFile;
use std::time::Duration;

// ===== Test Helpers =====

fn bytes(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 256) as u8).collect()
}

fn configured(rows: u16, cols: u16) -> ViewModel {
    let mut model = ViewModel::new();
    model.configure(rows, cols).expect("valid geometry");
    model
}

/// Load `file` and wait for the first window.
fn loaded(rows: u16, cols: u16, file: Arc<dyn ByteFile>) -> (ViewModel, ViewUpdate) {
    let mut model = configured(rows, cols);
    model.on_file_selected(file).expect("configured");
    let update = model
        .wait()
        .expect("first fetch succeeds")
        .expect("first fetch applies");
    (model, update)
}

/// Scroll and wait for the resulting window.
fn scroll_and_wait(model: &mut ViewModel, delta: i64) -> Option<ViewUpdate> {
    model.scroll_by(delta).expect("loaded");
    model.wait().expect("fetch succeeds")
}

// ===== State machine =====

#[test]
fn new_model_is_unconfigured() {
    let model = ViewModel::new();
    assert_eq!(model.phase(), Phase::Unconfigured);
    assert!(model.geometry().is_none());
    assert!(model.legend_offsets(0).is_empty());
}

#[test]
fn configure_moves_to_configured_without_fetching() {
    let mut model = ViewModel::new();

    let ticket = model.configure(20, 20).unwrap();

    assert_eq!(ticket, None);
    assert_eq!(model.phase(), Phase::Configured);
    assert_eq!(model.geometry(), Geometry::new(20, 20).ok());
    assert!(!model.is_fetching());
}

#[test]
fn configure_rejects_zero_dimensions() {
    let mut model = ViewModel::new();

    let result = model.configure(0, 20);

    assert!(matches!(result, Err(ViewError::Geometry(_))));
    assert_eq!(model.phase(), Phase::Unconfigured);
}

#[test]
fn file_selected_before_configure_is_rejected() {
    let mut model = ViewModel::new();

    let result = model.on_file_selected(Arc::new(MemoryFile::new("m", bytes(10))));

    assert!(matches!(result, Err(ViewError::Unconfigured)));
}

#[test]
fn scroll_before_load_is_rejected() {
    let mut model = configured(20, 20);

    assert!(matches!(model.scroll_by(1), Err(ViewError::NotLoaded)));
}

#[test]
fn successful_selection_enters_loaded() {
    let (model, update) = loaded(4, 4, Arc::new(MemoryFile::new("a.bin", bytes(64))));

    assert_eq!(model.phase(), Phase::Loaded);
    assert_eq!(update.reason, FetchReason::FileSelected);
    assert_eq!(model.file_name(), Some("a.bin"));
    assert_eq!(model.loaded_len(), 64);
}

// ===== File selection =====

#[test]
fn small_file_scenario() {
    let file = Arc::new(SlowFile::new(bytes(95)));
    let (model, update) = loaded(20, 20, file.clone());

    assert_eq!(model.geometry().map(|g| g.num_bytes()), Some(400));
    assert_eq!(model.scroll().max_row(), 0);
    assert_eq!(file.reads(), vec![(0, 400)]);
    assert_eq!(update.view.hex_glyphs.len(), 95);
    assert_eq!(update.view.text_glyphs.len(), 95);
    assert_eq!(update.view.legend_offsets.len(), 20);
    assert!(update.view.buttons.up_disabled);
    assert!(update.view.buttons.down_disabled);
}

#[test]
fn initial_buttons_for_scrollable_file() {
    let (model, update) = loaded(4, 4, Arc::new(MemoryFile::new("m", bytes(64))));

    // ceil(64 / 4) - 4 = 12
    assert_eq!(model.scroll().max_row(), 12);
    assert!(update.view.buttons.up_disabled);
    assert!(!update.view.buttons.down_disabled);
}

#[test]
fn failed_first_selection_stays_configured() {
    let mut model = configured(4, 4);
    model
        .on_file_selected(Arc::new(FlakyFile::new(bytes(64), usize::MAX)))
        .unwrap();

    let result = model.wait();

    assert!(matches!(result, Err(ViewError::Fetch(SourceError::Io { .. }))));
    assert_eq!(model.phase(), Phase::Configured);
    assert_eq!(model.scroll(), ScrollState::default());
    assert!(!model.is_fetching());
}

#[test]
fn failed_reselection_keeps_previous_file_and_scroll() {
    let (mut model, _) = loaded(4, 4, Arc::new(MemoryFile::new("good.bin", bytes(64))));
    scroll_and_wait(&mut model, 3).unwrap();
    let before = model.scroll();

    model
        .on_file_selected(Arc::new(FlakyFile::new(bytes(8), usize::MAX)))
        .unwrap();
    assert!(model.wait().is_err());

    assert_eq!(model.scroll(), before);
    assert_eq!(model.phase(), Phase::Loaded);
    assert_eq!(model.file_name(), Some("good.bin"));

    // The old file is still the one being read.
    let update = scroll_and_wait(&mut model, 1).unwrap();
    assert_eq!(update.view.offset, 16);
    assert_eq!(update.view.hex_glyphs[0], "10");
}

#[test]
fn reselection_resets_to_top() {
    let (mut model, _) = loaded(4, 4, Arc::new(MemoryFile::new("a", bytes(64))));
    scroll_and_wait(&mut model, 5).unwrap();

    model
        .on_file_selected(Arc::new(MemoryFile::new("b", bytes(200))))
        .unwrap();
    let update = model.wait().unwrap().unwrap();

    assert_eq!(update.view.start_row, 0);
    assert_eq!(model.scroll().max_row(), 46);
    assert_eq!(model.file_name(), Some("b"));
}

#[test]
fn empty_file_renders_empty_window() {
    let (model, update) = loaded(4, 4, Arc::new(MemoryFile::new("empty", Vec::new())));

    assert!(update.view.is_empty());
    assert_eq!(update.view.legend_offsets, vec![0, 4, 8, 12]);
    assert_eq!(model.scroll().max_row(), 0);
}

// ===== Scrolling =====

#[test]
fn scroll_clamps_to_top_and_bottom() {
    // 4 cols, 4 rows, 56 bytes → ceil(56/4) - 4 = 10
    let (mut model, _) = loaded(4, 4, Arc::new(MemoryFile::new("m", bytes(56))));
    scroll_and_wait(&mut model, 5).unwrap();
    assert_eq!(model.scroll(), ScrollState::new(5, 10));

    scroll_and_wait(&mut model, -100).unwrap();
    assert_eq!(model.scroll().current_row(), 0);

    scroll_and_wait(&mut model, 100).unwrap();
    assert_eq!(model.scroll().current_row(), 10);
}

#[test]
fn noop_scroll_issues_no_fetch() {
    let file = Arc::new(SlowFile::new(bytes(56)));
    let (mut model, _) = loaded(4, 4, file.clone());
    let reads_at_top = file.read_count();

    assert_eq!(model.scroll_by(0).unwrap(), None);
    assert_eq!(model.scroll_by(-1).unwrap(), None);
    assert!(!model.is_fetching());
    assert_eq!(file.read_count(), reads_at_top);

    scroll_and_wait(&mut model, 100).unwrap();
    let reads_at_bottom = file.read_count();

    assert_eq!(model.scroll_by(0).unwrap(), None);
    assert_eq!(model.scroll_by(1).unwrap(), None);
    assert!(model.wait().unwrap().is_none());
    assert_eq!(file.read_count(), reads_at_bottom);
}

#[test]
fn scroll_fetches_window_at_row_offset() {
    let file = Arc::new(SlowFile::new(bytes(400)));
    let (mut model, _) = loaded(4, 16, file.clone());

    let update = scroll_and_wait(&mut model, 2).unwrap();

    assert_eq!(file.reads().last(), Some(&(32, 64)));
    assert_eq!(update.view.offset, 32);
    assert_eq!(update.view.legend_offsets, vec![32, 48, 64, 80]);
    assert_eq!(update.view.hex_glyphs[0], "20");
    assert!(!update.view.buttons.up_disabled);
}

#[test]
fn chunk_scroll_keeps_one_row_overlap() {
    let (mut model, first) = loaded(4, 4, Arc::new(MemoryFile::new("m", bytes(256))));
    let chunk = i64::from(model.geometry().unwrap().chunk_rows());

    let second = scroll_and_wait(&mut model, chunk).unwrap();

    let last_row_before = first.view.legend_offsets.last().copied();
    let first_row_after = second.view.legend_offsets.first().copied();
    assert_eq!(last_row_before, first_row_after);
}

#[test]
fn short_final_window_is_not_padded() {
    // 4 cols, 2 rows, 10 bytes → rows 0..=2, max_row 1
    let (mut model, _) = loaded(2, 4, Arc::new(MemoryFile::new("m", bytes(10))));

    let update = scroll_and_wait(&mut model, 1).unwrap();

    assert_eq!(update.view.hex_glyphs.len(), 6);
    assert_eq!(update.view.text_glyphs.len(), 6);
    assert!(update.view.buttons.down_disabled);
}

#[test]
fn failed_scroll_leaves_scroll_state() {
    let flaky = Arc::new(FlakyFile::new(bytes(64), 0));
    let (mut model, _) = loaded(4, 4, flaky);
    scroll_and_wait(&mut model, 2).unwrap();

    // Scroll while a failing reselection is still outstanding.
    model
        .on_file_selected(Arc::new(FlakyFile::new(bytes(64), usize::MAX)))
        .unwrap();
    model.scroll_by(3).unwrap();
    let result = model.wait();

    assert!(result.is_err());
    assert_eq!(model.scroll().current_row(), 2);
    assert_eq!(model.requested_row(), 2);
}

// ===== Superseded fetches =====

#[test]
fn rapid_scrolls_render_only_latest() {
    let (mut model, _) = loaded(4, 4, Arc::new(MemoryFile::new("m", bytes(256))));

    let first = model.scroll_by(1).unwrap().unwrap();
    let second = model.scroll_by(1).unwrap().unwrap();

    assert_eq!(first.row(), 1);
    assert_eq!(second.row(), 2);
    assert!(second.generation() > first.generation());
    assert_eq!(model.requested_row(), 2);
    assert_eq!(model.scroll().current_row(), 0, "Nothing committed yet");

    let update = model.wait().unwrap().expect("latest fetch applies");
    assert_eq!(update.view.start_row, 2);
    assert_eq!(model.superseded(), 1);

    // The superseded fetch never produces a second update.
    assert!(model.wait().unwrap().is_none());
    assert!(model.poll().unwrap().is_none());
}

#[test]
fn late_superseded_response_is_discarded() {
    // Row 1 (offset 4) resolves long after row 2 (offset 8).
    let file = Arc::new(SlowFile::new(bytes(256)).with_delay(4, Duration::from_millis(150)));
    let (mut model, _) = loaded(4, 4, file.clone());

    model.scroll_by(1).unwrap();
    model.scroll_by(1).unwrap();
    let update = model.wait().unwrap().unwrap();
    assert_eq!(update.view.start_row, 2);

    // Let the slow read finish; its result has nowhere to land.
    std::thread::sleep(Duration::from_millis(250));
    assert!(model.poll().unwrap().is_none());
    assert_eq!(model.scroll().current_row(), 2);
    assert!(file.reads().contains(&(4, 16)));
}

#[test]
fn poll_applies_once_read_finishes() {
    let mut model = configured(2, 2);
    model
        .on_file_selected(Arc::new(MemoryFile::new("m", bytes(10))))
        .unwrap();

    let mut update = None;
    for _ in 0..200 {
        update = model.poll().unwrap();
        if update.is_some() {
            break;
        }
        std::thread::sleep(Duration::from_millis(5));
    }

    assert_eq!(update.map(|u| u.view.hex_glyphs), Some(vec![
        "00".to_string(),
        "01".to_string(),
        "02".to_string(),
        "03".to_string(),
    ]));
    assert!(!model.is_fetching());
}

#[test]
fn scroll_during_file_selection_targets_new_file() {
    let mut model = configured(4, 4);
    model
        .on_file_selected(Arc::new(MemoryFile::new("new", bytes(256))))
        .unwrap();

    // Scroll issued before the selection fetch resolves.
    model.scroll_by(3).unwrap();
    let update = model.wait().unwrap().unwrap();

    assert_eq!(update.view.start_row, 3);
    assert_eq!(model.phase(), Phase::Loaded);
    assert_eq!(model.loaded_len(), 256);
    assert_eq!(model.file_name(), Some("new"));
}

// ===== Resize =====

#[test]
fn resize_refetches_and_reclamps() {
    let (mut model, _) = loaded(4, 4, Arc::new(MemoryFile::new("m", bytes(64))));
    scroll_and_wait(&mut model, 12).unwrap();

    let ticket = model.configure(4, 8).unwrap().expect("resize refetches");
    let update = model.wait().unwrap().unwrap();

    // ceil(64 / 8) - 4 = 4
    assert_eq!(ticket.row(), 4);
    assert_eq!(update.reason, FetchReason::Resize);
    assert_eq!(model.scroll(), ScrollState::new(4, 4));
    assert_eq!(update.view.cols, 8);
    assert_eq!(update.view.hex_glyphs.len(), 32);
}

#[test]
fn failed_resize_keeps_geometry_and_scroll() {
    // The 2x10 window of a 20-byte file is read as (0, 20).
    let file = Arc::new(SlowFile::new(bytes(20)).with_failure(0, 20));
    let (mut model, _) = loaded(2, 2, file);
    scroll_and_wait(&mut model, 8).unwrap();
    assert_eq!(model.scroll(), ScrollState::new(8, 8));

    model.configure(2, 10).unwrap().expect("resize refetches");
    assert_eq!(model.requested_geometry(), Geometry::new(2, 10).ok());
    let result = model.wait();

    assert!(matches!(result, Err(ViewError::Fetch(_))));
    assert_eq!(model.geometry(), Geometry::new(2, 2).ok());
    assert_eq!(model.requested_geometry(), Geometry::new(2, 2).ok());
    assert_eq!(model.scroll(), ScrollState::new(8, 8));

    // Scrolling continues in the old geometry
    let update = scroll_and_wait(&mut model, -1).unwrap();
    assert_eq!(update.view.start_row, 7);
    assert_eq!(update.view.cols, 2);
    assert_eq!(update.view.offset, 14);
    assert_eq!(update.view.len(), 4);
    assert_eq!(model.scroll(), ScrollState::new(7, 8));
}

#[test]
fn failed_resize_can_be_retried() {
    let file = Arc::new(SlowFile::new(bytes(20)).with_failure(0, 20));
    let (mut model, _) = loaded(2, 2, file);
    model.configure(2, 10).unwrap();
    assert!(model.wait().is_err());

    let retry = model.configure(2, 10).unwrap();

    assert!(retry.is_some());
    assert_eq!(model.requested_geometry(), Geometry::new(2, 10).ok());
}

#[test]
fn scroll_during_resize_uses_new_geometry() {
    let (mut model, _) = loaded(4, 4, Arc::new(MemoryFile::new("m", bytes(256))));

    model.configure(4, 8).unwrap();
    let ticket = model.scroll_by(2).unwrap().expect("scroll fetches");
    let update = model.wait().unwrap().unwrap();

    assert_eq!(ticket.row(), 2);
    assert_eq!(update.view.offset, 16);
    assert_eq!(model.geometry(), Geometry::new(4, 8).ok());
    // ceil(256 / 8) - 4 = 28
    assert_eq!(model.scroll(), ScrollState::new(2, 28));
}

#[test]
fn unaddressable_row_is_reported_with_row_and_cols() {
    let mut model = configured(4, 4);
    let geometry = Geometry::new(4, 4).unwrap();

    let result = model.issue(
        FetchReason::Scroll,
        ScrollState::new(u64::MAX, u64::MAX),
        geometry,
        u64::MAX,
    );

    assert!(matches!(
        result,
        Err(ViewError::RowOutOfRange { row, cols: 4 }) if row == u64::MAX
    ));
    assert!(!model.is_fetching());
}

// ===== Highlight =====

#[test]
fn highlight_transitions() {
    let (mut model, _) = loaded(4, 4, Arc::new(MemoryFile::new("m", bytes(64))));

    let first = model.highlight(3);
    let second = model.highlight(7);

    assert_eq!(first.deselect, None);
    assert_eq!(second.deselect, Some(3));
    assert_eq!(model.highlight_state().selected(), Some(7));
}

#[test]
fn scroll_render_clears_highlight() {
    let (mut model, _) = loaded(4, 4, Arc::new(MemoryFile::new("m", bytes(64))));
    model.highlight(5);

    let update = scroll_and_wait(&mut model, 1).unwrap();

    assert_eq!(update.cleared_highlight, Some(5));
    assert_eq!(model.highlight_state().selected(), None);
}

#[test]
fn failed_scroll_keeps_highlight() {
    let mut model = configured(4, 4);
    model
        .on_file_selected(Arc::new(FlakyFile::new(bytes(64), usize::MAX)))
        .unwrap();
    let _ = model.wait();
    model.highlight(2);

    model
        .on_file_selected(Arc::new(FlakyFile::new(bytes(64), usize::MAX)))
        .unwrap();
    assert!(model.wait().is_err());

    assert_eq!(model.highlight_state().selected(), Some(2));
}

#[test]
fn move_highlight_walks_the_grid() {
    let (mut model, update) = loaded(4, 4, Arc::new(MemoryFile::new("m", bytes(64))));
    let len = update.view.len();

    let first = model.move_highlight(1, 0, len).unwrap();
    assert_eq!(first.select, 0);

    let down = model.move_highlight(0, 1, len).unwrap();
    assert_eq!(down.deselect, Some(0));
    assert_eq!(down.select, 4);

    assert_eq!(model.move_highlight(1, 0, len).map(|t| t.select), Some(5));
    assert_eq!(model.move_highlight(0, 0, 0), None);
}

#[test]
fn move_highlight_needs_geometry() {
    let mut model = ViewModel::new();
    assert_eq!(model.move_highlight(1, 0, 10), None);
}

#[test]
fn legend_offsets_follow_geometry() {
    let model = configured(3, 16);

    assert_eq!(model.legend_offsets(2), vec![32, 48, 64]);
    assert_eq!(model.legend_offsets(2), model.legend_offsets(2));
}
