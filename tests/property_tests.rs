//! Property-based tests for glyph formatting and scroll invariants.
//!
//! Tests validate:
//! 1. Hex glyphs are two uppercase hex digits that parse back to the byte
//! 2. Both glyph sequences have exactly one glyph per byte
//! 3. Excluded bytes always map to the placeholder
//! 4. Legend offsets are `rows` long and step by `cols`
//! 5. Scrolling never leaves `[0, max_row]`

use hexview::model::Geometry;
use hexview::view_state::format::{format_hex, format_text, is_displayable, text_glyph, PLACEHOLDER};
use hexview::view_state::legend::legend_offsets;
use hexview::view_state::scroll::max_row;
use hexview::view_state::ScrollState;
use proptest::prelude::*;

fn arb_geometry() -> impl Strategy<Value = Geometry> {
    (1u16..=64, 1u16..=64).prop_map(|(rows, cols)| Geometry::new(rows, cols).unwrap())
}

// ===== Property 1-3: Glyph Formatting =====

proptest! {
    #[test]
    fn hex_glyph_is_two_uppercase_digits(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        for (glyph, byte) in format_hex(&bytes).iter().zip(&bytes) {
            prop_assert_eq!(glyph.len(), 2);
            prop_assert!(glyph.chars().all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
            prop_assert_eq!(u8::from_str_radix(glyph, 16).unwrap(), *byte);
        }
    }

    #[test]
    fn glyph_sequences_are_length_preserving(bytes in prop::collection::vec(any::<u8>(), 0..1024)) {
        prop_assert_eq!(format_hex(&bytes).len(), bytes.len());
        prop_assert_eq!(format_text(&bytes).len(), bytes.len());
    }

    #[test]
    fn excluded_bytes_map_to_placeholder(byte in any::<u8>()) {
        let excluded = byte <= 0x1F
            || (0x7F..=0xA0).contains(&byte)
            || char::from(byte).is_whitespace();
        prop_assert_eq!(is_displayable(byte), !excluded);
        if excluded {
            prop_assert_eq!(text_glyph(byte), PLACEHOLDER);
        } else {
            prop_assert_eq!(text_glyph(byte), char::from(byte));
        }
    }
}

// ===== Property 4: Legend =====

proptest! {
    #[test]
    fn legend_is_rows_long_and_steps_by_cols(
        geometry in arb_geometry(),
        starting_row in 0u64..1_000_000,
    ) {
        let offsets = legend_offsets(starting_row, geometry);
        let cols = u64::from(geometry.cols());

        prop_assert_eq!(offsets.len(), usize::from(geometry.rows()));
        prop_assert_eq!(offsets[0], starting_row * cols);
        for pair in offsets.windows(2) {
            prop_assert_eq!(pair[1] - pair[0], cols);
        }
    }
}

// ===== Property 5: Scroll Clamping =====

proptest! {
    #[test]
    fn scroll_stays_within_bounds(
        geometry in arb_geometry(),
        file_len in 0u64..100_000,
        deltas in prop::collection::vec(-50i64..50, 0..40),
    ) {
        let mut state = ScrollState::for_file(file_len, geometry);
        let max = max_row(file_len, geometry);
        prop_assert_eq!(state.max_row(), max);

        for delta in deltas {
            if let Some(next) = state.scrolled_by(delta) {
                prop_assert_ne!(next.current_row(), state.current_row());
                state = next;
            }
            prop_assert!(state.current_row() <= max);
        }
    }

    #[test]
    fn max_row_leaves_last_window_full_or_at_top(
        geometry in arb_geometry(),
        file_len in 0u64..100_000,
    ) {
        let max = max_row(file_len, geometry);
        let rows_in_file = file_len.div_ceil(u64::from(geometry.cols()));
        if max > 0 {
            prop_assert_eq!(max + u64::from(geometry.rows()), rows_in_file);
        } else {
            prop_assert!(rows_in_file <= u64::from(geometry.rows()));
        }
    }
}
