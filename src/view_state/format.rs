//! Byte-to-glyph formatting for the hex and text columns.
//!
//! Both mappings are total over `u8` and length-preserving: one glyph per byte.

/// Glyph substituted for bytes that have no printable representation.
pub const PLACEHOLDER: char = '.';

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Two-character, zero-padded, uppercase hex for one byte (`0x0A` → `"0A"`).
pub fn hex_glyph(byte: u8) -> String {
    let mut glyph = String::with_capacity(2);
    glyph.push(char::from(HEX_DIGITS[usize::from(byte >> 4)]));
    glyph.push(char::from(HEX_DIGITS[usize::from(byte & 0x0F)]));
    glyph
}

/// Hex glyphs for every byte in `bytes`, in order.
pub fn format_hex(bytes: &[u8]) -> Vec<String> {
    bytes.iter().copied().map(hex_glyph).collect()
}

/// Whether `byte` is shown as itself in the text column.
///
/// Bytes are read as Latin-1 code points. Excluded: C0 controls `0x00–0x1F`,
/// DEL and C1 controls through NBSP `0x7F–0xA0`, and whitespace.
pub fn is_displayable(byte: u8) -> bool {
    let excluded =
        byte <= 0x1F || (0x7F..=0xA0).contains(&byte) || char::from(byte).is_whitespace();
    !excluded
}

/// Text-column glyph for one byte.
pub fn text_glyph(byte: u8) -> char {
    if is_displayable(byte) {
        char::from(byte)
    } else {
        PLACEHOLDER
    }
}

/// Text glyphs for every byte in `bytes`, in order.
pub fn format_text(bytes: &[u8]) -> Vec<char> {
    bytes.iter().copied().map(text_glyph).collect()
}

/// Escape `&`, `"`, `<` and `>` for embedding glyphs in HTML markup.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            other => escaped.push(other),
        }
    }
    escaped
}
