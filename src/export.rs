//! Non-interactive rendering of a single window.
//!
//! Backs `--dump`: the first window of a file is fetched through the same
//! [`ViewModel`] the terminal front end uses, then written as text.

use crate::model::{Geometry, ViewError};
use crate::source::{ByteFile, ByteSource};
use crate::view_state::format::escape_html;
use crate::view_state::legend::format_offset;
use crate::view_state::{RenderedView, ViewModel};
use std::fmt::Write as _;
use std::sync::Arc;

/// Output format for `--dump`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DumpFormat {
    /// `xxd`-style lines: offset, hex glyphs, text glyphs.
    Plain,
    /// Span markup with per-byte ids.
    Html,
}

/// Fetch the first window of `file` and render it as `format`.
///
/// # Errors
///
/// Returns the fetch error if the window cannot be read.
pub fn dump(
    file: Arc<dyn ByteFile>,
    geometry: Geometry,
    io_retries: u32,
    format: DumpFormat,
) -> Result<String, ViewError> {
    let mut model = ViewModel::with_source(ByteSource::with_retries(io_retries));
    model.configure(geometry.rows(), geometry.cols())?;
    model.on_file_selected(file)?;

    let view = match model.wait()? {
        Some(update) => update.view,
        None => return Ok(String::new()),
    };

    Ok(match format {
        DumpFormat::Plain => to_plain(&view),
        DumpFormat::Html => to_html(&view),
    })
}

/// One line per populated row: `OFFSET: HEX  TEXT`.
///
/// The hex field is padded to full width so short final rows keep the text
/// column aligned. Rows past the end of the data are omitted.
pub fn to_plain(view: &RenderedView) -> String {
    let cols = usize::from(view.cols.max(1));
    let hex_width = cols * 3 - 1;

    view.hex_glyphs
        .chunks(cols)
        .zip(view.text_glyphs.chunks(cols))
        .zip(&view.legend_offsets)
        .map(|((hex, text), offset)| {
            let hex = hex.join(" ");
            let text: String = text.iter().collect();
            format!("{}: {hex:<hex_width$}  {text}", format_offset(*offset))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Legend, hex and text columns as three `<div>`s of spans.
///
/// Spans are numbered from 1 with prefixes `l`, `h` and `u`; a `<br>` follows
/// every `cols`-th span. Legend spans hold the decimal row offset. Text glyphs
/// are HTML-escaped.
pub fn to_html(view: &RenderedView) -> String {
    let cols = usize::from(view.cols.max(1));
    let legend: Vec<String> = view.legend_offsets.iter().map(u64::to_string).collect();
    let text: Vec<String> = view
        .text_glyphs
        .iter()
        .map(|glyph| escape_html(glyph.encode_utf8(&mut [0; 4])))
        .collect();

    [
        spans("legend", 'l', &legend, 1, ""),
        spans("hex", 'h', &view.hex_glyphs, cols, " "),
        spans("utf", 'u', &text, cols, ""),
    ]
    .join("\n")
}

fn spans(id: &str, prefix: char, glyphs: &[String], break_every: usize, separator: &str) -> String {
    let mut out = format!("<div id=\"{id}\">");
    for (i, glyph) in glyphs.iter().enumerate() {
        let n = i + 1;
        // Writing to a String cannot fail.
        let _ = write!(out, "<span id=\"{prefix}{n}\">{glyph}</span>");
        out.push_str(if n % break_every == 0 { "<br>" } else { separator });
    }
    out.push_str("</div>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ByteChunk;
    use crate::source::MemoryFile;
    use crate::view_state::ScrollState;

    fn view(bytes: &[u8], rows: u16, cols: u16) -> RenderedView {
        let geometry = Geometry::new(rows, cols).unwrap();
        RenderedView::build(
            &ByteChunk::new(0, bytes.to_vec()),
            ScrollState::new(0, 0),
            geometry,
        )
    }

    #[test]
    fn plain_pads_short_final_row() {
        let out = to_plain(&view(b"A<\n", 2, 2));

        assert_eq!(out, "00000000: 41 3C  A<\n00000002: 0A     .");
    }

    #[test]
    fn plain_of_empty_view_is_empty() {
        assert_eq!(to_plain(&view(b"", 3, 4)), "");
    }

    #[test]
    fn html_mirrors_span_layout() {
        let html = to_html(&view(b"A<\n", 2, 2));

        insta::assert_snapshot!(html, @r#"
        <div id="legend"><span id="l1">0</span><br><span id="l2">2</span><br></div>
        <div id="hex"><span id="h1">41</span> <span id="h2">3C</span><br><span id="h3">0A</span> </div>
        <div id="utf"><span id="u1">A</span><span id="u2">&lt;</span><br><span id="u3">.</span></div>
        "#);
    }

    #[test]
    fn html_legend_uses_decimal_offsets() {
        let geometry = Geometry::new(2, 16).unwrap();
        let rendered = RenderedView::build(
            &ByteChunk::new(160, vec![0; 32]),
            ScrollState::new(10, 20),
            geometry,
        );

        let html = to_html(&rendered);

        assert!(html.starts_with(
            r#"<div id="legend"><span id="l1">160</span><br><span id="l2">176</span><br></div>"#
        ));
    }

    #[test]
    fn html_escapes_every_special_character() {
        let html = to_html(&view(b"&\"<>", 1, 4));

        assert!(html.contains(r#"<span id="u1">&amp;</span>"#));
        assert!(html.contains(r#"<span id="u2">&quot;</span>"#));
        assert!(html.contains(r#"<span id="u3">&lt;</span>"#));
        assert!(html.contains(r#"<span id="u4">&gt;</span>"#));
    }

    #[test]
    fn dump_reads_only_the_first_window() {
        let bytes: Vec<u8> = (0u8..=255).collect();
        let file = Arc::new(MemoryFile::new("all.bin", bytes));
        let geometry = Geometry::new(2, 16).unwrap();

        let out = dump(file, geometry, 0, DumpFormat::Plain).unwrap();

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("00000000: 00 01 02"));
        assert!(lines[1].starts_with("00000010: 10 11 12"));
        assert!(lines[1].ends_with(".............."));
    }
}
