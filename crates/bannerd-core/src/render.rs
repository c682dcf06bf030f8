//! Composition of input text into banners.

use crate::font::{GlyphTable, GLYPH_HEIGHT};

/// Render `text` as a banner using `table`.
///
/// Input is split into lines on `\n` only; a `\r` in user text is looked up
/// like any other character, never treated as a line break. (The font parser
/// accepts both terminators - the asymmetry is inherited behavior that
/// callers may depend on.)
///
/// Each non-empty input line expands to exactly [`GLYPH_HEIGHT`] output
/// lines, built row by row from the glyphs of its characters. Characters
/// absent from the table contribute nothing to their rows. An empty input
/// line becomes a single blank output line, not eight. Empty input renders
/// to the empty string.
///
/// Rendering never fails: against a partial or empty table the output just
/// goes sparse.
pub fn render(text: &str, table: &GlyphTable) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    for line in text.split('\n') {
        if line.is_empty() {
            // A blank input line stays one blank line.
            out.push('\n');
            continue;
        }
        for row in 0..GLYPH_HEIGHT {
            for ch in line.chars() {
                if let Some(glyph) = table.get(ch) {
                    out.push_str(glyph.row(row));
                }
            }
            out.push('\n');
        }
    }
    out
}
