//! Banner font parsing.
//!
//! A banner font is a plain-text description of one glyph per printable
//! character: exactly [`GLYPH_HEIGHT`] rows of "pixels" (arbitrary
//! characters), with a blank line between glyphs. The format carries no
//! character labels; glyphs are assigned to code points purely by their
//! position in the file, starting at [`FIRST_CODE_POINT`].

use std::collections::HashMap;

/// Number of pixel rows in every glyph.
pub const GLYPH_HEIGHT: usize = 8;

/// Code point assigned to the first glyph in a font description.
pub const FIRST_CODE_POINT: char = ' ';

/// The eight-row pixel representation of a single character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    rows: Vec<String>,
}

impl Glyph {
    /// One row of the glyph, top to bottom.
    ///
    /// # Panics
    ///
    /// Panics if `index >= GLYPH_HEIGHT`; sealed glyphs always hold exactly
    /// [`GLYPH_HEIGHT`] rows.
    pub fn row(&self, index: usize) -> &str {
        &self.rows[index]
    }

    /// All rows, top to bottom.
    pub fn rows(&self) -> &[String] {
        &self.rows
    }
}

/// Character-to-glyph mapping built from one font description.
///
/// Keys run in ascending code-point order from [`FIRST_CODE_POINT`] with no
/// gaps, regardless of which characters the font file "intends" to draw: the
/// mapping is positional, driven only by glyph order in the source.
#[derive(Debug, Clone, Default)]
pub struct GlyphTable {
    glyphs: HashMap<char, Glyph>,
}

impl GlyphTable {
    /// Glyph for `ch`, if the font got far enough to define one.
    pub fn get(&self, ch: char) -> Option<&Glyph> {
        self.glyphs.get(&ch)
    }

    /// Whether `ch` has a glyph.
    pub fn contains(&self, ch: char) -> bool {
        self.glyphs.contains_key(&ch)
    }

    /// Number of glyphs in the table.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// True if the font description yielded no complete glyph at all.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

/// Parse a font description into a glyph table.
///
/// The scanner walks the input character by character, treating both `\n`
/// and `\r` as line terminators. Rows of more than one character are glyph
/// content; rows of zero or one character are the inter-glyph separator
/// convention and are dropped. Every eighth committed row seals a glyph
/// under the next code point.
///
/// Parsing never fails: a truncated or malformed description just yields a
/// table missing its tail. A trailing glyph with fewer than eight rows is
/// silently dropped.
pub fn parse_font(raw: &str) -> GlyphTable {
    let mut glyphs = HashMap::new();
    let mut code_point = FIRST_CODE_POINT as u32;
    let mut rows: Vec<String> = Vec::with_capacity(GLYPH_HEIGHT);
    let mut row = String::new();
    let mut row_len = 0usize;

    for ch in raw.chars() {
        if ch != '\n' && ch != '\r' {
            row.push(ch);
            row_len += 1;
            continue;
        }

        // Line terminator. Anything shorter than two characters is a
        // separator line, not glyph content.
        if row_len > 1 {
            rows.push(std::mem::take(&mut row));
        } else {
            row.clear();
        }
        row_len = 0;

        if rows.len() == GLYPH_HEIGHT {
            let glyph = Glyph {
                rows: std::mem::take(&mut rows),
            };
            // Past U+D7FF a counter value may not be a valid scalar; the
            // glyph is still consumed so positions stay aligned.
            if let Some(key) = char::from_u32(code_point) {
                glyphs.insert(key, glyph);
            }
            code_point += 1;
            rows = Vec::with_capacity(GLYPH_HEIGHT);
        }
    }

    tracing::debug!(glyphs = glyphs.len(), "parsed font description");
    GlyphTable { glyphs }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Build a description with one 8-row glyph per pattern, rows "p0".."p7".
    fn description(patterns: &[&str]) -> String {
        let mut out = String::new();
        for pattern in patterns {
            for i in 0..GLYPH_HEIGHT {
                out.push_str(&format!("{}{}\n", pattern, i));
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_positional_keys_from_space() {
        let table = parse_font(&description(&["aa", "bb", "cc"]));
        assert_eq!(table.len(), 3);
        assert!(table.contains(' '));
        assert!(table.contains('!'));
        assert!(table.contains('"'));
        assert!(!table.contains('#'));
        assert_eq!(table.get('!').unwrap().row(0), "bb0");
        assert_eq!(table.get('!').unwrap().row(7), "bb7");
    }

    #[test]
    fn test_empty_input_yields_empty_table() {
        assert!(parse_font("").is_empty());
        assert!(parse_font("\n\n\n").is_empty());
    }

    #[test]
    fn test_trailing_partial_glyph_is_dropped() {
        let mut raw = description(&["aa"]);
        raw.push_str("xx\nxx\nxx\n");
        let table = parse_font(&raw);
        assert_eq!(table.len(), 1);
        assert!(table.contains(' '));
        assert!(!table.contains('!'));
    }

    #[test]
    fn test_unterminated_final_row_is_dropped() {
        // Seven terminated rows plus one with no trailing newline: the
        // eighth row never commits, so no glyph is sealed.
        let raw = "aa\naa\naa\naa\naa\naa\naa\naa";
        assert!(parse_font(raw).is_empty());
    }

    #[test]
    fn test_single_character_rows_are_separators() {
        // A stray one-character line between rows is discarded without
        // breaking the glyph that surrounds it.
        let raw = "aa\naa\nx\naa\naa\naa\naa\naa\naa\n";
        let table = parse_font(raw);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(' ').unwrap().row(2), "aa");
    }

    #[test]
    fn test_carriage_return_terminates_rows() {
        let unix = description(&["##", "@@"]);
        let dos = unix.replace('\n', "\r\n");
        let mac = unix.replace('\n', "\r");

        for raw in [dos, mac] {
            let table = parse_font(&raw);
            assert_eq!(table.len(), 2);
            assert_eq!(table.get('!').unwrap().row(0), "@@0");
        }
    }

    #[test]
    fn test_eight_k_rows_yield_k_glyphs() {
        let patterns: Vec<String> = (0..16).map(|i| format!("g{:02}", i)).collect();
        let refs: Vec<&str> = patterns.iter().map(String::as_str).collect();
        let table = parse_font(&description(&refs));
        assert_eq!(table.len(), 16);
        for offset in 0..16u32 {
            let key = char::from_u32(FIRST_CODE_POINT as u32 + offset).unwrap();
            assert!(table.contains(key), "missing key at offset {}", offset);
        }
    }

    #[test]
    fn test_rows_keep_leading_and_trailing_pixels() {
        let raw = "  ##  \n######\n  ##  \n  ##  \n  ##  \n  ##  \n  ##  \n      \n";
        let table = parse_font(raw);
        let glyph = table.get(' ').unwrap();
        assert_eq!(glyph.row(0), "  ##  ");
        assert_eq!(glyph.row(7), "      ");
    }
}
