//! # bannerd Core
//!
//! The banner rendering engine for bannerd.
//!
//! This crate provides:
//! - Banner font parsing (blank-line-delimited, eight-row glyph descriptions)
//! - Positional glyph tables starting at U+0020
//! - Composition of input text into multi-line banners
//!
//! Both entry points are pure functions over their inputs: parsing degrades
//! to a partial table on malformed data and rendering degrades to sparse
//! output on unknown characters. Neither can fail.

pub mod font;
pub mod render;

pub use font::{parse_font, Glyph, GlyphTable, FIRST_CODE_POINT, GLYPH_HEIGHT};
pub use render::render;

/// Core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
