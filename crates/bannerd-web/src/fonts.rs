//! Font lookup and caching.
//!
//! Fonts live in one flat directory, a description file per banner style
//! (`standard.txt`, `shadow.txt`, ...). The store maps a bare font name to
//! its raw description and, on demand, to a parsed glyph table. Tables are
//! cached read-through when enabled - font files are treated as immutable
//! for the process lifetime, so a cache hit renders identically to a fresh
//! parse.

use crate::error::{Result, WebError};
use bannerd_core::{parse_font, GlyphTable};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

/// Supplies font descriptions by name.
pub struct FontStore {
    dir: PathBuf,
    cache_enabled: bool,
    cache: RwLock<HashMap<String, Arc<GlyphTable>>>,
}

impl FontStore {
    pub fn new(dir: impl Into<PathBuf>, cache_enabled: bool) -> Self {
        Self {
            dir: dir.into(),
            cache_enabled,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Raw description text for `name`.
    ///
    /// Any failure to produce the bytes - unknown name, unreadable file,
    /// a name trying to escape the fonts directory - is the same outcome
    /// for the caller: no such banner font.
    pub fn load_raw(&self, name: &str) -> Result<String> {
        if name.is_empty() || name.contains(['/', '\\']) || name.contains("..") {
            return Err(WebError::FontNotFound(name.to_string()));
        }
        let path = self.dir.join(format!("{}.txt", name));
        std::fs::read_to_string(&path).map_err(|e| {
            tracing::debug!(font = name, error = %e, "font description unreadable");
            WebError::FontNotFound(name.to_string())
        })
    }

    /// Parsed glyph table for `name`, read-through cached when enabled.
    pub fn table(&self, name: &str) -> Result<Arc<GlyphTable>> {
        if self.cache_enabled {
            if let Some(table) = self.cache.read().get(name) {
                return Ok(Arc::clone(table));
            }
        }

        let table = Arc::new(parse_font(&self.load_raw(name)?));

        if self.cache_enabled {
            self.cache
                .write()
                .insert(name.to_string(), Arc::clone(&table));
        }
        Ok(table)
    }

    /// Names of all fonts in the directory, sorted.
    pub fn list(&self) -> Vec<String> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(dir = %self.dir.display(), error = %e, "cannot list fonts");
                return Vec::new();
            }
        };

        let mut names: Vec<String> = entries
            .flatten()
            .filter_map(|entry| {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "txt") {
                    path.file_stem()
                        .and_then(|stem| stem.to_str())
                        .map(String::from)
                } else {
                    None
                }
            })
            .collect();
        names.sort();
        names
    }
}
