//! HTML template loading and rendering.
//!
//! Templates are read from disk on every request: a missing or unreadable
//! template is a request-time 404, not a startup failure, so pages can be
//! edited under a running server. Substitution is plain `{{name}}`
//! replacement; the only dynamic content is the banner itself and the error
//! message, both escaped before insertion.

use crate::error::{Result, WebError};
use std::path::PathBuf;

/// Loads and renders the HTML templates.
pub struct Templates {
    dir: PathBuf,
}

impl Templates {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Load `name` from the template directory and substitute every
    /// `{{key}}` placeholder.
    pub fn render(&self, name: &str, vars: &[(&str, &str)]) -> Result<String> {
        let path = self.dir.join(name);
        let mut page = std::fs::read_to_string(&path).map_err(|e| {
            tracing::debug!(template = name, error = %e, "template unreadable");
            WebError::TemplateNotFound(name.to_string())
        })?;

        for (key, value) in vars {
            page = page.replace(&format!("{{{{{}}}}}", key), value);
        }
        Ok(page)
    }
}

/// Escape text for inclusion in HTML content.
pub fn html_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
