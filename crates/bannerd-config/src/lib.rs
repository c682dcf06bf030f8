//! # bannerd Configuration
//!
//! Configuration sources (in priority order):
//! 1. CLI argument overrides (applied by the binary)
//! 2. Environment variables (`BANNERD_*`)
//! 3. Config file (`bannerd.toml` next to the binary, or `--config <path>`)
//! 4. Built-in defaults

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for configuration loading
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Figment extraction failed (bad TOML, wrong types, invalid values)
    #[error("Failed to load configuration: {0}")]
    Extract(#[from] figment::Error),
}

/// Default config file name, resolved relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "bannerd.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings
    pub server: ServerConfig,
    /// Filesystem locations
    pub paths: PathsConfig,
    /// Rendering behavior
    pub render: RenderConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// Socket address to bind the listener to
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Filesystem locations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory holding banner font descriptions (`<name>.txt`)
    pub fonts_dir: PathBuf,
    /// Directory holding the HTML templates
    pub templates_dir: PathBuf,
    /// Directory served under `/static/`
    pub static_dir: PathBuf,
    /// File the last rendered banner is persisted to
    pub output_file: PathBuf,
    /// File the zip archive is persisted to
    pub archive_file: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            fonts_dir: PathBuf::from("fonts"),
            templates_dir: PathBuf::from("templates"),
            static_dir: PathBuf::from("static"),
            output_file: PathBuf::from("data.txt"),
            archive_file: PathBuf::from("archive.zip"),
        }
    }
}

/// Rendering behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Font preselected in the web form
    pub default_font: String,
    /// Cache parsed glyph tables per font name. Font files are treated as
    /// immutable for the process lifetime, so this does not change
    /// observable output; disable to re-parse on every request.
    pub cache_tables: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            default_font: "standard".to_string(),
            cache_tables: true,
        }
    }
}

impl Config {
    /// Load configuration, layering the file at `path` (or
    /// [`DEFAULT_CONFIG_FILE`] when absent) and `BANNERD_*` environment
    /// variables over the defaults. A missing file is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));

        let figment = Figment::new()
            .merge(Toml::file(file))
            .merge(Env::prefixed("BANNERD_"));

        let config: Config = figment.extract()?;
        tracing::debug!(file = %file.display(), "configuration loaded");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.bind_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.paths.fonts_dir, PathBuf::from("fonts"));
        assert_eq!(config.render.default_font, "standard");
        assert!(config.render.cache_tables);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("[server]"));
        assert!(toml.contains("[paths]"));
        assert!(toml.contains("[render]"));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = Config::load(Some(Path::new("/nonexistent/bannerd.toml"))).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[server]\nport = 9999\n\n[render]\ndefault_font = \"shadow\"\ncache_tables = false\n"
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.server.port, 9999);
        assert_eq!(config.render.default_font, "shadow");
        assert!(!config.render.cache_tables);
        // Untouched sections keep their defaults.
        assert_eq!(config.paths.output_file, PathBuf::from("data.txt"));
    }
}
