//! HTTP server: accept loop and request dispatch.

use crate::error::WebError;
use crate::fonts::FontStore;
use crate::handlers;
use crate::http::{Request, RequestParser, Response};
use crate::storage::OutputStore;
use crate::templates::Templates;
use bannerd_config::Config;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpListener;

/// Shared state every request handler sees.
///
/// All fields are either immutable after startup or internally synchronized
/// (the font store's table cache), so a plain `Arc` is enough.
pub struct AppState {
    pub fonts: FontStore,
    pub outputs: OutputStore,
    pub templates: Templates,
    pub static_dir: PathBuf,
    pub default_font: String,
}

impl AppState {
    pub fn from_config(config: &Config) -> Self {
        Self {
            fonts: FontStore::new(&config.paths.fonts_dir, config.render.cache_tables),
            outputs: OutputStore::new(&config.paths.output_file, &config.paths.archive_file),
            templates: Templates::new(&config.paths.templates_dir),
            static_dir: config.paths.static_dir.clone(),
            default_font: config.render.default_font.clone(),
        }
    }
}

/// The banner web server.
pub struct BannerServer {
    config: Config,
    state: Arc<AppState>,
}

impl BannerServer {
    pub fn new(config: Config) -> Self {
        let state = Arc::new(AppState::from_config(&config));
        Self { config, state }
    }

    /// Bind and serve until the process is terminated.
    pub async fn run(&self) -> std::io::Result<()> {
        let addr = self.config.server.bind_addr();
        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Listening on http://{}", addr);

        loop {
            let (stream, peer) = listener.accept().await?;
            let state = Arc::clone(&self.state);
            tokio::spawn(async move {
                if let Err(e) = handle_connection(stream, state).await {
                    tracing::debug!(peer = %peer, error = %e, "connection ended");
                }
            });
        }
    }
}

/// Serve one connection: read a request, dispatch it, write the response.
pub async fn handle_connection<S>(mut stream: S, state: Arc<AppState>) -> std::io::Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut parser = RequestParser::new();
    let mut buf = [0u8; 4096];

    let request = loop {
        let n = stream.read(&mut buf).await?;
        if n == 0 {
            // Peer went away before sending a full request.
            return Ok(());
        }
        parser.feed(&buf[..n]);
        match parser.try_parse() {
            Ok(Some(request)) => break request,
            Ok(None) => continue,
            Err(e) => {
                let err = WebError::BadRequest(e.to_string());
                let response = handlers::error_page(&state, &err);
                stream.write_all(&response.to_bytes()).await?;
                return stream.shutdown().await;
            }
        }
    };

    let response = route(&request, &state);
    stream.write_all(&response.to_bytes()).await?;
    stream.shutdown().await
}

/// Dispatch a parsed request and map handler errors onto status pages.
pub fn route(request: &Request, state: &AppState) -> Response {
    // The banner forms never carry a query string; strip one anyway so
    // hand-typed URLs still match their route.
    let path = request.path.split('?').next().unwrap_or("");

    let result = match (request.method.as_str(), path) {
        ("GET", "/") => handlers::index(state),
        ("POST", "/ascii-art") => handlers::ascii_art(request, state),
        ("POST", "/download") => handlers::download(request, state),
        ("GET", p) if p.starts_with("/static/") => handlers::static_file(p, state),
        // Unknown paths and wrong methods on known paths are both client
        // errors.
        (method, p) => Err(WebError::BadRequest(format!("{} {}", method, p))),
    };

    let response = match result {
        Ok(response) => response,
        Err(err) => handlers::error_page(state, &err),
    };

    tracing::info!(
        method = %request.method,
        path = %request.path,
        status = response.status().code(),
        "request"
    );
    response
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::fs;

    /// A workspace on disk with one two-glyph font ("standard": space
    /// renders "..", '!' renders "XX"), a markup-heavy font ("spiky"),
    /// the three templates and one static asset.
    pub(crate) fn test_state() -> (tempfile::TempDir, AppState) {
        let dir = tempfile::tempdir().unwrap();
        let fonts = dir.path().join("fonts");
        let templates = dir.path().join("templates");
        let statics = dir.path().join("static");
        fs::create_dir_all(&fonts).unwrap();
        fs::create_dir_all(&templates).unwrap();
        fs::create_dir_all(&statics).unwrap();

        let mut standard = String::new();
        for _ in 0..8 {
            standard.push_str("..\n");
        }
        standard.push('\n');
        for _ in 0..8 {
            standard.push_str("XX\n");
        }
        standard.push('\n');
        fs::write(fonts.join("standard.txt"), standard).unwrap();

        let spiky = "<>\n".repeat(8) + "\n";
        fs::write(fonts.join("spiky.txt"), spiky).unwrap();

        fs::write(templates.join("index.html"), "<form>{{font_options}}</form>").unwrap();
        fs::write(templates.join("result.html"), "<pre>{{banner}}</pre>").unwrap();
        fs::write(templates.join("error.html"), "<h1>{{message}}</h1>").unwrap();
        fs::write(statics.join("style.css"), "pre { margin: 0; }").unwrap();

        let state = AppState {
            fonts: FontStore::new(&fonts, true),
            outputs: OutputStore::new(dir.path().join("data.txt"), dir.path().join("archive.zip")),
            templates: Templates::new(&templates),
            static_dir: statics,
            default_font: "standard".to_string(),
        };
        (dir, state)
    }

    pub(crate) fn get(path: &str) -> Request {
        Request {
            method: "GET".to_string(),
            path: path.to_string(),
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    pub(crate) fn post(path: &str, body: &str) -> Request {
        Request {
            method: "POST".to_string(),
            path: path.to_string(),
            headers: vec![(
                "Content-Type".to_string(),
                "application/x-www-form-urlencoded".to_string(),
            )],
            body: body.as_bytes().to_vec(),
        }
    }
}
