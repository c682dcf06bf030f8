//! Request handlers for the banner routes.
//!
//! Handlers are synchronous: every route is a short burst of file I/O plus
//! pure rendering, and the accept loop already isolates connections from
//! each other.

use crate::error::{Result, WebError};
use crate::http::{Request, Response, Status};
use crate::server::AppState;
use crate::templates::html_escape;

/// `GET /` - the banner form, with the font select populated from the
/// fonts directory.
pub fn index(state: &AppState) -> Result<Response> {
    let options: String = state
        .fonts
        .list()
        .iter()
        .map(|name| {
            let name = html_escape(name);
            let selected = if name == state.default_font {
                " selected"
            } else {
                ""
            };
            format!("<option value=\"{}\"{}>{}</option>\n", name, selected, name)
        })
        .collect();

    let page = state
        .templates
        .render("index.html", &[("font_options", &options)])?;
    Ok(Response::html(Status::Ok, page))
}

/// `POST /ascii-art` - render the submitted text in the chosen font and
/// persist the result for download.
pub fn ascii_art(request: &Request, state: &AppState) -> Result<Response> {
    let form = request.form();
    let font = form.get("banner").cloned().unwrap_or_default();
    let text = form.get("request").cloned().unwrap_or_default();

    let table = state.fonts.table(&font)?;
    let banner = bannerd_core::render(&text, &table);
    state.outputs.write_banner(&banner)?;

    tracing::info!(font = %font, input_chars = text.chars().count(), "banner rendered");

    let page = state
        .templates
        .render("result.html", &[("banner", &html_escape(&banner))])?;
    Ok(Response::html(Status::Ok, page))
}

/// `POST /download` - serve the persisted banner as a plain-text or zip
/// attachment, chosen by the `format` form field.
pub fn download(request: &Request, state: &AppState) -> Result<Response> {
    let form = request.form();
    match form.get("format").map(String::as_str) {
        Some("zip") => {
            let archive = state.outputs.build_archive()?;
            Ok(Response::attachment(
                archive,
                "application/zip",
                &state.outputs.archive_name(),
            ))
        }
        Some("text") => {
            let banner = state.outputs.read_banner()?;
            Ok(Response::attachment(
                banner,
                "text/plain",
                &state.outputs.output_name(),
            ))
        }
        other => Err(WebError::FormatNotFound(
            other.unwrap_or_default().to_string(),
        )),
    }
}

/// `GET /static/<file>` - assets referenced by the templates.
pub fn static_file(path: &str, state: &AppState) -> Result<Response> {
    let rest = path.strip_prefix("/static/").unwrap_or_default();
    if rest.is_empty()
        || rest
            .split('/')
            .any(|part| part.is_empty() || part == "." || part == "..")
    {
        return Err(WebError::BadRequest(format!("invalid static path: {}", path)));
    }

    let full = state.static_dir.join(rest);
    let body = std::fs::read(&full).map_err(|_| WebError::NotFound(path.to_string()))?;
    Ok(Response::file(body, content_type_for(rest)))
}

fn content_type_for(path: &str) -> &'static str {
    match path.rsplit('.').next() {
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css",
        Some("js") => "text/javascript",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

/// Render the error page for `err`.
///
/// Falls back to a bare inline page when even the error template is
/// unreadable, so a misconfigured template directory still produces the
/// right status code.
pub fn error_page(state: &AppState, err: &WebError) -> Response {
    let status = err.status();
    let message = err.page_message();
    tracing::debug!(error = %err, code = status.code(), "request failed");

    match state.templates.render("error.html", &[("message", message)]) {
        Ok(page) => Response::html(status, page),
        Err(_) => Response::html(status, format!("<h1>{}</h1>", message)),
    }
}
