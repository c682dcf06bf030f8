//! Error types for the bannerd web layer

use crate::http::Status;
use thiserror::Error;

/// Result type for web-layer operations
pub type Result<T> = std::result::Result<T, WebError>;

/// Web-layer error types
///
/// The rendering core never fails; every fault here belongs to the plumbing
/// around it and maps onto a user-facing status page.
#[derive(Error, Debug)]
pub enum WebError {
    /// No description file for the requested font
    #[error("Banner font not found: {0}")]
    FontNotFound(String),

    /// Template missing or unreadable
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    /// Unknown download format
    #[error("Download format not found: {0}")]
    FormatNotFound(String),

    /// Static asset missing
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed or unsupported request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl WebError {
    /// HTTP status this error maps to.
    pub fn status(&self) -> Status {
        match self {
            WebError::FontNotFound(_)
            | WebError::TemplateNotFound(_)
            | WebError::FormatNotFound(_)
            | WebError::NotFound(_) => Status::NotFound,
            WebError::BadRequest(_) => Status::BadRequest,
            WebError::Io(_) => Status::InternalServerError,
        }
    }

    /// Message shown on the error page.
    pub fn page_message(&self) -> &'static str {
        match self {
            WebError::FontNotFound(_) => "404 BANNER NOT FOUND",
            WebError::TemplateNotFound(_) => "404 TEMPLATE NOT FOUND",
            WebError::FormatNotFound(_) => "404 FORMAT NOT FOUND",
            WebError::NotFound(_) => "404 NOT FOUND",
            WebError::BadRequest(_) => "400 BAD REQUEST",
            WebError::Io(_) => "500 INTERNAL SERVER ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            WebError::FontNotFound("x".into()).status(),
            Status::NotFound
        );
        assert_eq!(
            WebError::BadRequest("x".into()).status(),
            Status::BadRequest
        );
        let io = WebError::Io(std::io::Error::new(std::io::ErrorKind::Other, "boom"));
        assert_eq!(io.status(), Status::InternalServerError);
    }

    #[test]
    fn test_page_messages() {
        assert_eq!(
            WebError::FormatNotFound("tar".into()).page_message(),
            "404 FORMAT NOT FOUND"
        );
        assert_eq!(
            WebError::TemplateNotFound("index.html".into()).page_message(),
            "404 TEMPLATE NOT FOUND"
        );
    }
}
