//! Minimal HTTP/1.1 message handling.
//!
//! Parses request messages out of a byte buffer and builds response messages
//! as raw bytes - just enough protocol for the banner front end: request
//! line, headers, Content-Length bodies and urlencoded forms. No chunked
//! encoding, no keep-alive; every response closes the connection.

use std::collections::HashMap;
use thiserror::Error;

/// Upper bound on the request head (request line plus headers).
const MAX_HEAD_SIZE: usize = 16 * 1024;
/// Upper bound on request bodies.
const MAX_BODY_SIZE: usize = 1024 * 1024;

/// HTTP message errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HttpError {
    /// Request line was not `METHOD target HTTP/x.y`
    #[error("invalid request line")]
    InvalidRequestLine,

    /// Header line without a colon
    #[error("invalid header")]
    InvalidHeader,

    /// Head or body exceeded its size limit
    #[error("message too large")]
    TooLarge,
}

/// A parsed HTTP request.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: String,
    /// Request target as sent, including any query string.
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Request {
    /// Header value by name (case-insensitive, first match).
    pub fn header(&self, name: &str) -> Option<&str> {
        let lower = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(k, _)| k.to_ascii_lowercase() == lower)
            .map(|(_, v)| v.as_str())
    }

    /// Decode the body as an `application/x-www-form-urlencoded` form.
    ///
    /// Tolerant by construction: stray pairs without `=` become empty
    /// values, invalid percent escapes pass through literally.
    pub fn form(&self) -> HashMap<String, String> {
        parse_form(&self.body)
    }
}

/// Incremental request parser: feed bytes as they arrive, then try to parse.
#[derive(Debug, Default)]
pub struct RequestParser {
    buf: Vec<u8>,
}

impl RequestParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append data to the internal buffer.
    pub fn feed(&mut self, data: &[u8]) {
        self.buf.extend_from_slice(data);
    }

    /// Try to parse a complete request from the buffered data.
    ///
    /// Returns `Ok(Some(request))` once the head and the full
    /// Content-Length body have arrived, `Ok(None)` if more data is needed,
    /// or `Err` on a malformed or oversized message.
    pub fn try_parse(&self) -> Result<Option<Request>, HttpError> {
        let head_end = match find_head_end(&self.buf) {
            Some(pos) => pos,
            None => {
                if self.buf.len() > MAX_HEAD_SIZE {
                    return Err(HttpError::TooLarge);
                }
                return Ok(None);
            }
        };
        if head_end > MAX_HEAD_SIZE {
            return Err(HttpError::TooLarge);
        }

        let head = String::from_utf8_lossy(&self.buf[..head_end]);
        let mut lines = head.split("\r\n");

        let request_line = lines.next().ok_or(HttpError::InvalidRequestLine)?;
        let (method, path) = parse_request_line(request_line)?;
        let headers = parse_headers(lines)?;

        let body_len = content_length(&headers).unwrap_or(0);
        if body_len > MAX_BODY_SIZE {
            return Err(HttpError::TooLarge);
        }

        let body_start = head_end + 4;
        if self.buf.len() < body_start + body_len {
            return Ok(None);
        }

        Ok(Some(Request {
            method,
            path,
            headers,
            body: self.buf[body_start..body_start + body_len].to_vec(),
        }))
    }
}

/// Byte offset of the `\r\n\r\n` separating head from body.
fn find_head_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

fn parse_request_line(line: &str) -> Result<(String, String), HttpError> {
    let mut parts = line.split_whitespace();
    let method = parts.next().ok_or(HttpError::InvalidRequestLine)?;
    let target = parts.next().ok_or(HttpError::InvalidRequestLine)?;
    let version = parts.next().ok_or(HttpError::InvalidRequestLine)?;
    if !version.starts_with("HTTP/") || parts.next().is_some() {
        return Err(HttpError::InvalidRequestLine);
    }
    Ok((method.to_string(), target.to_string()))
}

fn parse_headers<'a, I>(lines: I) -> Result<Vec<(String, String)>, HttpError>
where
    I: Iterator<Item = &'a str>,
{
    let mut headers = Vec::new();
    for line in lines {
        if line.is_empty() {
            continue;
        }
        let (name, value) = line.split_once(':').ok_or(HttpError::InvalidHeader)?;
        headers.push((name.trim().to_string(), value.trim().to_string()));
    }
    Ok(headers)
}

fn content_length(headers: &[(String, String)]) -> Option<usize> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse().ok())
}

/// Decode an `application/x-www-form-urlencoded` body into key/value pairs.
pub fn parse_form(body: &[u8]) -> HashMap<String, String> {
    let text = String::from_utf8_lossy(body);
    let mut form = HashMap::new();
    for pair in text.split('&') {
        if pair.is_empty() {
            continue;
        }
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        form.insert(form_decode(key), form_decode(value));
    }
    form
}

/// Decode one form component: `+` is a space, `%XX` is a byte escape.
fn form_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                match (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                    (Some(hi), Some(lo)) => {
                        out.push(hi << 4 | lo);
                        i += 3;
                    }
                    // Invalid escape passes through literally.
                    _ => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Status codes the banner service emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    BadRequest,
    NotFound,
    InternalServerError,
}

impl Status {
    pub fn code(self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::BadRequest => 400,
            Status::NotFound => 404,
            Status::InternalServerError => 500,
        }
    }

    pub fn reason(self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::BadRequest => "Bad Request",
            Status::NotFound => "Not Found",
            Status::InternalServerError => "Internal Server Error",
        }
    }
}

/// An HTTP response under construction.
#[derive(Debug, Clone)]
pub struct Response {
    status: Status,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl Response {
    /// An HTML page.
    pub fn html(status: Status, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: vec![("Content-Type".into(), "text/html; charset=utf-8".into())],
            body: body.into().into_bytes(),
        }
    }

    /// A raw body with an explicit content type.
    pub fn file(body: Vec<u8>, content_type: &str) -> Self {
        Self {
            status: Status::Ok,
            headers: vec![("Content-Type".into(), content_type.into())],
            body,
        }
    }

    /// A downloadable attachment with a suggested filename.
    pub fn attachment(body: Vec<u8>, content_type: &str, filename: &str) -> Self {
        Self::file(body, content_type).header(
            "Content-Disposition",
            &format!("attachment; filename={}", filename),
        )
    }

    /// Add a header (builder style).
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Serialize to raw HTTP/1.1 bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(256 + self.body.len());

        buf.extend_from_slice(b"HTTP/1.1 ");
        buf.extend_from_slice(self.status.code().to_string().as_bytes());
        buf.push(b' ');
        buf.extend_from_slice(self.status.reason().as_bytes());
        buf.extend_from_slice(b"\r\n");

        for (name, value) in &self.headers {
            buf.extend_from_slice(name.as_bytes());
            buf.extend_from_slice(b": ");
            buf.extend_from_slice(value.as_bytes());
            buf.extend_from_slice(b"\r\n");
        }

        buf.extend_from_slice(format!("Content-Length: {}\r\n", self.body.len()).as_bytes());
        buf.extend_from_slice(b"Connection: close\r\n\r\n");
        buf.extend_from_slice(&self.body);
        buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(raw: &[u8]) -> Request {
        let mut parser = RequestParser::new();
        parser.feed(raw);
        parser.try_parse().unwrap().unwrap()
    }

    #[test]
    fn test_parse_get_request() {
        let req = parse(b"GET /ascii-art HTTP/1.1\r\nHost: localhost\r\n\r\n");
        assert_eq!(req.method, "GET");
        assert_eq!(req.path, "/ascii-art");
        assert_eq!(req.header("host"), Some("localhost"));
        assert!(req.body.is_empty());
    }

    #[test]
    fn test_parse_post_with_body() {
        let req = parse(
            b"POST /ascii-art HTTP/1.1\r\nContent-Type: application/x-www-form-urlencoded\r\n\
              Content-Length: 27\r\n\r\nbanner=standard&request=Hey",
        );
        let form = req.form();
        assert_eq!(form.get("banner").map(String::as_str), Some("standard"));
        assert_eq!(form.get("request").map(String::as_str), Some("Hey"));
    }

    #[test]
    fn test_incremental_feed() {
        let mut parser = RequestParser::new();
        parser.feed(b"POST / HTTP/1.1\r\nContent-Length: 4\r\n");
        assert!(parser.try_parse().unwrap().is_none());
        parser.feed(b"\r\nab");
        assert!(parser.try_parse().unwrap().is_none());
        parser.feed(b"cd");
        let req = parser.try_parse().unwrap().unwrap();
        assert_eq!(req.body, b"abcd");
    }

    #[test]
    fn test_invalid_request_line() {
        let mut parser = RequestParser::new();
        parser.feed(b"NONSENSE\r\n\r\n");
        assert_eq!(
            parser.try_parse().unwrap_err(),
            HttpError::InvalidRequestLine
        );
    }

    #[test]
    fn test_form_decoding_escapes() {
        let form = parse_form(b"request=%7BHello%7D+World%21&banner=standard");
        assert_eq!(
            form.get("request").map(String::as_str),
            Some("{Hello} World!")
        );
    }

    #[test]
    fn test_form_newlines_decode() {
        // Textarea line breaks arrive as %0D%0A.
        let form = parse_form(b"request=a%0D%0Ab");
        assert_eq!(form.get("request").map(String::as_str), Some("a\r\nb"));
    }

    #[test]
    fn test_invalid_escape_passes_through() {
        let form = parse_form(b"k=100%zz");
        assert_eq!(form.get("k").map(String::as_str), Some("100%zz"));
    }

    #[test]
    fn test_response_bytes() {
        let bytes = Response::html(Status::NotFound, "<h1>missing</h1>").to_bytes();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("HTTP/1.1 404 Not Found\r\n"));
        assert!(text.contains("Content-Type: text/html; charset=utf-8\r\n"));
        assert!(text.contains("Content-Length: 16\r\n"));
        assert!(text.ends_with("\r\n\r\n<h1>missing</h1>"));
    }

    #[test]
    fn test_attachment_headers() {
        let bytes =
            Response::attachment(b"PK".to_vec(), "application/zip", "archive.zip").to_bytes();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("Content-Disposition: attachment; filename=archive.zip\r\n"));
        assert!(text.contains("Content-Type: application/zip\r\n"));
    }
}
