//! The view of an HTTP response that upload validation works from.
//!
//! [`ResponseView`] is what the caller's open connection must expose: status,
//! reason phrase, headers in arrival order and, for error responses, a body
//! stream that can be taken once. [`HttpResponse`] is a ready-made owned
//! implementation, buildable from curl-style header lines or a raw dump.

mod parse;

pub use parse::ResponseParseError;

use std::fmt;
use std::io::{Cursor, Read};

/// One response header with every value it was sent with, in order.
///
/// The status line is kept as a field with an empty name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderField {
    pub name: String,
    pub values: Vec<String>,
}

/// Read access to an open HTTP response.
pub trait ResponseView {
    /// Numeric status code, e.g. `403`.
    fn status_code(&self) -> u32;

    /// Reason phrase from the status line; empty when the server sent none.
    fn reason_phrase(&self) -> &str;

    /// All header fields in the order they were received.
    fn header_fields(&self) -> &[HeaderField];

    /// Takes the error body stream, if the response has one. Later calls return `None`.
    fn take_error_body(&mut self) -> Option<Box<dyn Read + Send>>;

    /// First value of the named header (case-insensitive).
    fn header(&self, name: &str) -> Option<&str> {
        self.header_fields()
            .iter()
            .filter(|f| !f.name.is_empty())
            .find(|f| f.name.eq_ignore_ascii_case(name))
            .and_then(|f| f.values.first())
            .map(String::as_str)
    }

    fn content_encoding(&self) -> Option<&str> {
        self.header("content-encoding")
    }

    fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }
}

/// Owned response: status, headers and an optional error body.
pub struct HttpResponse {
    status: u32,
    reason: String,
    headers: Vec<HeaderField>,
    error_body: Option<Box<dyn Read + Send>>,
}

impl HttpResponse {
    pub fn new(status: u32, reason: impl Into<String>) -> Self {
        Self {
            status,
            reason: reason.into(),
            headers: Vec::new(),
            error_body: None,
        }
    }

    /// Appends a header value. Repeated names (any case) share one field.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push_header(name.into(), value.into());
        self
    }

    /// Attaches the stream the server sent as the error body.
    pub fn with_error_body<R: Read + Send + 'static>(mut self, body: R) -> Self {
        self.error_body = Some(Box::new(body));
        self
    }

    /// Builds a response from header lines as collected by a curl header
    /// callback (status line first, then `Name: value` lines).
    ///
    /// When several status lines are present (`100 Continue`, redirects) the
    /// last response wins.
    pub fn from_header_lines(lines: &[String]) -> Result<Self, ResponseParseError> {
        parse::parse_header_lines(lines)
    }

    /// Builds a response from a raw HTTP/1.x message: head, blank line, body.
    ///
    /// For statuses of 400 and above a non-empty body becomes the error body.
    pub fn from_raw(raw: &[u8]) -> Result<Self, ResponseParseError> {
        let (head, body) = parse::split_head(raw);
        let head = std::str::from_utf8(head).map_err(|_| ResponseParseError::NonUtf8Head)?;
        let lines: Vec<String> = head.lines().map(str::to_string).collect();
        let response = parse::parse_header_lines(&lines)?;
        if response.status >= 400 && !body.is_empty() {
            Ok(response.with_error_body(Cursor::new(body.to_vec())))
        } else {
            Ok(response)
        }
    }

    pub(crate) fn push_header(&mut self, name: String, value: String) {
        match self
            .headers
            .iter_mut()
            .find(|f| !f.name.is_empty() && f.name.eq_ignore_ascii_case(&name))
        {
            Some(field) => field.values.push(value),
            None => self.headers.push(HeaderField {
                name,
                values: vec![value],
            }),
        }
    }

    pub(crate) fn push_status_line(&mut self, line: String) {
        self.headers.insert(
            0,
            HeaderField {
                name: String::new(),
                values: vec![line],
            },
        );
    }
}

impl ResponseView for HttpResponse {
    fn status_code(&self) -> u32 {
        self.status
    }

    fn reason_phrase(&self) -> &str {
        &self.reason
    }

    fn header_fields(&self) -> &[HeaderField] {
        &self.headers
    }

    fn take_error_body(&mut self) -> Option<Box<dyn Read + Send>> {
        self.error_body.take()
    }
}

impl fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .field("reason", &self.reason)
            .field("headers", &self.headers)
            .field("has_error_body", &self.error_body.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_headers_merge_case_insensitively() {
        let r = HttpResponse::new(200, "OK")
            .with_header("Set-Cookie", "a=1")
            .with_header("set-cookie", "b=2")
            .with_header("Content-Type", "text/plain");
        assert_eq!(r.header_fields().len(), 2);
        assert_eq!(r.header_fields()[0].values, vec!["a=1", "b=2"]);
        assert_eq!(r.header("SET-COOKIE"), Some("a=1"));
        assert_eq!(r.content_type(), Some("text/plain"));
        assert_eq!(r.content_encoding(), None);
    }

    #[test]
    fn error_body_taken_once() {
        let mut r = HttpResponse::new(500, "Internal Server Error").with_error_body(Cursor::new(b"x".to_vec()));
        assert!(r.take_error_body().is_some());
        assert!(r.take_error_body().is_none());
    }

    #[test]
    fn from_raw_error_response() {
        let raw = b"HTTP/1.1 500 Internal Server Error\r\nContent-Type: text/plain; charset=utf-8\r\n\r\nboom";
        let mut r = HttpResponse::from_raw(raw).unwrap();
        assert_eq!(r.status_code(), 500);
        assert_eq!(r.reason_phrase(), "Internal Server Error");
        assert_eq!(r.content_type(), Some("text/plain; charset=utf-8"));
        let mut body = String::new();
        r.take_error_body().unwrap().read_to_string(&mut body).unwrap();
        assert_eq!(body, "boom");
    }

    #[test]
    fn from_raw_success_has_no_error_body() {
        let raw = b"HTTP/1.1 201 Created\r\nLocation: /x\r\n\r\ncreated";
        let mut r = HttpResponse::from_raw(raw).unwrap();
        assert_eq!(r.status_code(), 201);
        assert!(r.take_error_body().is_none());
    }
}
