//! Parse HTTP response header lines into an HttpResponse.

use super::HttpResponse;

/// Why a response head could not be parsed.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ResponseParseError {
    #[error("response has no status line")]
    MissingStatusLine,
    #[error("invalid status line: {0:?}")]
    InvalidStatusLine(String),
    #[error("response head is not valid UTF-8")]
    NonUtf8Head,
}

/// Parse collected header lines into an HttpResponse.
pub(crate) fn parse_header_lines(lines: &[String]) -> Result<HttpResponse, ResponseParseError> {
    let mut response: Option<HttpResponse> = None;

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            let (status, reason) = parse_status_line(line)?;
            let mut fresh = HttpResponse::new(status, reason);
            fresh.push_status_line(line.to_string());
            response = Some(fresh);
            continue;
        }
        let Some(current) = response.as_mut() else {
            return Err(ResponseParseError::MissingStatusLine);
        };
        if let Some((name, value)) = line.split_once(':') {
            current.push_header(name.trim().to_string(), value.trim().to_string());
        }
    }

    response.ok_or(ResponseParseError::MissingStatusLine)
}

/// `HTTP/1.1 404 Not Found` → `(404, "Not Found")`. The reason may be absent.
fn parse_status_line(line: &str) -> Result<(u32, String), ResponseParseError> {
    let mut parts = line.splitn(3, ' ');
    let _version = parts.next();
    let code = parts
        .next()
        .and_then(|c| c.parse::<u32>().ok())
        .filter(|c| (100..1000).contains(c))
        .ok_or_else(|| ResponseParseError::InvalidStatusLine(line.to_string()))?;
    let reason = parts.next().unwrap_or("").trim().to_string();
    Ok((code, reason))
}

/// Splits a raw message into head and body at the first blank line.
pub(crate) fn split_head(raw: &[u8]) -> (&[u8], &[u8]) {
    if let Some(pos) = find(raw, b"\r\n\r\n") {
        return (&raw[..pos], &raw[pos + 4..]);
    }
    if let Some(pos) = find(raw, b"\n\n") {
        return (&raw[..pos], &raw[pos + 2..]);
    }
    (raw, &[])
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
