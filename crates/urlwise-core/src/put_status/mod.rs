//! Validation of PUT (upload) responses.
//!
//! Splits status codes into success, access denied and everything else, and
//! for failures builds the diagnostic text from the reason phrase, a truncated
//! and decoded error body, and the response headers.

mod error;

pub use error::PutError;

use url::Url;

use crate::bounded::read_truncated_partial;
use crate::charset::{decode_text, resolve_charset};
use crate::decoding::select_decoder;
use crate::response::{HeaderField, ResponseView};

/// How many bytes of an error body end up in a diagnostic.
pub const ERROR_BODY_TRUNCATE_LEN: usize = 512;

/// Outcome class of a PUT status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutOutcome {
    /// 200, 201, 202, 204.
    Success,
    /// 401, 403.
    AccessDenied,
    /// Anything else.
    Failed,
}

/// Classify a PUT status code.
pub fn classify_put_status(code: u32) -> PutOutcome {
    match code {
        200 | 201 | 202 | 204 => PutOutcome::Success,
        401 | 403 => PutOutcome::AccessDenied,
        _ => PutOutcome::Failed,
    }
}

/// Turns a status code and pre-built messages into a result.
///
/// `message` is used for access-denied failures, `diagnostic` for all other
/// failures.
pub fn validate_put_status(
    dest: &Url,
    status: u32,
    message: &str,
    diagnostic: &str,
) -> Result<(), PutError> {
    match classify_put_status(status) {
        PutOutcome::Success => Ok(()),
        PutOutcome::AccessDenied => Err(PutError::AccessDenied {
            dest: dest.to_string(),
            status,
            message: message.to_string(),
        }),
        PutOutcome::Failed => Err(PutError::UploadFailed {
            dest: dest.to_string(),
            status,
            diagnostic: diagnostic.to_string(),
        }),
    }
}

/// Validates the response to a PUT of `dest`, reading at most
/// [`ERROR_BODY_TRUNCATE_LEN`] bytes of the error body.
pub fn validate_put_response<V>(dest: &Url, response: &mut V) -> Result<(), PutError>
where
    V: ResponseView + ?Sized,
{
    validate_put_response_with_limit(dest, response, ERROR_BODY_TRUNCATE_LEN)
}

/// Like [`validate_put_response`] with an explicit error-body limit.
///
/// The error body, if any, is consumed. Failing to read it never hides the
/// status failure: the body part of the message is just left out.
pub fn validate_put_response_with_limit<V>(
    dest: &Url,
    response: &mut V,
    body_limit: usize,
) -> Result<(), PutError>
where
    V: ResponseView + ?Sized,
{
    let status = response.status_code();
    let body = error_body_text(response, body_limit);

    let extra = body
        .as_deref()
        .map(|text| format!("; Response Body: {}", text))
        .unwrap_or_default();
    let message = format!("{}{}", response.reason_phrase(), extra);
    let diagnostic = build_diagnostic(body.as_deref().unwrap_or(""), response.header_fields());

    let result = validate_put_status(dest, status, &message, &diagnostic);
    if let Err(e) = &result {
        tracing::debug!(dest = %dest, status, "PUT rejected: {}", e);
    }
    result
}

/// Decoded text of the truncated error body, or `None` if there is no error
/// body or none of it could be read. A read that fails partway keeps the
/// bytes received before the failure.
fn error_body_text<V>(response: &mut V, limit: usize) -> Option<String>
where
    V: ResponseView + ?Sized,
{
    let raw = response.take_error_body()?;
    let decoded = match select_decoder(response.content_encoding(), raw) {
        Ok(decoded) => decoded,
        Err(e) => {
            tracing::warn!(status = response.status_code(), "failed to read error body: {}", e);
            return None;
        }
    };
    let (bytes, err) = read_truncated_partial(decoded, limit);
    if let Some(e) = err {
        tracing::warn!(
            status = response.status_code(),
            kept = bytes.len(),
            "error body read cut short: {}",
            e
        );
        if bytes.is_empty() {
            return None;
        }
    }
    let charset = resolve_charset(response.content_type());
    Some(decode_text(&bytes, &charset))
}

/// `(body = {body}{name}{values joined by " "}...)`
fn build_diagnostic(body: &str, headers: &[HeaderField]) -> String {
    let mut out = String::from("(body = ");
    out.push_str(body);
    for field in headers {
        out.push_str(&field.name);
        out.push_str(&field.values.join(" "));
    }
    out.push(')');
    out
}
