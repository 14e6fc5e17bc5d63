//! Upload failure type returned by PUT status validation.

/// A PUT that the server did not accept.
///
/// The `Display` output is the complete diagnostic; callers that match on the
/// text rely on its exact shape.
#[derive(Debug, thiserror::Error)]
pub enum PutError {
    /// 401 or 403.
    #[error("access to URL {dest} was refused by the server: {message}")]
    AccessDenied {
        dest: String,
        status: u32,
        /// Reason phrase plus the truncated error body, if any.
        message: String,
    },
    /// Any other non-success status.
    #[error("PUT operation to URL {dest} failed with status code {status}: {diagnostic}")]
    UploadFailed {
        dest: String,
        status: u32,
        /// `(body = ...)` block with the error body and all headers.
        diagnostic: String,
    },
}

impl PutError {
    /// Status code that caused the failure.
    pub fn status(&self) -> u32 {
        match self {
            PutError::AccessDenied { status, .. } | PutError::UploadFailed { status, .. } => *status,
        }
    }

    /// Destination URL of the rejected upload.
    pub fn dest(&self) -> &str {
        match self {
            PutError::AccessDenied { dest, .. } | PutError::UploadFailed { dest, .. } => dest,
        }
    }
}
