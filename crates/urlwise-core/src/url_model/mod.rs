//! URL modeling and canonicalization.
//!
//! Rewrites `http`/`https` URLs into one normalized ASCII form before they are
//! dereferenced or compared. Other schemes are left alone.

mod normalize;

pub use normalize::{normalize_to_string, normalize_to_url};

/// Error raised when a URL cannot be turned into a valid URI.
#[derive(Debug, thiserror::Error)]
pub enum UrlError {
    /// The input did not parse as a URI; `source` is the parser's reason.
    #[error("couldn't convert '{url}' to a valid URI")]
    Malformed {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// True for the schemes the canonicalizer rewrites.
pub(crate) fn is_web_scheme(scheme: &str) -> bool {
    scheme == "http" || scheme == "https"
}
