//! Canonical string form of web URLs.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use regex::Regex;
use std::sync::LazyLock;
use url::{Position, Url};

use super::{is_web_scheme, UrlError};

/// A percent-encoded `%` followed by two hex digits, left behind when an
/// already-escaped URL is escaped a second time.
static DOUBLE_ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("%25([0-9a-fA-F]{2})").expect("valid escape pattern"));

/// Characters RFC 3986 does not allow raw in a query or fragment. `%` is
/// absent so existing escapes survive.
const QUERY_PCT_ENCODING_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Path segments additionally may not hold `?`, `[` or `]`.
const PATH_PCT_ENCODING_SET: &AsciiSet = &QUERY_PCT_ENCODING_SET
    .add(b'?')
    .add(b'[')
    .add(b']');

/// Returns the canonical string form of `url`.
///
/// Non-`http(s)` URLs come back exactly as given. Web URLs are re-serialized
/// with `.`/`..` segments resolved, IDNA hosts in ASCII and every character
/// RFC 3986 disallows in path, query or fragment percent-encoded (a literal
/// `\` included); then every literal `+` becomes `%2B` and every `%25XX`
/// collapses to `%XX`.
///
/// # Examples
///
/// - `normalize_to_string("http://host/a+b")` → `"http://host/a%2Bb"`
/// - `normalize_to_string("http://host/a%2520b")` → `"http://host/a%20b"`
/// - `normalize_to_string("ftp://host/a+b")` → `"ftp://host/a+b"`
pub fn normalize_to_string(url: &str) -> Result<String, UrlError> {
    let malformed = |source| UrlError::Malformed {
        url: url.to_string(),
        source,
    };
    let parsed = Url::parse(url).map_err(malformed)?;
    if !is_web_scheme(parsed.scheme()) {
        return Ok(url.to_string());
    }

    // The WHATWG parser reads `\` in a web path as `/`; escape it first so
    // the path keeps pointing at the same resource.
    let parsed = match escape_backslashes(url) {
        Some(escaped) => Url::parse(&escaped).map_err(malformed)?,
        None => parsed,
    };

    let mut out = String::from(&parsed[..Position::AfterPort]);
    out.extend(utf8_percent_encode(parsed.path(), PATH_PCT_ENCODING_SET));
    if let Some(query) = parsed.query() {
        out.push('?');
        out.extend(utf8_percent_encode(query, QUERY_PCT_ENCODING_SET));
    }
    if let Some(fragment) = parsed.fragment() {
        out.push('#');
        out.extend(utf8_percent_encode(fragment, QUERY_PCT_ENCODING_SET));
    }

    // `+` must be escaped before the `%25` repair; `%2B` never matches it.
    let escaped = out.replace('+', "%2B");
    let canonical = DOUBLE_ESCAPE.replace_all(&escaped, "%$1").into_owned();

    if canonical != url {
        tracing::trace!(from = url, to = %canonical, "normalized URL");
    }
    Ok(canonical)
}

/// Replaces `\` after the authority with `%5C`. `None` when there is none.
fn escape_backslashes(url: &str) -> Option<String> {
    let (scheme, rest) = url.split_once("://")?;
    let authority_len = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let (authority, tail) = rest.split_at(authority_len);
    if !tail.contains('\\') {
        return None;
    }
    Some(format!("{}://{}{}", scheme, authority, tail.replace('\\', "%5C")))
}

/// Like [`normalize_to_string`] but for an already parsed URL.
///
/// Non-`http(s)` URLs are returned unchanged.
pub fn normalize_to_url(url: &Url) -> Result<Url, UrlError> {
    if !is_web_scheme(url.scheme()) {
        return Ok(url.clone());
    }
    let canonical = normalize_to_string(url.as_str())?;
    Url::parse(&canonical).map_err(|source| UrlError::Malformed {
        url: canonical,
        source,
    })
}
