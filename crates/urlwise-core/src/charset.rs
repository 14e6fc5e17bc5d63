//! `Content-Type` charset extraction and byte-to-text decoding.

use encoding_rs::{Encoding, UTF_8};

/// Charset assumed when `Content-Type` carries none (RFC 2616 section 3.7.1).
pub const DEFAULT_CHARSET: &str = "ISO-8859-1";

/// Extracts the charset from a `Content-Type` header value.
///
/// Parameters are split on `;` and trimmed; the `charset=` key is matched
/// case-insensitively and the last declaration wins. Returns
/// [`DEFAULT_CHARSET`] when the header is absent or the value is empty.
///
/// # Examples
///
/// - `resolve_charset(Some("text/html; charset=UTF-8"))` → `"UTF-8"`
/// - `resolve_charset(Some("text/html"))` → `"ISO-8859-1"`
pub fn resolve_charset(content_type: Option<&str>) -> String {
    const KEY: &str = "charset=";

    let mut charset: Option<&str> = None;
    if let Some(value) = content_type {
        for element in value.split(';') {
            let element = element.trim();
            if element
                .get(..KEY.len())
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case(KEY))
            {
                charset = Some(&element[KEY.len()..]);
            }
        }
    }

    match charset {
        Some(c) if !c.is_empty() => c.to_string(),
        _ => DEFAULT_CHARSET.to_string(),
    }
}

/// Decodes `bytes` as text in the named charset.
///
/// Labels are resolved per the WHATWG Encoding Standard, so `ISO-8859-1`
/// decodes as windows-1252. A leading BOM overrides the label. Unknown labels
/// fall back to lossy UTF-8.
pub fn decode_text(bytes: &[u8], charset: &str) -> String {
    let label = charset.trim_matches(|c: char| c.is_ascii_whitespace() || c == '"');
    let encoding = Encoding::for_label(label.as_bytes()).unwrap_or_else(|| {
        tracing::warn!(charset, "unknown charset label, falling back to UTF-8");
        UTF_8
    });
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        tracing::trace!(encoding = encoding.name(), "malformed bytes replaced while decoding");
    }
    text.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charset_present() {
        assert_eq!(resolve_charset(Some("text/html; charset=UTF-8")), "UTF-8");
    }

    #[test]
    fn charset_missing_defaults_to_latin1() {
        assert_eq!(resolve_charset(Some("text/html")), "ISO-8859-1");
        assert_eq!(resolve_charset(None), "ISO-8859-1");
    }

    #[test]
    fn charset_key_is_case_insensitive() {
        assert_eq!(resolve_charset(Some("text/html; CHARSET=utf-16")), "utf-16");
    }

    #[test]
    fn last_charset_wins() {
        assert_eq!(
            resolve_charset(Some("text/plain; charset=utf-8; charset=windows-1252")),
            "windows-1252"
        );
    }

    #[test]
    fn empty_charset_defaults() {
        assert_eq!(resolve_charset(Some("text/plain; charset=")), "ISO-8859-1");
        assert_eq!(resolve_charset(Some("")), "ISO-8859-1");
    }

    #[test]
    fn decode_latin1_maps_bytes_to_code_points() {
        assert_eq!(decode_text(&[0x63, 0x61, 0x66, 0xE9], "ISO-8859-1"), "café");
    }

    #[test]
    fn decode_utf8_strips_bom() {
        assert_eq!(decode_text(b"\xEF\xBB\xBFok", "utf-8"), "ok");
    }

    #[test]
    fn decode_windows_1252_punctuation() {
        let body = [0x80, b'u', b'r', b'o', b' ', 0x96, b' ', b'o', b'k'];
        assert_eq!(decode_text(&body, "windows-1252"), "\u{20AC}uro \u{2013} ok");
    }

    #[test]
    fn decode_shift_jis() {
        assert_eq!(decode_text(&[0x82, 0xA0], "Shift_JIS"), "\u{3042}");
    }

    #[test]
    fn decode_quoted_label() {
        assert_eq!(decode_text(&[0xE9], "\"iso-8859-2\""), "\u{E9}");
    }

    #[test]
    fn decode_utf16_with_bom() {
        assert_eq!(decode_text(&[0xFF, 0xFE, b'h', 0, b'i', 0], "UTF-16"), "hi");
        assert_eq!(decode_text(&[0, b'h', 0, b'i'], "utf-16be"), "hi");
    }

    #[test]
    fn decode_utf16_truncated_tail() {
        assert_eq!(decode_text(&[b'a', 0, b'b'], "utf-16le"), "a\u{FFFD}");
    }

    #[test]
    fn decode_unknown_label_is_lossy_utf8() {
        assert_eq!(decode_text("naïve".as_bytes(), "x-made-up"), "naïve");
    }
}
