//! Content-Encoding decoding of response bodies.
//!
//! Picks a decompressing reader for a body from its `Content-Encoding` token.
//! `deflate` is ambiguous on the wire (zlib-wrapped or raw), so the first
//! bytes are sniffed with a trial inflate before the real decoder is built.

mod probe;

pub use probe::{read_ahead, sniff_deflate_variant, DeflateVariant, Rewound, PROBE_LEN};

use flate2::read::{DeflateDecoder, MultiGzDecoder, ZlibDecoder};
use std::io::{self, Read};

/// Content-Encoding tokens this crate knows how to undo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentEncoding {
    /// `gzip` or `x-gzip`.
    Gzip,
    /// `deflate`, either layout.
    Deflate,
    /// Anything else, including a missing header.
    Identity,
}

impl ContentEncoding {
    /// Maps a header token to an encoding. Matching is exact and case-sensitive.
    pub fn from_token(token: Option<&str>) -> Self {
        match token {
            Some("gzip") | Some("x-gzip") => ContentEncoding::Gzip,
            Some("deflate") => ContentEncoding::Deflate,
            _ => ContentEncoding::Identity,
        }
    }
}

/// A body reader with the Content-Encoding transform applied.
pub enum DecodingReader<R: Read> {
    Identity(R),
    Gzip(MultiGzDecoder<R>),
    Zlib(ZlibDecoder<Rewound<R>>),
    RawDeflate(DeflateDecoder<Rewound<R>>),
}

impl<R: Read> DecodingReader<R> {
    /// Short name of the transform in use, for logs and diagnostics.
    pub fn transform_name(&self) -> &'static str {
        match self {
            DecodingReader::Identity(_) => "identity",
            DecodingReader::Gzip(_) => "gzip",
            DecodingReader::Zlib(_) => "deflate/zlib",
            DecodingReader::RawDeflate(_) => "deflate/raw",
        }
    }
}

impl<R: Read> Read for DecodingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            DecodingReader::Identity(r) => r.read(buf),
            DecodingReader::Gzip(r) => r.read(buf),
            DecodingReader::Zlib(r) => r.read(buf),
            DecodingReader::RawDeflate(r) => r.read(buf),
        }
    }
}

/// Wraps `raw` in the decoder matching `encoding`.
///
/// Ownership of `raw` moves into the returned reader. For `deflate`, up to
/// [`PROBE_LEN`] bytes are read ahead to pick the layout; an I/O error during
/// that read is returned as is.
pub fn select_decoder<R: Read>(encoding: Option<&str>, raw: R) -> io::Result<DecodingReader<R>> {
    let decoder = match ContentEncoding::from_token(encoding) {
        ContentEncoding::Gzip => DecodingReader::Gzip(MultiGzDecoder::new(raw)),
        ContentEncoding::Identity => DecodingReader::Identity(raw),
        ContentEncoding::Deflate => {
            let (prefix, rewound) = read_ahead(raw, PROBE_LEN)?;
            match sniff_deflate_variant(&prefix) {
                DeflateVariant::Zlib => DecodingReader::Zlib(ZlibDecoder::new(rewound)),
                DeflateVariant::Raw => DecodingReader::RawDeflate(DeflateDecoder::new(rewound)),
            }
        }
    };
    tracing::debug!(
        encoding = encoding.unwrap_or(""),
        transform = decoder.transform_name(),
        "selected body decoder"
    );
    Ok(decoder)
}
