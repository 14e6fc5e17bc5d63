//! Sniffing which of the two "deflate" layouts a body uses.

use flate2::{Decompress, FlushDecompress};
use std::io::{self, Cursor, Read};

/// Bytes read ahead from the body to run the trial inflate on.
pub const PROBE_LEN: usize = 100;

/// Output cap for the trial inflate; enough to validate the header and the
/// first blocks without decompressing the whole body.
const TRIAL_OUTPUT_LEN: usize = 1000;

/// A source whose first bytes were read ahead and are replayed before the rest.
pub type Rewound<R> = io::Chain<Cursor<Vec<u8>>, R>;

/// Which binary layout a `deflate`-labelled body appears to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeflateVariant {
    /// RFC 1950: 2-byte header, deflate data, Adler-32 trailer.
    Zlib,
    /// Bare RFC 1951 deflate data with no wrapper.
    Raw,
}

/// Reads up to `len` bytes from `raw` and returns them along with a reader that
/// yields the same bytes again followed by the rest of `raw`.
pub fn read_ahead<R: Read>(mut raw: R, len: usize) -> io::Result<(Vec<u8>, Rewound<R>)> {
    let mut prefix = Vec::with_capacity(len);
    (&mut raw).take(len as u64).read_to_end(&mut prefix)?;
    let replay = Cursor::new(prefix.clone());
    Ok((prefix, replay.chain(raw)))
}

/// Trial-inflates `probe` with a zlib-header inflater, discarding the output.
///
/// A clean run means zlib; a data-format error means raw deflate. This is a
/// heuristic: short or corrupt bodies can be classified either way.
pub fn sniff_deflate_variant(probe: &[u8]) -> DeflateVariant {
    let mut inflater = Decompress::new(true);
    let mut scratch = [0u8; TRIAL_OUTPUT_LEN];
    match inflater.decompress(probe, &mut scratch, FlushDecompress::None) {
        Ok(_) => DeflateVariant::Zlib,
        Err(e) => {
            tracing::trace!(error = %e, "zlib trial inflate failed, assuming raw deflate");
            DeflateVariant::Raw
        }
    }
}
