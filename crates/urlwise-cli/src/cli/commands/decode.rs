//! Decode command: undo a Content-Encoding on a saved body.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::Path;
use urlwise_core::decoding;

/// Decode the body at `path` and write it to stdout.
pub fn run_decode(path: &Path, encoding: Option<&str>) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let written = decode_file(path, encoding, &mut out)?;
    out.flush()?;
    tracing::debug!(path = %path.display(), written, "decoded body");
    Ok(())
}

/// Decode the body at `path` into `out`; returns the decoded byte count.
pub fn decode_file<W: Write>(path: &Path, encoding: Option<&str>, out: &mut W) -> Result<u64> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut reader = decoding::select_decoder(encoding, BufReader::new(file))
        .with_context(|| format!("reading {}", path.display()))?;
    let written = io::copy(&mut reader, out)
        .with_context(|| format!("decoding {} as {}", path.display(), reader.transform_name()))?;
    Ok(written)
}
