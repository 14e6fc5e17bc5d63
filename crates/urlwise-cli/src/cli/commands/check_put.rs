//! Check-put command: classify a saved response to a PUT request.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use url::Url;
use urlwise_core::config::HandlerConfig;
use urlwise_core::put_status;
use urlwise_core::response::HttpResponse;

/// Validate the raw response in `response_path` for a PUT to `dest` and print `ok`.
pub fn run_check_put(dest: &str, response_path: &Path, cfg: &HandlerConfig) -> Result<()> {
    check_put_file(dest, response_path, cfg)?;
    println!("ok");
    Ok(())
}

/// Validate without printing; the PUT failure, if any, is the returned error.
pub fn check_put_file(dest: &str, response_path: &Path, cfg: &HandlerConfig) -> Result<()> {
    let dest = Url::parse(dest).with_context(|| format!("invalid destination URL {:?}", dest))?;
    let raw = fs::read(response_path)
        .with_context(|| format!("reading {}", response_path.display()))?;
    let mut response = HttpResponse::from_raw(&raw)
        .with_context(|| format!("parsing {}", response_path.display()))?;
    put_status::validate_put_response_with_limit(&dest, &mut response, cfg.error_body_limit)?;
    Ok(())
}
