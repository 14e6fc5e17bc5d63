//! Normalize command: print the canonical form of a URL.

use anyhow::Result;
use urlwise_core::url_model;

pub fn run_normalize(url: &str) -> Result<()> {
    println!("{}", url_model::normalize_to_string(url)?);
    Ok(())
}
