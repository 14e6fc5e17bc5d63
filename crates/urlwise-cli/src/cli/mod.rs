//! CLI for the urlwise HTTP protocol helpers.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use urlwise_core::config;

use commands::{run_charset, run_check_put, run_decode, run_normalize};

/// Top-level CLI for urlwise.
#[derive(Debug, Parser)]
#[command(name = "urlwise")]
#[command(about = "urlwise: URL canonicalization, body decoding and PUT response checks", long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of the XDG config dir.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Print the canonical form of a URL.
    Normalize {
        /// URL to canonicalize; non-HTTP(S) URLs are printed unchanged.
        url: String,
    },

    /// Print the charset declared by a Content-Type value.
    Charset {
        /// Content-Type header value; omit to get the default charset.
        content_type: Option<String>,
    },

    /// Decode a response body file according to its Content-Encoding.
    Decode {
        /// Path to the encoded body.
        path: PathBuf,
        /// Content-Encoding token (gzip, x-gzip, deflate); anything else copies the bytes.
        #[arg(long, short = 'e')]
        encoding: Option<String>,
    },

    /// Validate a saved raw HTTP response to a PUT request.
    CheckPut {
        /// Destination URL the PUT was sent to.
        dest: String,
        /// File holding the raw response: status line, headers, blank line, body.
        response: PathBuf,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = match cli.config.as_deref() {
            Some(path) => config::load_from(path)?,
            None => config::load_or_init()?,
        };
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Normalize { url } => run_normalize(&url)?,
            CliCommand::Charset { content_type } => run_charset(content_type.as_deref()),
            CliCommand::Decode { path, encoding } => run_decode(&path, encoding.as_deref())?,
            CliCommand::CheckPut { dest, response } => {
                run_check_put(&dest, &response, &cfg)?
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
