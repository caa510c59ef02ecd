//! Rendering of chunked messages for the stdout delivery surface.
//!
//! The chat transport is not part of this crate. The binary prints each
//! chunk as one message instead, either as delimited text or as a JSON array
//! a front end can forward verbatim.

use clap::ValueEnum;
use serde::Serialize;

/// How chunks are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Messages separated by a `--- message N/M ---` header.
    Text,
    /// One JSON array of message strings.
    Json,
}

#[derive(Serialize)]
struct Delivery<'a> {
    mode: &'a str,
    messages: &'a [String],
}

/// Render `chunks` in `format`.
pub fn render(chunks: &[String], mode: &str, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(&Delivery { mode, messages: chunks }),
        OutputFormat::Text => {
            let total = chunks.len();
            let mut out = String::new();
            for (i, chunk) in chunks.iter().enumerate() {
                out.push_str(&format!("--- message {}/{} ---\n", i + 1, total));
                out.push_str(chunk);
                if !chunk.ends_with('\n') {
                    out.push('\n');
                }
            }
            Ok(out)
        }
    }
}
