//! Command-line interface definitions for News Digest.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! The config path can also be provided through an environment variable.

use crate::models::Mode;
use crate::outputs::delivery::OutputFormat;
use clap::Parser;

/// Command-line arguments for the News Digest application.
///
/// # Examples
///
/// ```sh
/// # Deliver all news once using the built-in site description
/// news_digest
///
/// # Deliver highlighted news from a configured site as JSON
/// news_digest -c ./config.yaml -m main -f json
///
/// # Keep answering every 30 seconds (served from cache for 5 minutes)
/// news_digest -c ./config.yaml --watch --interval-secs 30
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to config.yaml file
    #[arg(short, long, env = "NEWS_DIGEST_CONFIG")]
    pub config: Option<String>,

    /// Which articles to deliver
    #[arg(short, long, value_enum, default_value_t = Mode::All)]
    pub mode: Mode,

    /// Output format of the delivered messages
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Keep delivering until interrupted
    #[arg(short, long)]
    pub watch: bool,

    /// Seconds between deliveries in watch mode
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval_secs: u64,

    /// Scrape every mode at startup instead of on first request
    #[arg(long)]
    pub warm: bool,
}
