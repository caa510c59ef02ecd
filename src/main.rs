//! # News Digest
//!
//! Scrapes a news listing page with configurable CSS selectors, formats the
//! articles into HTML-flavoured chat messages bounded by the transport's
//! size limit, and serves the result from a short-lived per-mode cache.
//!
//! ## Usage
//!
//! ```sh
//! news_digest -c ./config.yaml -m main
//! ```
//!
//! ## Architecture
//!
//! Each request for a mode goes through that mode's cache. On a miss the
//! pipeline runs:
//! 1. **Fetching**: Download the listing page
//! 2. **Extracting**: Select article containers and their time/text/link
//! 3. **Formatting**: Render one line per article that has text
//! 4. **Chunking**: Split into messages that fit a single delivery
//!
//! The resulting messages are printed to stdout for the delivery front end.

use chrono::Local;
use clap::Parser;
use std::error::Error;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cache;
mod cli;
mod config;
mod models;
mod outputs;
mod scrapers;
mod utils;

use cache::CacheRegistry;
use cli::Cli;
use config::AppConfig;
use models::Mode;
use outputs::delivery::{self, OutputFormat};
use scrapers::{DocumentSource, HttpSource};
use utils::truncate_for_log;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("news_digest starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let config = AppConfig::load(args.config.as_deref()).await?;
    let source = Arc::new(HttpSource::new(config.request_timeout())?);
    let registry = CacheRegistry::new(&config, source);

    for mode in registry.modes() {
        if let Some(site) = registry.site(mode) {
            info!(%mode, url = %site.page_url(), selector = %site.article_selector, "Configured news page");
        }
    }

    if args.warm {
        registry.warm().await;
    }

    let interval = Duration::from_secs(args.interval_secs);
    loop {
        deliver(&registry, args.mode, args.format).await?;

        if !args.watch {
            break;
        }

        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = tokio::signal::ctrl_c() => {
                warn!("Interrupted; shutting down");
                break;
            }
        }
    }

    let elapsed = start_time.elapsed();
    info!(?elapsed, secs = elapsed.as_secs(), "Execution complete");
    Ok(())
}

/// Serve one request for `mode` and print its messages in order.
#[instrument(level = "info", skip(registry))]
async fn deliver<S: DocumentSource>(
    registry: &CacheRegistry<S>,
    mode: Mode,
    format: OutputFormat,
) -> Result<(), Box<dyn Error>> {
    let chunks = registry.get_chunks(mode).await;
    let rendered = delivery::render(&chunks, mode.as_str(), format)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    stdout.flush()?;

    info!(
        %mode,
        messages = chunks.len(),
        delivered_at = %Local::now().to_rfc3339(),
        first = %truncate_for_log(chunks.first().map(String::as_str).unwrap_or_default(), 80),
        "Delivered messages"
    );
    Ok(())
}
