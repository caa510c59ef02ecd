//! Time-bounded caching of scrape results, one cache per [`Mode`].
//!
//! A [`ModeCache`] memoizes the chunked messages produced by one full
//! pipeline run (fetch → extract → format → chunk). While the entry is
//! younger than the TTL it is served as is; otherwise the pipeline runs again
//! and the entry is replaced wholesale.
//!
//! # Semantics
//!
//! - Age is measured on the monotonic clock (`tokio::time::Instant`).
//! - The timestamp is taken after the pipeline finishes, so an entry lives
//!   for TTL plus the duration of the fetch that produced it.
//! - Failed scrapes are cached too. The "no results" message is served for a
//!   full TTL before the source is tried again.
//! - The entry lock is held across check, refresh and store, so at most one
//!   pipeline run per mode is in flight. Concurrent callers wait for it and
//!   then read the fresh entry.

use crate::config::AppConfig;
use crate::models::{ChunkedMessage, Mode, NO_RESULTS_MESSAGE, SiteConfig};
use crate::outputs::chunks::chunk_message;
use crate::outputs::message::format_articles;
use crate::scrapers::DocumentSource;
use crate::scrapers::selectors::extract_articles;
use futures::future::join_all;
use scraper::Html;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Knobs shared by every mode's pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSettings {
    pub ttl: Duration,
    pub soft_limit: usize,
    pub hard_limit: usize,
    pub link_label: String,
}

impl From<&AppConfig> for PipelineSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            ttl: config.cache_ttl(),
            soft_limit: config.soft_limit,
            hard_limit: config.hard_limit,
            link_label: config.link_label.clone(),
        }
    }
}

/// Run fetch → extract → format → chunk once.
///
/// Never fails: an unreachable page, a page without matching articles and a
/// page whose articles have no text all produce the single
/// [`NO_RESULTS_MESSAGE`] chunk.
#[instrument(level = "info", skip_all, fields(url = %site.page_url()))]
pub async fn run_pipeline<S: DocumentSource>(
    source: &S,
    site: &SiteConfig,
    settings: &PipelineSettings,
) -> ChunkedMessage {
    let body = source.fetch(&site.page_url()).await;

    let formatted = {
        let document = body.as_deref().map(Html::parse_document);
        match extract_articles(document.as_ref(), site) {
            Some(records) => format_articles(&records, &settings.link_label),
            None => String::new(),
        }
    };

    if formatted.is_empty() {
        warn!("Scrape produced no usable articles");
    }
    chunk_message(&formatted, settings.soft_limit, settings.hard_limit)
}

#[derive(Debug)]
struct CacheEntry {
    chunks: ChunkedMessage,
    created_at: Instant,
}

/// Cached scrape result for a single mode.
pub struct ModeCache<S> {
    mode: Mode,
    site: SiteConfig,
    source: Arc<S>,
    settings: PipelineSettings,
    entry: Mutex<Option<CacheEntry>>,
}

impl<S: DocumentSource> ModeCache<S> {
    pub fn new(mode: Mode, site: SiteConfig, source: Arc<S>, settings: PipelineSettings) -> Self {
        Self {
            mode,
            site,
            source,
            settings,
            entry: Mutex::new(None),
        }
    }

    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    /// Return the cached chunks, refreshing them first if missing or stale.
    #[instrument(level = "info", skip_all, fields(mode = %self.mode))]
    pub async fn get_chunks(&self) -> ChunkedMessage {
        let mut entry = self.entry.lock().await;

        match entry.as_ref() {
            Some(cached) => {
                let age = cached.created_at.elapsed();
                if age < self.settings.ttl {
                    debug!(age_ms = age.as_millis() as u64, "Serving cached chunks");
                    return cached.chunks.clone();
                }
                info!(age_secs = age.as_secs(), "Cache entry stale; refreshing");
            }
            None => info!("Cache empty; running first scrape"),
        }

        let t0 = Instant::now();
        let chunks = run_pipeline(self.source.as_ref(), &self.site, &self.settings).await;
        let created_at = Instant::now();
        info!(
            chunks = chunks.len(),
            elapsed_ms = created_at.duration_since(t0).as_millis() as u64,
            "Cache refreshed"
        );

        *entry = Some(CacheEntry {
            chunks: chunks.clone(),
            created_at,
        });
        chunks
    }
}

/// Owns one [`ModeCache`] per configured mode.
pub struct CacheRegistry<S> {
    caches: BTreeMap<Mode, ModeCache<S>>,
}

impl<S: DocumentSource> CacheRegistry<S> {
    /// Build caches for every [`Mode`] described by `config`.
    pub fn new(config: &AppConfig, source: Arc<S>) -> Self {
        let settings = PipelineSettings::from(config);
        Self::from_sites(
            Mode::ALL.into_iter().map(|mode| (mode, config.site_config(mode))),
            source,
            settings,
        )
    }

    /// Build caches for an explicit set of modes.
    pub fn from_sites(
        sites: impl IntoIterator<Item = (Mode, SiteConfig)>,
        source: Arc<S>,
        settings: PipelineSettings,
    ) -> Self {
        let caches = sites
            .into_iter()
            .map(|(mode, site)| {
                let cache = ModeCache::new(mode, site, Arc::clone(&source), settings.clone());
                (mode, cache)
            })
            .collect();
        Self { caches }
    }

    pub fn modes(&self) -> impl Iterator<Item = Mode> + '_ {
        self.caches.keys().copied()
    }

    /// Site description used for `mode`, if registered.
    pub fn site(&self, mode: Mode) -> Option<&SiteConfig> {
        self.caches.get(&mode).map(ModeCache::site)
    }

    /// Chunks for `mode`; the "no results" message if the mode is unknown.
    pub async fn get_chunks(&self, mode: Mode) -> ChunkedMessage {
        match self.caches.get(&mode) {
            Some(cache) => cache.get_chunks().await,
            None => {
                warn!(%mode, "No cache registered for mode");
                vec![NO_RESULTS_MESSAGE.to_string()]
            }
        }
    }

    /// Populate every cache concurrently.
    #[instrument(level = "info", skip_all)]
    pub async fn warm(&self) {
        let results = join_all(self.caches.values().map(|cache| cache.get_chunks())).await;
        info!(modes = results.len(), "Caches warmed");
    }
}
