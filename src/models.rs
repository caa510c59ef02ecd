//! Data models shared by the scrape pipeline.
//!
//! This module defines the values that flow between the pipeline stages:
//! - [`Mode`]: Which scrape variant is requested ("all" vs "main" items)
//! - [`SiteConfig`]: Immutable site description for one mode
//! - [`ArticleRecord`]: One extracted news item, every field optional
//! - [`ChunkedMessage`]: The size-bounded messages handed to the delivery layer

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder message returned whenever a scrape yields nothing usable.
pub const NO_RESULTS_MESSAGE: &str = "Something happened! No results!";

/// Ordered sequence of messages, each one small enough for a single delivery.
pub type ChunkedMessage = Vec<String>;

/// A named scrape variant with its own [`SiteConfig`] and cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Every article container on the page.
    All,
    /// Only the highlighted ("most important") articles.
    Main,
}

impl Mode {
    /// All known modes, in registry order.
    pub const ALL: [Mode; 2] = [Mode::All, Mode::Main];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::All => "all",
            Mode::Main => "main",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the extractor needs to scrape one page for one mode.
///
/// Selectors are CSS selectors. `article_selector` is evaluated against the
/// whole document; `time_selector`, `text_selector` and `href_selector` are
/// evaluated relative to each matched article container. An empty selector
/// means "do not extract this field".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Site root used to absolutize relative links, e.g. `https://www.example.com`.
    pub base_url: String,
    /// Path of the page listing the articles, e.g. `/news/`.
    pub page_path: String,
    pub article_selector: String,
    pub time_selector: String,
    pub text_selector: String,
    pub href_selector: String,
}

impl SiteConfig {
    /// Full URL of the page to fetch.
    pub fn page_url(&self) -> String {
        format!("{}{}", self.base_url, self.page_path)
    }
}

/// A single news item as extracted from the page.
///
/// No field is guaranteed: missing or empty values are `None`, never a
/// placeholder string. Records without `text` are dropped by the formatter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleRecord {
    pub time: Option<String>,
    pub text: Option<String>,
    /// Absolute link to the article.
    pub href: Option<String>,
}
