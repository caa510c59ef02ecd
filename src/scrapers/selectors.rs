//! Selector-driven extraction of article records.
//!
//! A page is described entirely by CSS selectors (see [`SiteConfig`]):
//! the article selector finds the container of every news item, and the
//! time/text/href selectors are evaluated inside each container.
//!
//! # Partial data
//!
//! Every field is extracted independently. A container missing its time or
//! link still produces a record; the missing field is simply `None`. An
//! unparsable selector is treated exactly like a selector that matched
//! nothing.
//!
//! # Failure signal
//!
//! [`extract_articles`] returns `None` both when there is no document and
//! when the article selector matches nothing. Callers cannot (and do not
//! need to) tell these apart.

use crate::models::{ArticleRecord, SiteConfig};
use crate::utils::normalize_text;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, instrument, warn};

// Scheme followed by at least one non-whitespace character.
static ABSOLUTE_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://\S+").expect("absolute URL pattern is valid"));

fn parse_selector(selector: &str) -> Option<Selector> {
    match Selector::parse(selector) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            warn!(%selector, error = %e, "Invalid CSS selector; treating as no match");
            None
        }
    }
}

/// Return the first node under `node` matching `selector`.
///
/// An empty selector, an invalid selector and a selector without matches
/// all yield `None`.
pub fn select_one<'a>(node: ElementRef<'a>, selector: &str) -> Option<ElementRef<'a>> {
    if selector.is_empty() {
        return None;
    }
    let selector = parse_selector(selector)?;
    node.select(&selector).next()
}

/// Return every node under `node` matching `selector`, in document order.
///
/// Same absence rules as [`select_one`]; an empty match list is `None`.
pub fn select_all<'a>(node: ElementRef<'a>, selector: &str) -> Option<Vec<ElementRef<'a>>> {
    if selector.is_empty() {
        return None;
    }
    let selector = parse_selector(selector)?;
    let matched: Vec<ElementRef<'a>> = node.select(&selector).collect();
    if matched.is_empty() { None } else { Some(matched) }
}

/// Make `href` absolute by prefixing `base_url` unless it already is.
pub fn absolutize_href(base_url: &str, href: &str) -> String {
    if ABSOLUTE_URL.is_match(href) {
        href.to_string()
    } else {
        format!("{}{}", base_url, href)
    }
}

fn node_text(node: ElementRef<'_>) -> Option<String> {
    normalize_text(&node.text().collect::<String>())
}

fn node_href(node: ElementRef<'_>) -> Option<String> {
    // Tabs and line breaks inside a URL are dropped, as browsers do.
    let href: String = node
        .value()
        .attr("href")?
        .trim()
        .chars()
        .filter(|c| !matches!(c, '\t' | '\n' | '\r'))
        .collect();
    if href.is_empty() { None } else { Some(href) }
}

/// Extract one record from an article container.
pub fn extract_record(container: ElementRef<'_>, site: &SiteConfig) -> ArticleRecord {
    let time = select_one(container, &site.time_selector).and_then(node_text);
    let text = select_one(container, &site.text_selector).and_then(node_text);
    let href = select_one(container, &site.href_selector)
        .and_then(node_href)
        .map(|href| absolutize_href(&site.base_url, &href));

    ArticleRecord { time, text, href }
}

/// Extract all article records from a parsed page.
///
/// # Arguments
///
/// * `document` - The parsed page, or `None` if it could not be fetched
/// * `site` - Selectors and base URL for the requested mode
///
/// # Returns
///
/// Records in document order (duplicates preserved), or `None` when there is
/// no document or no container matched.
#[instrument(level = "info", skip_all, fields(article_selector = %site.article_selector))]
pub fn extract_articles(document: Option<&Html>, site: &SiteConfig) -> Option<Vec<ArticleRecord>> {
    let Some(document) = document else {
        warn!("No document to extract from");
        return None;
    };

    let Some(containers) = select_all(document.root_element(), &site.article_selector) else {
        warn!("Article selector matched nothing");
        return None;
    };

    let records: Vec<ArticleRecord> = containers
        .into_iter()
        .map(|container| extract_record(container, site))
        .collect();

    let with_text = records.iter().filter(|r| r.text.is_some()).count();
    info!(count = records.len(), with_text, "Extracted article records");
    debug!(records = ?records, "Article records");

    Some(records)
}
