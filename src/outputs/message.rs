//! Rendering of article records into one delivery-ready text block.
//!
//! Each record with text becomes one line:
//!
//! ```text
//! [10:15] -- First headline <a href="https://example.com/news/1">[ Read article ]</a>
//! ```
//!
//! The delivery surface parses HTML markup, so scraped values are escaped.
//! A missing time renders as `[]`; a missing link drops the anchor.

use crate::models::ArticleRecord;
use crate::utils::{escape_attr, escape_html};
use tracing::{debug, instrument, warn};

/// Render one record, or `None` if it has no text to show.
pub fn format_record(record: &ArticleRecord, link_label: &str) -> Option<String> {
    let text = record.text.as_deref()?;
    let mut line = format!(
        "[{}] -- {}",
        escape_html(record.time.as_deref().unwrap_or_default()),
        escape_html(text)
    );
    if let Some(href) = record.href.as_deref() {
        line.push_str(&format!(
            " <a href=\"{}\">{}</a>",
            escape_attr(href),
            escape_html(link_label)
        ));
    }
    Some(line)
}

/// Render all records with text, one newline-terminated line each.
///
/// # Returns
///
/// The joined lines in input order, or an empty string if no record had text.
#[instrument(level = "debug", skip_all, fields(records = records.len()))]
pub fn format_articles(records: &[ArticleRecord], link_label: &str) -> String {
    let mut out = String::new();
    let mut kept = 0usize;
    for line in records.iter().filter_map(|r| format_record(r, link_label)) {
        out.push_str(&line);
        out.push('\n');
        kept += 1;
    }

    if kept == 0 {
        warn!("No article had text; formatted message is empty");
    } else {
        debug!(kept, skipped = records.len() - kept, "Formatted articles");
    }
    out
}
