//! Utility functions for text normalization, markup escaping and logging.
//!
//! This module provides helper functions used throughout the application:
//! - Whitespace normalization of scraped node text
//! - HTML escaping for the markup understood by the delivery surface
//! - String truncation for log previews

use itertools::Itertools;

/// Collapse every whitespace run into a single space and trim both ends.
///
/// Scraped node text usually carries the page's indentation and line breaks.
/// Line breaks must not leak into formatted messages because the chunker
/// splits on them.
///
/// # Returns
///
/// `None` if nothing but whitespace was found.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_text("\n  Breaking\n   news  "), Some("Breaking news".to_string()));
/// assert_eq!(normalize_text(" \t\n"), None);
/// ```
pub fn normalize_text(raw: &str) -> Option<String> {
    let normalized = raw.split_whitespace().join(" ");
    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}

/// Escape text for an HTML body (`&`, `<`, `>`).
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape text for a double-quoted HTML attribute value.
///
/// Line breaks are encoded too so a value never spans two message lines.
pub fn escape_attr(s: &str) -> String {
    escape_html(s)
        .replace('"', "&quot;")
        .replace('\n', "&#10;")
        .replace('\r', "&#13;")
}

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to `max` characters with an ellipsis and
/// character count indicator appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 chars)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    let len = s.chars().count();
    if len <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max).collect();
        format!("{}…(+{} chars)", head, len - max)
    }
}
