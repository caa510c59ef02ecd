//! Splitting of formatted text into delivery-sized messages.
//!
//! Chat transports cap the size of a single message (4096 characters for
//! Telegram). Text at or under the hard limit is delivered as is. Longer text
//! is split on line boundaries into chunks kept under a softer limit, leaving
//! headroom for markup the transport may add.
//!
//! Lines are never split. A single line at or over the soft limit gets a
//! chunk of its own and may exceed the hard limit.
//!
//! All lengths are counted in characters, not bytes.

use crate::models::{ChunkedMessage, NO_RESULTS_MESSAGE};
use tracing::{debug, instrument, warn};

/// Default soft limit for a chunk.
pub const SOFT_LIMIT: usize = 3900;
/// Default length under which text is delivered unsplit.
pub const HARD_LIMIT: usize = 4000;

/// Split `text` into chunks.
///
/// # Arguments
///
/// * `text` - Newline-separated formatted message
/// * `soft_limit` - A chunk is closed before it would reach this length
/// * `hard_limit` - Text up to this length is returned as a single chunk
///
/// # Returns
///
/// The chunks in order; concatenated they equal `text`. Empty input yields
/// the single [`NO_RESULTS_MESSAGE`] chunk.
#[instrument(level = "debug", skip(text))]
pub fn chunk_message(text: &str, soft_limit: usize, hard_limit: usize) -> ChunkedMessage {
    if text.is_empty() {
        return vec![NO_RESULTS_MESSAGE.to_string()];
    }

    let total = text.chars().count();
    if total <= hard_limit {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for line in text.split_inclusive('\n') {
        let line_len = line.chars().count();
        if !current.is_empty() && current_len + line_len >= soft_limit {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if line_len >= soft_limit {
            warn!(line_len, soft_limit, "Line exceeds soft limit; delivering it unsplit");
        }
        current.push_str(line);
        current_len += line_len;
    }
    chunks.push(current);

    debug!(total, chunks = chunks.len(), "Split message into chunks");
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(count: usize, width: usize) -> String {
        // `width` includes the trailing newline.
        (0..count)
            .map(|i| {
                let prefix = format!("{:04}", i);
                format!("{}{}\n", prefix, "x".repeat(width - prefix.len() - 1))
            })
            .collect()
    }

    fn len(s: &str) -> usize {
        s.chars().count()
    }

    #[test]
    fn test_empty_input_is_sentinel() {
        assert_eq!(chunk_message("", SOFT_LIMIT, HARD_LIMIT), vec![NO_RESULTS_MESSAGE.to_string()]);
    }

    #[test]
    fn test_short_text_is_unchanged() {
        let text = "[10:15] -- A\n[10:20] -- B\n";
        assert_eq!(chunk_message(text, SOFT_LIMIT, HARD_LIMIT), vec![text.to_string()]);
    }

    #[test]
    fn test_text_at_hard_limit_is_unchanged() {
        let text = "y".repeat(HARD_LIMIT);
        assert_eq!(chunk_message(&text, SOFT_LIMIT, HARD_LIMIT), vec![text.clone()]);
    }

    #[test]
    fn test_long_text_splits_on_lines() {
        let text = lines(50, 100);
        let chunks = chunk_message(&text, SOFT_LIMIT, HARD_LIMIT);

        assert_eq!(chunks.len(), 2);
        assert_eq!(len(&chunks[0]), 3800);
        assert_eq!(len(&chunks[1]), 1200);
        assert!(chunks.iter().all(|c| c.ends_with('\n')));
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn test_chunks_stay_under_soft_limit() {
        let text = lines(300, 73);
        let chunks = chunk_message(&text, SOFT_LIMIT, HARD_LIMIT);

        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|c| len(c) < SOFT_LIMIT));
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn test_trailing_text_without_newline_is_kept() {
        let mut text = lines(60, 100);
        text.push_str("tail without newline");
        let chunks = chunk_message(&text, SOFT_LIMIT, HARD_LIMIT);

        assert_eq!(chunks.last().unwrap().rsplit('\n').next(), Some("tail without newline"));
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn test_overlong_line_gets_own_chunk() {
        let long_line = format!("{}\n", "L".repeat(5000));
        let text = format!("short one\n{}short two\n", long_line);
        let chunks = chunk_message(&text, SOFT_LIMIT, HARD_LIMIT);

        assert_eq!(
            chunks,
            vec!["short one\n".to_string(), long_line.clone(), "short two\n".to_string()]
        );
        assert!(len(&chunks[1]) > HARD_LIMIT);
    }

    #[test]
    fn test_lengths_count_characters() {
        // 2-byte characters: 3000 chars, 6000 bytes.
        let text = format!("{}\n", "ї".repeat(2999));
        assert_eq!(chunk_message(&text, SOFT_LIMIT, HARD_LIMIT), vec![text.clone()]);
    }

    #[test]
    fn test_round_trip_and_bounds_small_limits() {
        for count in [1usize, 2, 7, 23] {
            for width in [3usize, 9, 17] {
                let text = lines(count, width.max(6));
                let chunks = chunk_message(&text, 40, 50);

                assert_eq!(chunks.concat(), text);
                for chunk in &chunks {
                    let single_line = chunk.matches('\n').count() <= 1;
                    assert!(len(chunk) < 40 || single_line || len(&text) <= 50);
                }
            }
        }
    }
}
