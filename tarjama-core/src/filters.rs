//! Small helpers used by page templates.

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::OnceLock;

/// Default reading speed in words per minute.
pub const DEFAULT_WORDS_PER_MINUTE: usize = 200;

static TAG_REGEX: OnceLock<Regex> = OnceLock::new();

fn tag_regex() -> &'static Regex {
    TAG_REGEX.get_or_init(|| Regex::new(r"<[^>]*>").unwrap())
}

/// Count words in an HTML fragment, ignoring markup.
pub fn word_count(html: &str) -> usize {
    tag_regex()
        .replace_all(html, " ")
        .split_whitespace()
        .count()
}

/// Estimated reading time in whole minutes, never less than one.
///
/// A `words_per_minute` of zero falls back to [`DEFAULT_WORDS_PER_MINUTE`].
pub fn reading_time(html: &str, words_per_minute: usize) -> usize {
    let wpm = if words_per_minute == 0 {
        DEFAULT_WORDS_PER_MINUTE
    } else {
        words_per_minute
    };
    word_count(html).div_ceil(wpm).max(1)
}

/// Format a date for templates: `"yyyy"` gives the year, anything else ISO.
pub fn format_date(date: &NaiveDate, format: &str) -> String {
    if format == "yyyy" {
        date.year().to_string()
    } else {
        date.format("%Y-%m-%d").to_string()
    }
}
