//! Slug generation and per-document collision handling.

use std::collections::HashMap;

/// Base slug used when a heading's text strips down to nothing.
pub const FALLBACK_SLUG: &str = "heading";

/// Convert heading text to an anchor-safe slug
///
/// Rules:
/// - Lowercase
/// - Keep ASCII letters, digits, hyphens, whitespace and the Arabic block (U+0600..=U+06FF)
/// - Collapse whitespace runs into single hyphens
/// - Trim leading/trailing hyphens
///
/// # Examples
///
/// ```
/// use tarjama_core::slugify;
///
/// assert_eq!(slugify("Hello World"), "hello-world");
/// assert_eq!(slugify("Rust & Safety"), "rust-safety");
/// assert_eq!(slugify("مرحبا بالعالم"), "مرحبا-بالعالم");
/// ```
pub fn slugify(input: &str) -> String {
    let lowercased = input.to_lowercase();

    let cleaned = lowercased
        .chars()
        .filter(|&c| is_slug_char(c) || c.is_whitespace())
        .collect::<String>();

    cleaned
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .trim_matches('-')
        .to_string()
}

fn is_slug_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || ('\u{0600}'..='\u{06FF}').contains(&c)
}

/// Occurrence table for one document pass.
///
/// A fresh table must be used for every document; two tables fed the same
/// texts in the same order hand out the same slugs.
#[derive(Debug, Clone, Default)]
pub struct SlugTable {
    counts: HashMap<String, usize>,
}

impl SlugTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slug `text` and make the result unique within this table.
    ///
    /// The first use of a base keeps it unchanged; later uses get `-1`, `-2`, ...
    pub fn assign(&mut self, text: &str) -> String {
        let base = slugify(text);
        if base.is_empty() {
            self.claim(FALLBACK_SLUG.to_string())
        } else {
            self.claim(base)
        }
    }

    /// Mark an author-supplied id as taken without renaming it.
    pub fn reserve(&mut self, id: &str) {
        self.counts.entry(id.to_string()).or_insert(1);
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.counts.contains_key(slug)
    }

    fn claim(&mut self, base: String) -> String {
        let Some(&seen) = self.counts.get(&base) else {
            self.counts.insert(base.clone(), 1);
            return base;
        };

        let mut n = seen;
        loop {
            let candidate = format!("{}-{}", base, n);
            n += 1;
            // A literal heading may already own "base-n"
            if !self.counts.contains_key(&candidate) {
                self.counts.insert(base, n);
                self.counts.insert(candidate.clone(), 1);
                return candidate;
            }
        }
    }
}

/// Assign slugs to an ordered sequence of heading texts using a fresh table.
pub fn assign_slugs<'a, I>(texts: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut table = SlugTable::new();
    texts.into_iter().map(|t| table.assign(t)).collect()
}
