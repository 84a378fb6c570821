//! Heading extraction and id injection over rendered HTML.
//!
//! Matching is lexical: an opening `<h2>`..`<h4>` tag pairs with the next
//! closing tag of the same level. A heading that nests another heading-like
//! tag of the same level mis-pairs, and that is left as is.
//!
//! Extraction (feeding the table of contents) and injection (rewriting the
//! page body) each run their own [`SlugTable`] over the same ordered headings,
//! so the anchors they produce agree without sharing state.

use crate::slug::SlugTable;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// A heading of the rendered page, with the slug its anchor uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingRecord {
    pub level: u8,
    pub text: String,
    pub slug: String,
}

/// A heading as found in the HTML, before slug assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawHeading {
    pub level: u8,
    pub text: String,
    /// `id` attribute already present on the opening tag
    pub id: Option<String>,
}

static OPEN_TAG_REGEX: OnceLock<Regex> = OnceLock::new();
static ID_ATTR_REGEX: OnceLock<Regex> = OnceLock::new();
static TAG_REGEX: OnceLock<Regex> = OnceLock::new();

fn open_tag_regex() -> &'static Regex {
    OPEN_TAG_REGEX.get_or_init(|| Regex::new(r"(?i)<h([2-4])(\s[^>]*)?>").unwrap())
}

fn id_attr_regex() -> &'static Regex {
    ID_ATTR_REGEX
        .get_or_init(|| Regex::new(r#"(?i)\sid\s*=\s*["']?([^"'\s>]+)["']?"#).unwrap())
}

fn tag_regex() -> &'static Regex {
    TAG_REGEX.get_or_init(|| Regex::new(r"<[^>]*>").unwrap())
}

/// Byte offsets of one matched heading element.
#[derive(Debug)]
struct HeadingSpan<'a> {
    level: u8,
    attrs: &'a str,
    inner: &'a str,
    /// Offset just past the `>` of the opening tag
    open_end: usize,
    end: usize,
}

fn scan_headings(html: &str) -> Vec<HeadingSpan<'_>> {
    // ASCII lowercasing keeps byte offsets aligned with `html`
    let lower = html.to_ascii_lowercase();
    let mut spans = Vec::new();
    let mut pos = 0;

    while let Some(caps) = open_tag_regex().captures_at(html, pos) {
        let (Some(open), Some(level)) = (caps.get(0), caps.get(1)) else {
            break;
        };
        let level = level.as_str().as_bytes()[0] - b'0';
        let closing = format!("</h{}>", level);

        match lower[open.end()..].find(&closing) {
            Some(offset) => {
                let inner_end = open.end() + offset;
                let end = inner_end + closing.len();
                spans.push(HeadingSpan {
                    level,
                    attrs: caps.get(2).map_or("", |m| m.as_str()),
                    inner: &html[open.end()..inner_end],
                    open_end: open.end(),
                    end,
                });
                pos = end;
            }
            None => pos = open.end(),
        }
    }

    spans
}

/// Plain text of a heading: nested tags removed, whitespace trimmed.
fn heading_text(inner: &str) -> String {
    tag_regex().replace_all(inner, "").trim().to_string()
}

fn existing_id(attrs: &str) -> Option<String> {
    id_attr_regex()
        .captures(attrs)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Extract level 2-4 headings in document order.
///
/// Headings whose text is empty after stripping tags are skipped.
pub fn extract_headings(html: &str) -> Vec<RawHeading> {
    scan_headings(html)
        .into_iter()
        .filter_map(|span| {
            let text = heading_text(span.inner);
            if text.is_empty() {
                return None;
            }
            Some(RawHeading {
                level: span.level,
                text,
                id: existing_id(span.attrs),
            })
        })
        .collect()
}

/// Assign slugs to extracted headings with a fresh per-document table.
///
/// Author-supplied ids are kept verbatim and reserved so generated slugs
/// never collide with them.
pub fn assign_heading_slugs(headings: Vec<RawHeading>) -> Vec<HeadingRecord> {
    let mut table = SlugTable::new();
    headings
        .into_iter()
        .map(|h| {
            let slug = match h.id {
                Some(id) => {
                    table.reserve(&id);
                    id
                }
                None => table.assign(&h.text),
            };
            HeadingRecord {
                level: h.level,
                text: h.text,
                slug,
            }
        })
        .collect()
}

/// Extract headings and assign their slugs in one call.
pub fn collect_headings(html: &str) -> Vec<HeadingRecord> {
    assign_heading_slugs(extract_headings(html))
}

/// Add an `id` attribute to every level 2-4 heading that lacks one.
///
/// Existing ids are left untouched. Running this twice yields the same
/// output as running it once.
pub fn inject_heading_ids(html: &str) -> String {
    let mut table = SlugTable::new();
    let mut out = String::with_capacity(html.len() + 64);
    let mut last = 0;

    for span in scan_headings(html) {
        let text = heading_text(span.inner);
        if text.is_empty() {
            continue;
        }
        if let Some(id) = existing_id(span.attrs) {
            table.reserve(&id);
            continue;
        }

        let slug = table.assign(&text);
        // Insert before the closing `>` of the opening tag
        let insert_at = span.open_end - 1;
        out.push_str(&html[last..insert_at]);
        out.push_str(&format!(" id=\"{}\"", slug));
        out.push_str(&html[insert_at..span.end]);
        last = span.end;
    }

    out.push_str(&html[last..]);
    out
}

/// Ids carried by level 2-4 headings with text, in document order.
pub fn heading_ids(html: &str) -> Vec<String> {
    scan_headings(html)
        .into_iter()
        .filter(|span| !heading_text(span.inner).is_empty())
        .filter_map(|span| existing_id(span.attrs))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_levels_two_to_four() {
        let html = "<h1>Title</h1><h2>Intro</h2><h3>Detail</h3><h4>Note</h4><h5>Skip</h5>";
        let headings = extract_headings(html);
        let levels: Vec<u8> = headings.iter().map(|h| h.level).collect();
        assert_eq!(levels, vec![2, 3, 4]);
        assert_eq!(headings[0].text, "Intro");
    }

    #[test]
    fn test_strips_nested_markup() {
        let html = "<h2>Using <code>cargo</code> <em>well</em></h2>";
        let headings = extract_headings(html);
        assert_eq!(headings[0].text, "Using cargo well");
    }

    #[test]
    fn test_skips_empty_headings() {
        let html = "<h2>   </h2><h2><img src=\"x.png\"></h2><h3>Real</h3>";
        let headings = collect_headings(html);
        assert_eq!(headings.len(), 1);
        assert_eq!(headings[0].slug, "real");
    }

    #[test]
    fn test_case_insensitive_tags() {
        let html = "<H2 class=\"x\">Loud</H2>";
        let headings = collect_headings(html);
        assert_eq!(headings[0].slug, "loud");
    }

    #[test]
    fn test_ignores_header_elements() {
        let html = "<header>Site</header><h2>Body</h2>";
        let headings = extract_headings(html);
        assert_eq!(headings.len(), 1);
        assert_eq!(headings[0].text, "Body");
    }

    #[test]
    fn test_unclosed_heading_is_ignored() {
        let html = "<h2>Dangling<h3>Closed</h3>";
        let headings = extract_headings(html);
        assert_eq!(headings.len(), 1);
        assert_eq!(headings[0].level, 3);
    }

    #[test]
    fn test_nested_same_level_mispairs() {
        let html = "<h2>Outer <h2>Inner</h2> tail</h2>";
        let headings = extract_headings(html);
        assert_eq!(headings.len(), 1);
        assert_eq!(headings[0].text, "Outer Inner");
    }

    #[test]
    fn test_existing_id_is_captured() {
        let html = "<h2 id=\"custom\">Intro</h2><h2>Intro</h2>";
        let headings = collect_headings(html);
        assert_eq!(headings[0].slug, "custom");
        assert_eq!(headings[1].slug, "intro");
    }

    #[test]
    fn test_injects_ids() {
        let html = "<h2>Intro</h2>\n<p>x</p>\n<h3 class=\"sub\">Intro</h3>";
        let out = inject_heading_ids(html);
        assert_eq!(
            out,
            "<h2 id=\"intro\">Intro</h2>\n<p>x</p>\n<h3 class=\"sub\" id=\"intro-1\">Intro</h3>"
        );
    }

    #[test]
    fn test_existing_ids_untouched() {
        let html = "<h2 id='keep'>Intro</h2><h2>Keep</h2>";
        let out = inject_heading_ids(html);
        assert_eq!(out, "<h2 id='keep'>Intro</h2><h2 id=\"keep-1\">Keep</h2>");
    }

    #[test]
    fn test_injection_is_idempotent() {
        let html = "<h2>A</h2><h3>A</h3><h4>!!!</h4><h2 id=\"b\">B</h2><h2>B</h2>";
        let once = inject_heading_ids(html);
        let twice = inject_heading_ids(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_toc_slugs_match_injected_ids() {
        let html = concat!(
            "<h2>Overview</h2><p>text</p>",
            "<h3>Setup <code>tool</code></h3>",
            "<h2 id=\"setup\">Manual</h2>",
            "<h3>Setup</h3>",
            "<h4>???</h4>",
            "<h2>   </h2>",
            "<h4>مقدمة</h4>",
            "<h2>Overview</h2>",
        );
        let slugs: Vec<String> = collect_headings(html).into_iter().map(|h| h.slug).collect();
        let injected = heading_ids(&inject_heading_ids(html));
        assert_eq!(slugs, injected);
        assert_eq!(
            slugs,
            vec!["overview", "setup-tool", "setup", "setup-1", "heading", "مقدمة", "overview-1"]
        );
    }

    #[test]
    fn test_no_headings_leaves_html_alone() {
        let html = "<p>Nothing to see</p>";
        assert_eq!(inject_heading_ids(html), html);
        assert!(collect_headings(html).is_empty());
    }
}
