//! Content model structs for pages, languages, and the site index.

use crate::headings::HeadingRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the two languages the site is published in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ar,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown language code: {0}")]
pub struct UnknownLanguage(pub String);

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Ar];

    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ar => "ar",
        }
    }

    /// The language a switch moves to
    pub fn other(&self) -> Language {
        match self {
            Language::En => Language::Ar,
            Language::Ar => Language::En,
        }
    }

    /// Text direction for the `dir` attribute
    pub fn dir(&self) -> &'static str {
        match self {
            Language::En => "ltr",
            Language::Ar => "rtl",
        }
    }

    /// Short label for the language toggle
    pub fn label(&self) -> &'static str {
        match self {
            Language::En => "EN",
            Language::Ar => "AR",
        }
    }

    /// Site-relative root of this language, e.g. `/ar/`
    pub fn root_path(&self) -> String {
        format!("/{}/", self.code())
    }
}

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" => Ok(Language::En),
            "ar" => Ok(Language::Ar),
            other => Err(UnknownLanguage(other.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Frontmatter metadata from markdown files
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Frontmatter {
    /// Empty when omitted; the builder then uses the file name
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub date: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub draft: bool,

    #[serde(default)]
    pub permalink: Option<String>,

    /// Overrides the language implied by the source directory
    #[serde(default)]
    pub lang: Option<String>,
}

/// A single rendered page of the site
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Display title
    pub title: String,

    pub language: Language,

    pub description: Option<String>,

    pub date: Option<NaiveDate>,

    pub tags: Vec<String>,

    /// Source file relative to the source directory, with `/` separators
    pub source_path: String,

    /// Output file relative to the output directory (e.g. `en/hello/index.html`)
    pub output_path: String,

    /// Body HTML with heading ids injected
    pub content_html: String,

    /// Table of contents, `None` when the page has no h2-h4 headings
    pub toc_html: Option<String>,

    pub headings: Vec<HeadingRecord>,

    pub word_count: usize,

    /// Minutes
    pub reading_time: usize,
}

impl Page {
    /// Public URL of this page under `base_url`
    pub fn url_with_base(&self, base_url: &str) -> String {
        url_for_output(&self.output_path, base_url)
    }

    /// Whether this page sits at the site root or a language root
    pub fn is_landing_page(&self) -> bool {
        self.output_path == "index.html"
            || Language::ALL
                .iter()
                .any(|l| self.output_path == format!("{}/index.html", l.code()))
    }
}

/// Map an output file path to its public URL (`en/x/index.html` → `/en/x/`).
pub fn url_for_output(output_path: &str, base_url: &str) -> String {
    let base = crate::config::normalize_base_url(base_url);
    let path = output_path.trim_start_matches('/');
    let path = path.strip_suffix("index.html").unwrap_or(path);
    format!("{}{}", base, path)
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Permalink escapes the output directory: {0}")]
pub struct UnsafePermalink(pub String);

/// Canonical output path for a permalink (`/en/about/` → `en/about/index.html`).
///
/// Empty and `.` segments are dropped so aliases of one file compare equal;
/// `..` is rejected.
pub fn normalize_permalink(permalink: &str) -> Result<String, UnsafePermalink> {
    let raw = permalink.trim();
    let mut segments = Vec::new();
    for segment in raw.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => return Err(UnsafePermalink(raw.to_string())),
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    let is_file = segments.last().is_some_and(|last| last.ends_with(".html"));
    Ok(if joined.is_empty() {
        "index.html".to_string()
    } else if is_file && !raw.ends_with('/') {
        joined
    } else {
        format!("{}/index.html", joined)
    })
}

/// A page produced by the build itself rather than from a source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeneratedPage {
    /// `/<lang>/index.html` listing that language's collection
    LanguageIndex(Language),
    /// `/index.html` redirecting to the default language
    RootRedirect(Language),
    NotFound,
}

impl GeneratedPage {
    pub fn output_path(&self) -> String {
        match self {
            GeneratedPage::LanguageIndex(lang) => format!("{}/index.html", lang.code()),
            GeneratedPage::RootRedirect(_) => "index.html".to_string(),
            GeneratedPage::NotFound => "404.html".to_string(),
        }
    }
}

/// Complete site index containing all rendered pages
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SiteIndex {
    pub pages: Vec<Page>,

    /// Pages the build emits on top of `pages`
    pub generated: Vec<GeneratedPage>,
}

impl SiteIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pages listed for a language, newest first.
    ///
    /// Membership follows the page's resolved language wherever its source
    /// lives. Landing pages are excluded. Pages sort by date and then by
    /// source path, and the result is reversed.
    pub fn collection(&self, language: Language) -> Vec<&Page> {
        let mut pages: Vec<&Page> = self
            .pages
            .iter()
            .filter(|p| p.language == language && !p.is_landing_page())
            .collect();
        pages.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then_with(|| a.source_path.cmp(&b.source_path))
        });
        pages.reverse();
        pages
    }

    pub fn find_by_output(&self, output_path: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.output_path == output_path)
    }
}
