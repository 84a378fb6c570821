//! # tarjama-core
//!
//! Core library for the tarjama bilingual static site generator.
//!
//! This crate turns markdown sources into page bodies with stable heading
//! anchors and a table of contents, and guards a build run against two pages
//! claiming the same output path.

pub mod builder;
pub mod config;
pub mod filters;
pub mod frontmatter;
pub mod guard;
pub mod headings;
pub mod markdown;
pub mod models;
pub mod slug;
pub mod toc;

pub use builder::{BuildError, SiteBuilder};
pub use config::Config;
pub use guard::{BuildContext, DuplicatePath, OutputPathGuard};
pub use headings::{collect_headings, extract_headings, inject_heading_ids, HeadingRecord};
pub use models::{
    Frontmatter, GeneratedPage, Language, Page, SiteIndex, UnknownLanguage, UnsafePermalink,
};
pub use slug::{assign_slugs, slugify, SlugTable};
pub use toc::build_toc;
