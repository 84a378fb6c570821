//! # tarjama-render
//!
//! Template rendering library for tarjama.
//!
//! This crate handles HTML template rendering using Askama.

pub mod templates;

pub use templates::{
    LanguageIndexTemplate, Layout, NotFoundTemplate, PostEntry, PostTemplate, RedirectTemplate,
};
