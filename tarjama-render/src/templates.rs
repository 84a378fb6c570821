//! Askama template definitions.

use askama::Template;
use tarjama_core::filters::format_date;
use tarjama_core::{Language, Page};

/// Page chrome shared by every template
#[derive(Debug, Clone)]
pub struct Layout {
    pub site_title: String,
    pub site_author: String,
    pub year: i32,
    pub base_url: String,
    pub language: Language,
}

impl Layout {
    pub fn lang(&self) -> &'static str {
        self.language.code()
    }

    pub fn dir(&self) -> &'static str {
        self.language.dir()
    }

    /// Label of the language the toggle switches to
    pub fn switch_label(&self) -> &'static str {
        self.language.other().label()
    }

    pub fn home_url(&self) -> String {
        format!("{}{}/", self.base_url, self.language.code())
    }

    /// Root of the other language; `tarjama switch` finds the exact page
    pub fn switch_url(&self) -> String {
        format!("{}{}/", self.base_url, self.language.other().code())
    }
}

/// A page entry in a language listing
#[derive(Debug, Clone)]
pub struct PostEntry {
    pub url: String,
    pub title: String,
    pub date: Option<String>,
    pub description: Option<String>,
    pub reading_time: usize,
}

impl PostEntry {
    pub fn from_page(page: &Page, base_url: &str) -> Self {
        Self {
            url: page.url_with_base(base_url),
            title: page.title.clone(),
            date: page.date.as_ref().map(|d| format_date(d, "yyyy-MM-dd")),
            description: page.description.clone(),
            reading_time: page.reading_time,
        }
    }
}

/// Single page template
#[derive(Template)]
#[template(path = "post.html")]
pub struct PostTemplate {
    pub layout: Layout,

    // Page metadata
    pub title: String,
    pub description: String,
    pub date: Option<String>,
    pub tags: Vec<String>,
    pub reading_time: usize,
    pub word_count: usize,

    // Content
    pub content: String,
    pub toc_html: Option<String>,
}

/// Language landing page listing that language's pages, newest first
#[derive(Template)]
#[template(path = "language_index.html")]
pub struct LanguageIndexTemplate {
    pub layout: Layout,
    pub site_description: String,
    pub posts: Vec<PostEntry>,
}

/// Root page sending visitors to a language root
#[derive(Template)]
#[template(path = "redirect.html")]
pub struct RedirectTemplate {
    pub target: String,
}

/// 404 error page template
#[derive(Template)]
#[template(path = "404.html")]
pub struct NotFoundTemplate {
    pub layout: Layout,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(language: Language) -> Layout {
        Layout {
            site_title: "Site".into(),
            site_author: "Author".into(),
            year: 2026,
            base_url: "/".into(),
            language,
        }
    }

    #[test]
    fn test_post_template_rtl() {
        let html = PostTemplate {
            layout: layout(Language::Ar),
            title: "عنوان".into(),
            description: "وصف".into(),
            date: Some("2025-01-01".into()),
            tags: vec!["rust".into()],
            reading_time: 3,
            word_count: 500,
            content: r#"<h2 id="x">X</h2>"#.into(),
            toc_html: Some(r##"<ul class="toc-list"><li class="toc-item toc-h2"><a href="#x">X</a></li></ul>"##.into()),
        }
        .render()
        .unwrap();

        assert!(html.contains(r#"<html lang="ar" dir="rtl">"#));
        assert!(html.contains(r#"<h2 id="x">X</h2>"#));
        assert!(html.contains(r#"<nav class="toc">"#));
        assert!(html.contains(r#"id="lang-toggle""#));
        assert!(html.contains(r#"href="/en/""#));
        assert!(html.contains(">EN<"));
        assert!(html.contains(r#"<meta name="description" content="وصف">"#));
    }

    #[test]
    fn test_post_template_without_toc() {
        let html = PostTemplate {
            layout: layout(Language::En),
            title: "Plain".into(),
            description: "Plain".into(),
            date: None,
            tags: vec![],
            reading_time: 1,
            word_count: 10,
            content: "<p>body</p>".into(),
            toc_html: None,
        }
        .render()
        .unwrap();

        assert!(html.contains(r#"<html lang="en" dir="ltr">"#));
        assert!(!html.contains(r#"<nav class="toc">"#));
    }

    #[test]
    fn test_title_is_escaped() {
        let html = NotFoundTemplate {
            layout: Layout {
                site_title: "A <b> site".into(),
                ..layout(Language::En)
            },
        }
        .render()
        .unwrap();
        assert!(html.contains("A &#60;b&#62; site") || html.contains("A &lt;b&gt; site"));
    }

    #[test]
    fn test_language_index_lists_posts() {
        let html = LanguageIndexTemplate {
            layout: layout(Language::En),
            site_description: "Desc".into(),
            posts: vec![PostEntry {
                url: "/en/hello/".into(),
                title: "Hello".into(),
                date: Some("2025-01-02".into()),
                description: None,
                reading_time: 2,
            }],
        }
        .render()
        .unwrap();
        assert!(html.contains(r#"<a href="/en/hello/">Hello</a>"#));
        assert!(html.contains("2025-01-02"));
    }

    #[test]
    fn test_redirect_template() {
        let html = RedirectTemplate {
            target: "/en/".into(),
        }
        .render()
        .unwrap();
        assert!(html.contains(r#"content="0; url=/en/""#));
    }
}
