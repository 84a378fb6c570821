//! Markdown processing pipeline.
//!
//! Produces the page body HTML that heading extraction and id injection
//! operate on.

pub mod shortcodes;

use crate::headings::{collect_headings, inject_heading_ids, HeadingRecord};
use crate::toc::build_toc;
use pulldown_cmark::{html, Event, Options, Parser};

pub use shortcodes::expand_shortcodes;

/// Body HTML of one page together with its heading anchors.
#[derive(Debug, Clone, Default)]
pub struct RenderedBody {
    /// HTML with ids on every level 2-4 heading
    pub html: String,
    pub headings: Vec<HeadingRecord>,
    pub toc_html: Option<String>,
}

/// Markdown processor with the site's extensions
pub struct MarkdownProcessor {
    options: Options,
}

impl MarkdownProcessor {
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);

        Self { options }
    }

    /// Convert markdown to HTML. Raw HTML passes through and single newlines
    /// become `<br />`.
    pub fn to_html(&self, markdown: &str) -> String {
        let source = expand_shortcodes(markdown);
        let parser = Parser::new_ext(&source, self.options).map(|event| match event {
            Event::SoftBreak => Event::HardBreak,
            other => other,
        });

        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);
        html_output
    }

    /// Render markdown and derive the heading anchors and table of contents.
    ///
    /// The TOC and the injected ids come from two independent passes over the
    /// same HTML and therefore agree.
    pub fn render(&self, markdown: &str) -> RenderedBody {
        let html = self.to_html(markdown);
        let headings = collect_headings(&html);
        let toc_html = build_toc(&headings);
        let html = inject_heading_ids(&html);

        RenderedBody {
            html,
            headings,
            toc_html,
        }
    }
}

impl Default for MarkdownProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headings::heading_ids;

    #[test]
    fn test_basic_markdown() {
        let processor = MarkdownProcessor::new();
        let html = processor.to_html("# Hello World\n\nThis is a **test**.");
        assert!(html.contains("<h1>Hello World</h1>"));
        assert!(html.contains("<strong>test</strong>"));
    }

    #[test]
    fn test_soft_breaks_become_br() {
        let processor = MarkdownProcessor::new();
        let html = processor.to_html("line one\nline two");
        assert!(html.contains("line one<br />"));
    }

    #[test]
    fn test_raw_html_passthrough() {
        let processor = MarkdownProcessor::new();
        let html = processor.to_html("<div class=\"note\">kept</div>\n");
        assert!(html.contains("<div class=\"note\">kept</div>"));
    }

    #[test]
    fn test_tables() {
        let processor = MarkdownProcessor::new();
        let md = "| A | B |\n|---|---|\n| 1 | 2 |\n";
        let html = processor.to_html(md);
        assert!(html.contains("<table>"));
        assert!(html.contains("<th>A</th>"));
    }

    #[test]
    fn test_render_injects_ids_matching_toc() {
        let processor = MarkdownProcessor::new();
        let body = processor.render("# Title\n\n## Intro\n\ntext\n\n## Intro\n\n### `code` step\n");
        assert!(body.html.contains("<h1>Title</h1>"));
        assert!(body.html.contains(r#"<h2 id="intro">Intro</h2>"#));
        assert!(body.html.contains(r#"<h2 id="intro-1">Intro</h2>"#));

        let slugs: Vec<String> = body.headings.iter().map(|h| h.slug.clone()).collect();
        assert_eq!(slugs, heading_ids(&body.html));
        assert_eq!(slugs, vec!["intro", "intro-1", "code-step"]);

        let toc = body.toc_html.unwrap();
        assert!(toc.contains(r##"<a href="#code-step">code step</a>"##));
    }

    #[test]
    fn test_render_without_headings_has_no_toc() {
        let processor = MarkdownProcessor::new();
        let body = processor.render("# Only a title\n\nBody.");
        assert!(body.toc_html.is_none());
        assert!(body.headings.is_empty());
    }

    #[test]
    fn test_shortcodes_in_markdown() {
        let processor = MarkdownProcessor::new();
        let html = processor.to_html("{% img \"assets/images/a.jpg\", \"Alt\" %}\n");
        assert!(html.contains(r#"<img src="/assets/images/a.jpg" alt="Alt""#));
    }
}
