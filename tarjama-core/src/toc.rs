//! Table of contents rendering.

use crate::headings::HeadingRecord;

/// Render a flat table of contents for the given headings.
///
/// Returns `None` when there are no headings, meaning the page gets no TOC.
/// Levels are carried as a `toc-hN` class only; an h4 directly after an h2
/// stays where it is rather than being re-parented.
pub fn build_toc(headings: &[HeadingRecord]) -> Option<String> {
    if headings.is_empty() {
        return None;
    }

    let mut html = String::from(r#"<ul class="toc-list">"#);
    for h in headings {
        html.push_str(&format!(
            r##"<li class="toc-item toc-h{}"><a href="#{}">{}</a></li>"##,
            h.level, h.slug, h.text
        ));
    }
    html.push_str("</ul>");
    Some(html)
}
