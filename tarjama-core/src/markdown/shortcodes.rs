//! `{% img ... %}` and `{% video ... %}` shortcodes, expanded before parsing.

use regex::Regex;
use std::sync::OnceLock;

static SHORTCODE_REGEX: OnceLock<Regex> = OnceLock::new();
static ARG_REGEX: OnceLock<Regex> = OnceLock::new();

fn shortcode_regex() -> &'static Regex {
    SHORTCODE_REGEX.get_or_init(|| Regex::new(r"\{%\s*(img|video)\s+(.*?)\s*%\}").unwrap())
}

fn arg_regex() -> &'static Regex {
    ARG_REGEX.get_or_init(|| Regex::new(r#""([^"]*)"|'([^']*)'"#).unwrap())
}

/// Expand every shortcode in `source` into its HTML.
pub fn expand_shortcodes(source: &str) -> String {
    shortcode_regex()
        .replace_all(source, |caps: &regex::Captures| {
            let args = parse_args(&caps[2]);
            let arg = |i: usize| args.get(i).map(String::as_str).unwrap_or("");
            match &caps[1] {
                "img" => render_image(arg(0), arg(1), arg(2)),
                _ => render_video(arg(0), arg(1), arg(2)),
            }
        })
        .into_owned()
}

fn parse_args(raw: &str) -> Vec<String> {
    arg_regex()
        .captures_iter(raw)
        .filter_map(|c| c.get(1).or_else(|| c.get(2)))
        .map(|m| m.as_str().to_string())
        .collect()
}

fn site_absolute(src: &str) -> String {
    if src.starts_with('/') {
        src.to_string()
    } else {
        format!("/{}", src)
    }
}

/// Responsive figure: `{% img "assets/images/a.jpg", "Alt text", "class" %}`
pub fn render_image(src: &str, alt: &str, class: &str) -> String {
    if src.is_empty() {
        return String::new();
    }
    let class_attr = if class.is_empty() {
        String::new()
    } else {
        format!(r#" class="{}""#, attr_escape(class))
    };
    format!(
        r#"<figure><img src="{}" alt="{}"{} loading="lazy" decoding="async"><figcaption>{}</figcaption></figure>"#,
        attr_escape(&site_absolute(src)),
        attr_escape(alt),
        class_attr,
        alt
    )
}

/// MP4 embed: `{% video "assets/videos/clip.mp4", "assets/images/poster.jpg", "class" %}`
pub fn render_video(src: &str, poster: &str, class: &str) -> String {
    if src.is_empty() {
        return String::new();
    }
    let class_attr = if class.is_empty() {
        String::new()
    } else {
        format!(r#" class="{}""#, attr_escape(class))
    };
    let poster_attr = if poster.is_empty() {
        String::new()
    } else {
        format!(r#" poster="{}""#, attr_escape(&site_absolute(poster)))
    };
    format!(
        r#"<video controls{}{}><source src="{}" type="video/mp4">Your browser does not support the video tag.</video>"#,
        class_attr,
        poster_attr,
        attr_escape(&site_absolute(src))
    )
}

fn attr_escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('"', "&quot;")
}
