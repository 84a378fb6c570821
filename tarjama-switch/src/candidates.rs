//! Candidate paths for the translated equivalent of a page.

use regex::Regex;
use std::sync::OnceLock;
use tarjama_core::config::normalize_base_url;
use tarjama_core::Language;

/// Suffix translated posts conventionally carry (`hello` → `hello-ar`)
pub const TRANSLATED_SUFFIX: &str = "-ar";

static LANG_PATH_REGEX: OnceLock<Regex> = OnceLock::new();

fn lang_path_regex() -> &'static Regex {
    LANG_PATH_REGEX.get_or_init(|| Regex::new(r"^/(en|ar)(/.*)?$").unwrap())
}

/// Split a site path into its language and the remainder (`/` when empty).
///
/// ```
/// use tarjama_core::Language;
/// use tarjama_switch::split_language_path;
///
/// assert_eq!(
///     split_language_path("/en/hello/"),
///     Some((Language::En, "/hello/".to_string()))
/// );
/// assert_eq!(split_language_path("/about/"), None);
/// ```
pub fn split_language_path(path: &str) -> Option<(Language, String)> {
    let caps = lang_path_regex().captures(path)?;
    let language = caps.get(1)?.as_str().parse().ok()?;
    let rest = caps.get(2).map_or("/", |m| m.as_str());
    Some((language, rest.to_string()))
}

/// Language named by the first path segment, if any
pub fn path_language(path: &str) -> Option<Language> {
    split_language_path(path).map(|(language, _)| language)
}

/// Remove a deployment prefix (`/blog/en/x/` under `/blog/` → `/en/x/`).
///
/// Paths outside the prefix come back unchanged.
pub fn strip_base_url(path: &str, base_url: &str) -> String {
    let base = normalize_base_url(base_url);
    let prefix = base.trim_end_matches('/');
    if prefix.is_empty() {
        return path.to_string();
    }
    match path.strip_prefix(prefix) {
        Some("") => "/".to_string(),
        Some(rest) if rest.starts_with('/') => rest.to_string(),
        _ => path.to_string(),
    }
}

/// Put a deployment prefix back on a site path
pub fn join_base_url(path: &str, base_url: &str) -> String {
    format!(
        "{}{}",
        normalize_base_url(base_url),
        path.trim_start_matches('/')
    )
}

/// Ordered guesses for the page `current_path` in `target`.
///
/// Built fresh for every switch. Content and order depend only on the
/// current path and the target language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateList {
    probes: Vec<String>,
    fallback: String,
}

impl CandidateList {
    pub fn build(current_path: &str, target: Language) -> Self {
        let root = target.root_path();

        let Some((_, rest)) = split_language_path(current_path) else {
            return Self::root_only(root);
        };

        let slug = rest.trim_start_matches('/').trim_end_matches('/');
        if rest == "/" || slug.is_empty() {
            return Self::root_only(root);
        }

        let mut probes = vec![
            format!("{}{}/", root, slug),
            format!("{}{}{}/", root, slug, TRANSLATED_SUFFIX),
        ];
        if let Some(stripped) = slug.strip_suffix(TRANSLATED_SUFFIX) {
            probes.push(format!("{}{}/", root, stripped));
        }
        probes.push(format!("{}{}/index.html", root, slug));

        Self {
            probes,
            fallback: root,
        }
    }

    fn root_only(root: String) -> Self {
        Self {
            probes: Vec::new(),
            fallback: root,
        }
    }

    /// Candidates that must be probed, highest priority first
    pub fn probes(&self) -> &[String] {
        &self.probes
    }

    /// Language root, used without probing when nothing else exists
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Every candidate in priority order, the fallback last
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.probes
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.fallback.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all(list: &CandidateList) -> Vec<&str> {
        list.iter().collect()
    }

    #[test]
    fn test_split_language_path() {
        assert_eq!(
            split_language_path("/ar"),
            Some((Language::Ar, "/".to_string()))
        );
        assert_eq!(
            split_language_path("/en/"),
            Some((Language::En, "/".to_string()))
        );
        assert_eq!(split_language_path("/english/"), None);
        assert_eq!(split_language_path("/"), None);
        assert_eq!(path_language("/ar/x/"), Some(Language::Ar));
    }

    #[test]
    fn test_no_language_segment() {
        let list = CandidateList::build("/about/", Language::Ar);
        assert_eq!(all(&list), vec!["/ar/"]);
        assert!(list.probes().is_empty());
    }

    #[test]
    fn test_language_root() {
        assert_eq!(all(&CandidateList::build("/en/", Language::Ar)), vec!["/ar/"]);
        assert_eq!(all(&CandidateList::build("/en", Language::Ar)), vec!["/ar/"]);
    }

    #[test]
    fn test_slug_candidates_in_priority_order() {
        let list = CandidateList::build("/en/hello/", Language::Ar);
        assert_eq!(
            all(&list),
            vec![
                "/ar/hello/",
                "/ar/hello-ar/",
                "/ar/hello/index.html",
                "/ar/",
            ]
        );
        assert_eq!(list.fallback(), "/ar/");
        assert_eq!(list.iter().count(), 4);
    }

    #[test]
    fn test_suffix_stripped_candidate() {
        let list = CandidateList::build("/ar/hello-ar/", Language::En);
        assert_eq!(
            all(&list),
            vec![
                "/en/hello-ar/",
                "/en/hello-ar-ar/",
                "/en/hello/",
                "/en/hello-ar/index.html",
                "/en/",
            ]
        );
    }

    #[test]
    fn test_nested_paths_keep_segments() {
        let list = CandidateList::build("/en/posts/intro", Language::Ar);
        assert_eq!(list.probes()[0], "/ar/posts/intro/");
    }

    #[test]
    fn test_base_url_prefix() {
        assert_eq!(strip_base_url("/blog/en/hello/", "/blog/"), "/en/hello/");
        assert_eq!(strip_base_url("/blog", "blog"), "/");
        assert_eq!(strip_base_url("/blogroll/en/", "/blog/"), "/blogroll/en/");
        assert_eq!(strip_base_url("/en/hello/", "/"), "/en/hello/");
        assert_eq!(join_base_url("/ar/hello/", "/blog"), "/blog/ar/hello/");
        assert_eq!(join_base_url("/ar/", "/"), "/ar/");
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(
            CandidateList::build("/en/a-ar/", Language::Ar),
            CandidateList::build("/en/a-ar/", Language::Ar)
        );
    }
}
