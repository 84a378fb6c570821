//! YAML front matter at the top of a markdown source.
//!
//! A block opens with a `---` line on the first line of the file (a UTF-8
//! BOM is tolerated) and closes with the next `---` or `...` line. Every key
//! is optional. A file without a closed block is all body.

use crate::models::Frontmatter;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontmatterError {
    #[error("Invalid YAML front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Separate the front matter block from the markdown body.
///
/// ```
/// use tarjama_core::frontmatter::parse_frontmatter;
///
/// let content = "---\ntitle: My Post\ndate: 2025-01-01\nlang: ar\n---\n## Hello World\n";
///
/// let (fm, body) = parse_frontmatter(content).unwrap();
/// assert_eq!(fm.title, "My Post");
/// assert_eq!(fm.date.as_deref(), Some("2025-01-01"));
/// assert_eq!(fm.lang.as_deref(), Some("ar"));
/// assert_eq!(body, "## Hello World\n");
/// ```
pub fn parse_frontmatter(content: &str) -> Result<(Frontmatter, String), FrontmatterError> {
    let Some((yaml, body)) = split_block(content) else {
        return Ok((Frontmatter::default(), content.to_string()));
    };

    let frontmatter = if yaml.trim().is_empty() {
        Frontmatter::default()
    } else {
        serde_yaml::from_str(yaml)?
    };
    Ok((frontmatter, body.to_string()))
}

/// `(yaml, body)` when `content` starts with a closed front matter block
fn split_block(content: &str) -> Option<(&str, &str)> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.split_inclusive('\n');

    let opening = lines.next()?;
    if opening.trim_end() != "---" {
        return None;
    }

    let yaml_start = opening.len();
    let mut offset = yaml_start;
    for line in lines {
        if matches!(line.trim_end(), "---" | "...") {
            return Some((&content[yaml_start..offset], &content[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}
