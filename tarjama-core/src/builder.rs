//! Site building logic - discovers sources, renders pages, and claims output paths.

use crate::{
    config::Config,
    filters::{reading_time, word_count},
    frontmatter::parse_frontmatter,
    guard::{BuildContext, DuplicatePath},
    markdown::MarkdownProcessor,
    models::*,
};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Top-level source directories that never contain pages
const NON_PAGE_DIRS: &[&str] = &["assets", "_includes", "_data"];

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Frontmatter error: {0}")]
    Frontmatter(#[from] crate::frontmatter::FrontmatterError),

    #[error(transparent)]
    DuplicatePath(#[from] DuplicatePath),

    #[error(transparent)]
    Permalink(#[from] UnsafePermalink),
}

/// Main site builder
pub struct SiteBuilder {
    config: Config,
    processor: MarkdownProcessor,
}

impl SiteBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            processor: MarkdownProcessor::new(),
        }
    }

    /// Build the entire site index.
    ///
    /// Every output path, including generated pages, is claimed in `ctx`
    /// before this returns; a collision aborts the build.
    pub fn build(&self, ctx: &BuildContext) -> Result<SiteIndex, BuildError> {
        let source_files = self.discover_source_files()?;

        tracing::info!("Found {} markdown files", source_files.len());

        let mut pages = Vec::new();
        for file_path in &source_files {
            match self.load_page(file_path) {
                Ok(Some(page)) => {
                    if let Err(err) = ctx.register_output(&page.output_path) {
                        tracing::error!("{} (from {})", err, page.source_path);
                        return Err(err.into());
                    }
                    pages.push(page);
                }
                Ok(None) => {
                    tracing::debug!("Skipping draft: {:?}", file_path);
                }
                Err(BuildError::Frontmatter(e)) => {
                    tracing::error!("Failed to parse {:?}: {}", file_path, e);
                    // Continue with other files
                }
                Err(e) => {
                    tracing::error!("Failed to load {:?}: {}", file_path, e);
                    return Err(e);
                }
            }
        }

        let generated = self.generated_pages(&pages);
        for page in &generated {
            ctx.register_output(&page.output_path())?;
        }

        tracing::info!(
            "Built site index with {} pages ({} generated)",
            pages.len(),
            generated.len()
        );

        Ok(SiteIndex { pages, generated })
    }

    /// Pages the build emits besides the authored ones
    fn generated_pages(&self, pages: &[Page]) -> Vec<GeneratedPage> {
        let mut generated = Vec::new();
        if self.config.generate_language_index {
            generated.extend(Language::ALL.iter().map(|&l| GeneratedPage::LanguageIndex(l)));
        }
        if !pages.iter().any(|p| p.output_path == "index.html") {
            generated.push(GeneratedPage::RootRedirect(self.config.default_language));
        }
        generated.push(GeneratedPage::NotFound);
        generated
    }

    /// Discover all markdown files under the source directory
    fn discover_source_files(&self) -> Result<Vec<PathBuf>, BuildError> {
        let source_dir = self.config.source_dir();
        let mut files = Vec::new();
        let ignore_patterns = compile_ignore_patterns(&self.config.ignore_patterns);

        if !source_dir.exists() {
            tracing::warn!("Source directory {:?} does not exist", source_dir);
            return Ok(files);
        }

        let walker = WalkDir::new(&source_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                !(e.depth() == 1
                    && e.file_type().is_dir()
                    && NON_PAGE_DIRS.iter().any(|d| e.file_name() == *d))
            });

        for entry in walker.filter_map(|e| e.ok()) {
            if !entry.file_type().is_file() {
                continue;
            }
            if entry.path().extension().is_some_and(|ext| ext == "md") {
                let rel = relative_source_path(&source_dir, entry.path());
                if should_ignore(&rel, &ignore_patterns) {
                    tracing::debug!("Ignoring {} due to ignore_patterns", rel);
                    continue;
                }
                files.push(entry.path().to_path_buf());
            }
        }

        Ok(files)
    }

    /// Parse and render a single markdown file; `None` for drafts
    fn load_page(&self, path: &Path) -> Result<Option<Page>, BuildError> {
        let content = fs::read_to_string(path)?;
        let (frontmatter, body) = parse_frontmatter(&content)?;

        if frontmatter.draft {
            return Ok(None);
        }

        let source_path = relative_source_path(&self.config.source_dir(), path);

        let title = match frontmatter.title.trim() {
            "" => path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("Untitled")
                .to_string(),
            title => title.to_string(),
        };

        let language = self.page_language(&frontmatter, &source_path);

        let output_path = match &frontmatter.permalink {
            Some(permalink) => normalize_permalink(permalink)?,
            None => default_output_path(&source_path),
        };

        let date = frontmatter
            .date
            .as_ref()
            .and_then(|d| chrono::NaiveDate::parse_from_str(d, "%Y-%m-%d").ok());

        let rendered = self.processor.render(&body);
        let words = word_count(&rendered.html);

        Ok(Some(Page {
            title,
            language,
            description: frontmatter.description.clone(),
            date,
            tags: frontmatter.tags.clone(),
            source_path,
            output_path,
            reading_time: reading_time(&rendered.html, self.config.words_per_minute),
            word_count: words,
            content_html: rendered.html,
            toc_html: rendered.toc_html,
            headings: rendered.headings,
        }))
    }

    /// Front matter `lang`, then the first path segment, then the default
    fn page_language(&self, frontmatter: &Frontmatter, source_path: &str) -> Language {
        if let Some(code) = &frontmatter.lang {
            match code.parse() {
                Ok(lang) => return lang,
                Err(e) => tracing::warn!("{} in {}", e, source_path),
            }
        }

        source_path
            .split('/')
            .next()
            .filter(|_| source_path.contains('/'))
            .and_then(|segment| segment.parse().ok())
            .unwrap_or(self.config.default_language)
    }
}

fn relative_source_path(source_dir: &Path, path: &Path) -> String {
    path.strip_prefix(source_dir)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// `en/hello.md` → `en/hello/index.html`, `en/index.md` → `en/index.html`
fn default_output_path(source_path: &str) -> String {
    let without_ext = source_path.strip_suffix(".md").unwrap_or(source_path);
    let (dir, stem) = match without_ext.rsplit_once('/') {
        Some((dir, stem)) => (format!("{}/", dir), stem),
        None => (String::new(), without_ext),
    };

    if stem == "index" {
        format!("{}index.html", dir)
    } else {
        format!("{}{}/index.html", dir, stem)
    }
}

fn compile_ignore_patterns(patterns: &[String]) -> Vec<Regex> {
    let mut compiled = Vec::new();
    for pat in patterns {
        match Regex::new(pat) {
            Ok(re) => compiled.push(re),
            Err(err) => tracing::warn!("Invalid ignore pattern '{}': {}", pat, err),
        }
    }
    compiled
}

fn should_ignore(path: &str, ignores: &[Regex]) -> bool {
    ignores.iter().any(|re| re.is_match(path))
}
