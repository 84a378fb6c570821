//! Build command implementation.

use anyhow::{Context, Result};
use askama::Template;
use chrono::Datelike;
use std::fs;
use std::path::Path;
use tarjama_core::{BuildContext, Config, GeneratedPage, Language, Page, SiteBuilder, SiteIndex};
use tarjama_render::{
    LanguageIndexTemplate, Layout, NotFoundTemplate, PostEntry, PostTemplate, RedirectTemplate,
};
use walkdir::WalkDir;

/// Build the static site from the config file at `config_path`
pub fn build_site(config_path: &Path) -> Result<()> {
    tracing::info!("Loading config from {:?}", config_path);
    let config = Config::from_file(config_path).context("Failed to load configuration")?;
    build_site_with_config(&config).map(|_| ())
}

/// Build the site from an already loaded config, writing output and returning the index.
pub fn build_site_with_config(config: &Config) -> Result<SiteIndex> {
    let base_url = config.normalized_base_url();

    tracing::info!("Building site: {}", config.site.title);

    // One context per build run; every output path is claimed before writing
    let ctx = BuildContext::new();
    let builder = SiteBuilder::new(config.clone());
    let site_index = builder.build(&ctx).context("Failed to build site")?;

    let output_dir = config.output_dir();
    fs::create_dir_all(&output_dir).context("Failed to create output directory")?;

    for page in &site_index.pages {
        render_page(config, page, &base_url)?;
    }

    for generated in &site_index.generated {
        render_generated(config, generated, &site_index, &base_url)?;
    }

    copy_assets(config)?;

    tracing::info!(
        "✓ Built {} pages",
        site_index.pages.len() + site_index.generated.len()
    );
    tracing::info!("✓ Output written to {:?}", output_dir);

    Ok(site_index)
}

fn layout(config: &Config, language: Language, base_url: &str) -> Layout {
    Layout {
        site_title: config.site.title.clone(),
        site_author: config.site.author.clone(),
        year: chrono::Utc::now().year(),
        base_url: base_url.to_string(),
        language,
    }
}

/// Render a single authored page
fn render_page(config: &Config, page: &Page, base_url: &str) -> Result<()> {
    let template = PostTemplate {
        layout: layout(config, page.language, base_url),
        title: page.title.clone(),
        description: page
            .description
            .clone()
            .unwrap_or_else(|| page.title.clone()),
        date: page.date.as_ref().map(|d| d.format("%Y-%m-%d").to_string()),
        tags: page.tags.clone(),
        reading_time: page.reading_time,
        word_count: page.word_count,
        content: page.content_html.clone(),
        toc_html: page.toc_html.clone(),
    };

    let html = template
        .render()
        .context("Failed to render post template")?;
    write_output(config, &page.output_path, html)?;

    tracing::debug!("Rendered: {} -> {}", page.source_path, page.output_path);

    Ok(())
}

/// Render a page the build generates on its own
fn render_generated(
    config: &Config,
    generated: &GeneratedPage,
    site_index: &SiteIndex,
    base_url: &str,
) -> Result<()> {
    let html = match *generated {
        GeneratedPage::LanguageIndex(language) => LanguageIndexTemplate {
            layout: layout(config, language, base_url),
            site_description: config.site.description.clone(),
            posts: site_index
                .collection(language)
                .into_iter()
                .map(|p| PostEntry::from_page(p, base_url))
                .collect(),
        }
        .render()
        .context("Failed to render language index template")?,
        GeneratedPage::RootRedirect(language) => RedirectTemplate {
            target: format!("{}{}/", base_url, language.code()),
        }
        .render()
        .context("Failed to render redirect template")?,
        GeneratedPage::NotFound => NotFoundTemplate {
            layout: layout(config, config.default_language, base_url),
        }
        .render()
        .context("Failed to render 404 template")?,
    };

    write_output(config, &generated.output_path(), html)?;
    tracing::info!("Rendered {}", generated.output_path());
    Ok(())
}

fn write_output(config: &Config, rel_path: &str, html: String) -> Result<()> {
    let output_path = config.output_dir().join(rel_path);
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {:?}", parent))?;
    }
    fs::write(&output_path, html).with_context(|| format!("Failed to write {:?}", output_path))
}

/// Copy `<source>/assets` verbatim to `<output>/assets`
fn copy_assets(config: &Config) -> Result<()> {
    let assets_dir = config.source_dir().join("assets");
    if !assets_dir.exists() {
        tracing::debug!("No assets directory at {:?}", assets_dir);
        return Ok(());
    }

    copy_dir(&assets_dir, &config.output_dir().join("assets"))?;
    tracing::info!("Copied assets from {:?}", assets_dir);
    Ok(())
}

fn copy_dir(src: &Path, dest: &Path) -> Result<()> {
    for entry in WalkDir::new(src)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let relative = entry.path().strip_prefix(src).unwrap_or(entry.path());
        let target = dest.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(entry.path(), &target)
            .with_context(|| format!("Failed to copy {:?} to {:?}", entry.path(), target))?;
    }
    Ok(())
}
