//! Switch command implementation: find a page's translation on the live site.

use anyhow::{Context, Result};
use std::path::Path;
use std::time::Duration;
use tarjama_core::{Config, Language};
use tarjama_switch::{HttpProbe, LanguageResolver, PreferenceStore};

pub struct SwitchOptions {
    /// Path of the page being read, including any `base_url` prefix
    pub path: String,
    /// Explicit target language; otherwise the opposite of the current one
    pub to: Option<Language>,
    /// Origin to probe; otherwise taken from the config
    pub site: Option<String>,
}

/// Resolve the equivalent page and print its URL
pub async fn switch_language(config_path: &Path, opts: SwitchOptions) -> Result<()> {
    let config = Config::from_file(config_path).context("Failed to load configuration")?;

    let site = opts
        .site
        .or_else(|| config.switch_site_url())
        .context("No site URL to probe; pass --site or set switch.site_url")?;
    let timeout = Duration::from_millis(config.switch.timeout_ms);
    let probe = HttpProbe::new(&site, timeout).context("Failed to create HTTP probe")?;
    let resolver = LanguageResolver::new(probe).with_base_url(&config.normalized_base_url());
    let store = PreferenceStore::new(config.preferences_path());

    let resolution = match opts.to {
        Some(target) => {
            let resolution = resolver.resolve(&opts.path, target).await?;
            store
                .save(resolution.language)
                .context("Failed to save language preference")?;
            resolution
        }
        None => resolver.switch(&opts.path, &store).await?,
    };

    let url = resolver
        .probe()
        .candidate_url(&resolution.path)
        .context("Failed to build resolved URL")?;
    println!("{}", url);
    Ok(())
}
