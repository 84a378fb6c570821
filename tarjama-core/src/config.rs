//! Configuration parsing and management.

use crate::models::Language;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Main configuration struct matching the tarjama.yml schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub site: SiteConfig,

    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Language for pages outside `en/` and `ar/` without a `lang` field
    #[serde(default)]
    pub default_language: Language,

    #[serde(default = "default_words_per_minute")]
    pub words_per_minute: usize,

    /// Generate `/<lang>/index.html` listing pages of each language
    #[serde(default = "default_true")]
    pub generate_language_index: bool,

    /// Regexes matched against source paths relative to the source directory
    #[serde(default)]
    pub ignore_patterns: Vec<String>,

    #[serde(default)]
    pub switch: SwitchConfig,

    // Internal: path to config file (for relative path resolution)
    #[serde(skip)]
    config_path: Option<PathBuf>,
}

fn default_base_url() -> String {
    String::from("/")
}

fn default_true() -> bool {
    true
}

fn default_words_per_minute() -> usize {
    crate::filters::DEFAULT_WORDS_PER_MINUTE
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub title: String,

    #[serde(default)]
    pub author: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_source")]
    pub source: PathBuf,

    #[serde(default = "default_output")]
    pub output: PathBuf,
}

fn default_source() -> PathBuf {
    PathBuf::from("src")
}

fn default_output() -> PathBuf {
    PathBuf::from("docs")
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            output: default_output(),
        }
    }
}

/// Settings for resolving a page's translation on the deployed site
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwitchConfig {
    /// Origin probed for candidate pages; falls back to `site.url`
    #[serde(default)]
    pub site_url: Option<String>,

    /// Per-probe timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// JSON file holding the last chosen language
    #[serde(default = "default_preferences")]
    pub preferences: PathBuf,
}

fn default_timeout_ms() -> u64 {
    5000
}

fn default_preferences() -> PathBuf {
    PathBuf::from(".tarjama/prefs.json")
}

impl Default for SwitchConfig {
    fn default() -> Self {
        Self {
            site_url: None,
            timeout_ms: default_timeout_ms(),
            preferences: default_preferences(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::from_yaml(&contents)?;

        // Store config file path for relative path resolution
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Parse configuration from YAML text; relative paths stay relative
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(contents)?;
        if config.site.title.trim().is_empty() {
            return Err(ConfigError::MissingField("site.title".to_string()));
        }
        Ok(config)
    }

    /// Get the source directory, resolved relative to config file
    pub fn source_dir(&self) -> PathBuf {
        self.resolve_path(&self.paths.source)
    }

    /// Get the output directory, resolved relative to config file
    pub fn output_dir(&self) -> PathBuf {
        self.resolve_path(&self.paths.output)
    }

    /// Get the language preference file, resolved relative to config file
    pub fn preferences_path(&self) -> PathBuf {
        self.resolve_path(&self.switch.preferences)
    }

    /// Origin that language switches probe against
    pub fn switch_site_url(&self) -> Option<String> {
        self.switch
            .site_url
            .clone()
            .or_else(|| Some(self.site.url.clone()))
            .filter(|url| !url.trim().is_empty())
    }

    /// Resolve a path relative to the config file location
    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else if let Some(config_path) = &self.config_path {
            if let Some(parent) = config_path.parent() {
                parent.join(path)
            } else {
                path.to_path_buf()
            }
        } else {
            path.to_path_buf()
        }
    }

    /// Normalized base URL with leading and trailing slash ("/foo/" or "/")
    pub fn normalized_base_url(&self) -> String {
        normalize_base_url(&self.base_url)
    }
}

/// Ensure base URLs have a leading and trailing slash
pub fn normalize_base_url(raw: &str) -> String {
    if raw.is_empty() {
        return "/".to_string();
    }

    let mut s = raw.trim().to_string();
    if !s.starts_with('/') {
        s.insert(0, '/');
    }
    if !s.ends_with('/') {
        s.push('/');
    }

    // Collapse duplicate slashes (but keep leading)
    while s.contains("//") {
        s = s.replace("//", "/");
    }

    s
}
