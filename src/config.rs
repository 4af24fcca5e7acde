//! Project configuration.
//!
//! An optional `infopress.toml` in the project root overrides the stock
//! directory layout. Files are sparse: set only the keys you want to change.
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! configs_dir = "configs"     # Where *.info files live
//! output_dir = "output"       # Content fragments (*.html)
//! preview_dir = "previews"    # Standalone previews (*_preview.html)
//! contents_dir = "contents"   # Publishing payloads (*_wordpress.txt)
//! skip = ["example.info"]     # Config files never generated
//! ```
//!
//! Loading deserializes the file over the stock defaults (rejecting unknown
//! keys) and validates the result.
//! Directory names are resolved against the project root by [`Layout`].

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the project config file.
pub const CONFIG_FILE: &str = "infopress.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Project configuration loaded from `infopress.toml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Directory holding the `.info` config files.
    pub configs_dir: String,
    /// Directory for content fragments.
    pub output_dir: String,
    /// Directory for preview documents.
    pub preview_dir: String,
    /// Directory for plain-text publishing payloads.
    pub contents_dir: String,
    /// Config file names (with extension) excluded from discovery.
    pub skip: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            configs_dir: "configs".to_string(),
            output_dir: "output".to_string(),
            preview_dir: "previews".to_string(),
            contents_dir: "contents".to_string(),
            skip: vec!["example.info".to_string()],
        }
    }
}

impl SiteConfig {
    /// Validate directory names: non-empty and pairwise distinct.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let dirs = [
            ("configs_dir", &self.configs_dir),
            ("output_dir", &self.output_dir),
            ("preview_dir", &self.preview_dir),
            ("contents_dir", &self.contents_dir),
        ];
        for (key, value) in &dirs {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }
        for (i, (key_a, a)) in dirs.iter().enumerate() {
            for (key_b, b) in &dirs[i + 1..] {
                if a == b {
                    return Err(ConfigError::Validation(format!(
                        "{key_a} and {key_b} must differ (both \"{a}\")"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Directories of one project, resolved against its root.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub root: PathBuf,
    pub configs_dir: PathBuf,
    pub output_dir: PathBuf,
    pub preview_dir: PathBuf,
    pub contents_dir: PathBuf,
    pub skip: Vec<String>,
}

impl Layout {
    pub fn new(root: &Path, config: &SiteConfig) -> Self {
        Self {
            root: root.to_path_buf(),
            configs_dir: root.join(&config.configs_dir),
            output_dir: root.join(&config.output_dir),
            preview_dir: root.join(&config.preview_dir),
            contents_dir: root.join(&config.contents_dir),
            skip: config.skip.clone(),
        }
    }

    /// Load `infopress.toml` from `root` and resolve the layout.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let config = load_config(root)?;
        Ok(Self::new(root, &config))
    }

    /// Path of the config file for a config name (stem without `.info`).
    pub fn config_path(&self, name: &str) -> PathBuf {
        self.configs_dir.join(format!("{name}.info"))
    }

    /// Directories that hold generated artifacts.
    pub fn generated_dirs(&self) -> [&Path; 3] {
        [
            self.output_dir.as_path(),
            self.preview_dir.as_path(),
            self.contents_dir.as_path(),
        ]
    }

    /// `path` relative to the project root, for display.
    pub fn relative<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }
}

/// Load the project config from `root`, falling back to stock defaults.
///
/// The file is sparse: keys it leaves out keep their default values.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let config_path = root.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(SiteConfig::default());
    }
    let content = fs::read_to_string(&config_path)?;
    let config: SiteConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// A fully-commented stock `infopress.toml`, printed by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# infopress configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Paths are relative to the directory
# holding this file. Unknown keys cause an error.

# Directory holding the hand-written *.info files.
configs_dir = "configs"

# Content-only HTML fragments, one per config: <title>.html
output_dir = "output"

# Standalone preview pages: <title>_preview.html
preview_dir = "previews"

# Plain-text payloads for the WordPress text editor: <title>_wordpress.txt
contents_dir = "contents"

# Config file names that are never generated (templates, drafts).
skip = ["example.info"]
"##
}
