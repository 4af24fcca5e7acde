//! Project-level orchestration: discovery, generation, listing, cleaning.
//!
//! A project is a directory laid out per [`Layout`]:
//!
//! ```text
//! project/
//! ├── infopress.toml           # Optional layout overrides
//! ├── configs/                 # Hand-written *.info files
//! │   ├── example.info         # Skipped by default
//! │   └── pastebar.info
//! ├── output/                  # PasteBar.html            (fragment)
//! ├── previews/                # PasteBar_preview.html    (standalone page)
//! └── contents/                # PasteBar_wordpress.txt   (payload)
//! ```
//!
//! Parsing never fails (see [`crate::parse::parse_file`]), so the only
//! per-file failures are filesystem writes. Batch generation records those
//! and moves on to the next file.

use crate::config::Layout;
use crate::naming::ArtifactNames;
use crate::parse::{self, parse_file};
use crate::preview::render_preview_document;
use crate::record::Record;
use crate::render::render_fragment;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Extension of config files.
pub const CONFIG_EXTENSION: &str = "info";

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config file not found: {0}")]
    MissingConfig(PathBuf),
    #[error("Configs directory not found: {0}")]
    MissingConfigsDir(PathBuf),
    #[error("Cannot scan {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Paths of the artifacts written for one record.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifacts {
    pub fragment: PathBuf,
    pub preview: PathBuf,
    pub payload: PathBuf,
}

impl Artifacts {
    fn in_layout(names: &ArtifactNames, layout: &Layout) -> Self {
        Self {
            fragment: layout.output_dir.join(&names.fragment),
            preview: layout.preview_dir.join(&names.preview),
            payload: layout.contents_dir.join(&names.payload),
        }
    }
}

/// Result of generating one config file.
#[derive(Debug, Clone)]
pub struct Generated {
    /// Config name (file stem).
    pub config_name: String,
    pub record: Record,
    pub fragment: String,
    pub artifacts: Artifacts,
}

/// A config file whose artifacts could not be written.
#[derive(Debug)]
pub struct Failure {
    pub config_name: String,
    pub error: PublishError,
}

/// Outcome of a batch run over every discovered config.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub generated: Vec<Generated>,
    pub failed: Vec<Failure>,
}

/// One row of `list` output.
#[derive(Debug, Clone)]
pub struct ListEntry {
    pub config_name: String,
    pub record: Record,
    pub artifacts: Artifacts,
    pub fragment_exists: bool,
    pub preview_exists: bool,
}

/// What `clean` did with one generated directory.
#[derive(Debug, Clone, PartialEq)]
pub enum CleanStatus {
    Cleaned { removed: usize },
    Missing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CleanedDir {
    pub path: PathBuf,
    pub status: CleanStatus,
}

/// Find the `.info` files directly inside the configs directory.
///
/// The extension match is case-sensitive so every discovered file can be
/// addressed again through [`Layout::config_path`]. Sorted by file name; names listed in `layout.skip` are excluded.
pub fn discover(layout: &Layout) -> Result<Vec<PathBuf>, PublishError> {
    if !layout.configs_dir.is_dir() {
        return Err(PublishError::MissingConfigsDir(layout.configs_dir.clone()));
    }
    let mut found = Vec::new();
    for entry in WalkDir::new(&layout.configs_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| PublishError::Walk {
            path: layout.configs_dir.clone(),
            source,
        })?;
        let path = entry.path();
        let is_info = path.extension().is_some_and(|e| e == CONFIG_EXTENSION);
        if !entry.file_type().is_file() || !is_info {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy();
        if layout.skip.iter().any(|s| s.as_str() == file_name) {
            debug!(file = %file_name, "skipping config");
            continue;
        }
        found.push(path.to_path_buf());
    }
    Ok(found)
}

/// Parse one config file and write its three artifacts.
///
/// The payload is written last: it exists only if the fragment and preview
/// were written.
pub fn generate(path: &Path, layout: &Layout) -> Result<Generated, PublishError> {
    let config_name = parse::source_id(path);
    let record = parse_file(path);
    let fragment = render_fragment(&record);
    let preview = render_preview_document(&record);
    let names = ArtifactNames::for_title(&record.title);
    if names.stem.is_empty() {
        warn!(
            config = %config_name,
            title = %record.title,
            "title has no filename-safe characters; artifacts get an empty name"
        );
    }
    let artifacts = Artifacts::in_layout(&names, layout);

    write_artifact(&artifacts.fragment, &fragment)?;
    write_artifact(&artifacts.preview, &preview)?;
    write_artifact(&artifacts.payload, &fragment)?;

    Ok(Generated {
        config_name,
        record,
        fragment,
        artifacts,
    })
}

/// Generate the config named `name` (`configs/<name>.info`).
pub fn generate_named(name: &str, layout: &Layout) -> Result<Generated, PublishError> {
    let path = layout.config_path(name);
    if !path.is_file() {
        return Err(PublishError::MissingConfig(path));
    }
    generate(&path, layout)
}

/// Generate every discovered config, continuing past failures.
///
/// Two configs whose titles sanitize to the same name write the same files;
/// the later one wins and a warning names both.
pub fn generate_all(layout: &Layout) -> Result<BuildReport, PublishError> {
    let mut report = BuildReport::default();
    let mut written: HashMap<PathBuf, String> = HashMap::new();
    for path in discover(layout)? {
        match generate(&path, layout) {
            Ok(generated) => {
                let fragment = generated.artifacts.fragment.clone();
                if let Some(previous) = written.insert(fragment, generated.config_name.clone()) {
                    warn!(
                        config = %generated.config_name,
                        overwrites = %previous,
                        "artifact names collide; earlier files were overwritten"
                    );
                }
                report.generated.push(generated);
            }
            Err(error) => {
                let config_name = parse::source_id(&path);
                warn!(config = %config_name, "generation failed: {error}");
                report.failed.push(Failure { config_name, error });
            }
        }
    }
    Ok(report)
}

/// Describe every discovered config and whether its artifacts exist.
pub fn list(layout: &Layout) -> Result<Vec<ListEntry>, PublishError> {
    let entries = discover(layout)?
        .into_iter()
        .map(|path| {
            let record = parse_file(&path);
            let artifacts = Artifacts::in_layout(&ArtifactNames::for_title(&record.title), layout);
            ListEntry {
                config_name: parse::source_id(&path),
                fragment_exists: artifacts.fragment.is_file(),
                preview_exists: artifacts.preview.is_file(),
                record,
                artifacts,
            }
        })
        .collect();
    Ok(entries)
}

/// Delete the regular files in every generated directory.
///
/// Subdirectories are left alone; a missing directory is reported, not an
/// error.
pub fn clean(layout: &Layout) -> Result<Vec<CleanedDir>, PublishError> {
    let mut cleaned = Vec::new();
    for dir in layout.generated_dirs() {
        let status = if dir.is_dir() {
            let mut removed = 0;
            for entry in fs::read_dir(dir)? {
                let path = entry?.path();
                if path.is_file() {
                    fs::remove_file(&path)?;
                    removed += 1;
                }
            }
            info!(dir = %dir.display(), removed, "cleaned");
            CleanStatus::Cleaned { removed }
        } else {
            CleanStatus::Missing
        };
        cleaned.push(CleanedDir {
            path: dir.to_path_buf(),
            status,
        });
    }
    Ok(cleaned)
}

fn write_artifact(path: &Path, content: &str) -> Result<(), PublishError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    info!(path = %path.display(), bytes = content.len(), "wrote artifact");
    Ok(())
}
