//! Shared test utilities for the infopress test suite.
//!
//! Provides a throwaway project built from `fixtures/configs/` and small
//! record builders for renderer tests.
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let tmp = setup_project();
//! let layout = Layout::load(tmp.path()).unwrap();
//! let report = generate_all(&layout).unwrap();
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::record::{DownloadLink, Record, ScreenshotRef};

/// Full config exercising every section.
pub const PASTEBAR_INFO: &str = include_str!("../fixtures/configs/pastebar.info");

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/configs/` into `<tmp>/configs` and return the temp root.
///
/// Tests get an isolated project they can mutate freely.
pub fn setup_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/configs");
    let configs = tmp.path().join("configs");
    std::fs::create_dir_all(&configs).unwrap();
    for entry in std::fs::read_dir(&fixtures).unwrap() {
        let entry = entry.unwrap();
        std::fs::copy(entry.path(), configs.join(entry.file_name())).unwrap();
    }
    tmp
}

// =========================================================================
// Record builders
// =========================================================================

/// A record with defaults only: no description and no optional sections.
pub fn bare_record(title: &str) -> Record {
    Record {
        title: title.to_string(),
        name: title.to_string(),
        version: "1.0.0".to_string(),
        description: Vec::new(),
        features: None,
        screenshots: None,
        download_links: None,
        extra_notes: None,
    }
}

/// A URL-only screenshot.
pub fn shot(url: &str) -> ScreenshotRef {
    ScreenshotRef {
        url: url.to_string(),
        caption: None,
        attribution: None,
    }
}

pub fn link(url: &str, code: Option<&str>) -> DownloadLink {
    DownloadLink {
        url: url.to_string(),
        code: code.map(String::from),
    }
}
