//! `.info` config file parsing.
//!
//! Config files are hand-authored, line-oriented and section-delimited:
//!
//! ```text
//! # comments and blank lines are ignored
//! [软件信息]
//! 标题 = PasteBar
//! 名称 = PasteBar 剪贴板管理器
//! 版本 = 0.6.2
//! 描述 = 第一段||第二段
//!
//! [功能介绍]
//! 1 = 无限剪贴板历史
//! 支持文本与图片
//!
//! [软件截图]
//! 1 = 主界面|官方|https://example.com/main.png
//! 2 = https://example.com/settings.png
//!
//! [下载链接]
//! https://pan.example.com/s/abc x7k2 百度网盘
//!
//! [额外信息]
//! 任意文本，逐行保留
//! ```
//!
//! The section and key labels are fixed and matched byte-for-byte; existing
//! config files are written against them. Unknown sections are accepted and
//! their lines ignored.
//!
//! Parsing text never fails. Reading a file can, and [`parse_file`] turns
//! that into a logged warning plus [`Record::fallback`].

use crate::record::{DEFAULT_VERSION, DownloadLink, Record, ScreenshotRef};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Section kinds of the `.info` format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    SoftwareInfo,
    FeatureList,
    ScreenshotList,
    DownloadLinks,
    ExtraInfo,
    /// Any other header, and the region before the first header.
    Unknown(String),
}

impl Section {
    /// Map a header label (the text between the brackets) to a section.
    pub fn from_label(label: &str) -> Self {
        match label {
            "软件信息" => Self::SoftwareInfo,
            "功能介绍" => Self::FeatureList,
            "软件截图" => Self::ScreenshotList,
            "下载链接" => Self::DownloadLinks,
            "额外信息" => Self::ExtraInfo,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// The header label this section is written with.
    pub fn label(&self) -> &str {
        match self {
            Self::SoftwareInfo => "软件信息",
            Self::FeatureList => "功能介绍",
            Self::ScreenshotList => "软件截图",
            Self::DownloadLinks => "下载链接",
            Self::ExtraInfo => "额外信息",
            Self::Unknown(label) => label,
        }
    }
}

/// Fields collected during the scan, before defaults are applied.
#[derive(Debug, Default)]
struct Collected {
    title: Option<String>,
    name: Option<String>,
    version: Option<String>,
    description: Option<Vec<String>>,
    features: Vec<String>,
    screenshots: Vec<ScreenshotRef>,
    download_links: Vec<DownloadLink>,
    extra_notes: Option<Vec<String>>,
}

impl Collected {
    fn software_info(&mut self, line: &str) {
        let Some((key, value)) = line.split_once('=') else {
            return;
        };
        let value = value.trim();
        match key.trim() {
            "标题" => self.title = Some(value.to_string()),
            "名称" => self.name = Some(value.to_string()),
            "版本" => self.version = Some(value.to_string()),
            "描述" => self.description = Some(split_paragraphs(value)),
            _ => {}
        }
    }

    fn feature(&mut self, line: &str) {
        self.features.push(strip_key(line).to_string());
    }

    fn screenshot(&mut self, line: &str) {
        self.screenshots
            .push(ScreenshotRef::from_value(strip_key(line)));
    }

    fn download(&mut self, line: &str) {
        if let Some(link) = DownloadLink::from_line(line) {
            self.download_links.push(link);
        }
    }

    fn extra(&mut self, line: &str) {
        self.extra_notes
            .get_or_insert_with(Vec::new)
            .push(line.to_string());
    }

    /// Apply post-scan defaults and build the record.
    fn finish(self, source_id: &str) -> Record {
        let name = self.name.filter(|s| !s.is_empty());
        let title = self
            .title
            .filter(|s| !s.is_empty())
            .or_else(|| name.clone())
            .unwrap_or_else(|| source_id.to_string());
        let name = name.unwrap_or_else(|| title.clone());
        let version = self
            .version
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_VERSION.to_string());

        Record {
            title,
            name,
            version,
            description: self.description.unwrap_or_default(),
            features: non_empty(self.features),
            screenshots: non_empty(self.screenshots),
            download_links: non_empty(self.download_links),
            extra_notes: self.extra_notes,
        }
    }
}

/// Drop an optional `key =` prefix: only the text after the first `=` is kept.
///
/// `"3 = Export to CSV"` and `"Export to CSV"` both yield `"Export to CSV"`.
pub fn strip_key(line: &str) -> &str {
    match line.split_once('=') {
        Some((_, value)) => value.trim(),
        None => line.trim(),
    }
}

/// Split a description on `||` into trimmed paragraphs.
///
/// A value without the delimiter is a single paragraph (possibly empty).
pub fn split_paragraphs(value: &str) -> Vec<String> {
    if value.contains("||") {
        value.split("||").map(|p| p.trim().to_string()).collect()
    } else {
        vec![value.to_string()]
    }
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    (!items.is_empty()).then_some(items)
}

/// If `line` is a `[Label]` header, return the trimmed label.
fn section_header(line: &str) -> Option<&str> {
    line.strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .map(str::trim)
}

/// Parse `.info` text into a [`Record`].
///
/// `source_id` stands in for the title when neither a title nor a name is
/// given; callers pass the config file stem.
pub fn parse(source: &str, source_id: &str) -> Record {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let mut section = Section::Unknown(String::new());
    let mut collected = Collected::default();

    for raw in source.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(label) = section_header(line) {
            section = Section::from_label(label);
            if matches!(section, Section::Unknown(_)) {
                debug!(source = source_id, section = section.label(), "ignoring unknown section");
            } else {
                debug!(source = source_id, section = section.label(), "entering section");
            }
            continue;
        }

        match &section {
            Section::SoftwareInfo => collected.software_info(line),
            Section::FeatureList => collected.feature(line),
            Section::ScreenshotList => collected.screenshot(line),
            Section::DownloadLinks => collected.download(line),
            Section::ExtraInfo => collected.extra(line),
            Section::Unknown(_) => {}
        }
    }

    let record = collected.finish(source_id);
    debug!(
        source = source_id,
        title = %record.title,
        features = record.features.as_ref().map_or(0, Vec::len),
        screenshots = record.screenshots.as_ref().map_or(0, Vec::len),
        downloads = record.download_links.as_ref().map_or(0, Vec::len),
        "parsed config"
    );
    record
}

/// The identifier used for a config path: its file stem.
pub fn source_id(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Read and parse a config file, surfacing read errors.
pub fn try_parse_file(path: &Path) -> Result<Record, ParseError> {
    let content = fs::read_to_string(path).map_err(|source| ParseError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse(&content, &source_id(path)))
}

/// Read and parse a config file, never failing.
///
/// On a read error (missing file, invalid UTF-8) the error is logged and
/// [`Record::fallback`] is returned with the file stem as title.
pub fn parse_file(path: &Path) -> Record {
    try_parse_file(path).unwrap_or_else(|e| {
        warn!("{e}; using fallback record");
        Record::fallback(&source_id(path))
    })
}
