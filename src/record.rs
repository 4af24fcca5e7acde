//! The software record produced by the parser and consumed by the renderers.
//!
//! A [`Record`] is a closed, fully-defaulted description of one software
//! entry. Optional sections are `Option<Vec<_>>`: `None` means the source
//! file contributed nothing for that section, which is the signal the
//! renderer uses to omit it.
//!
//! Description and extra notes are always sequences. A plain description
//! string is a one-element sequence; `A||B` in the source becomes two.

use serde::Serialize;

/// Version assigned when the source file does not name one.
pub const DEFAULT_VERSION: &str = "1.0.0";

/// Name used by the fallback record when a config file cannot be read.
pub const FALLBACK_NAME: &str = "未知软件";

/// Description used by the fallback record when a config file cannot be read.
pub const FALLBACK_DESCRIPTION: &str = "解析配置文件出错";

/// One software entry, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    /// Display title; also the basis for generated filenames.
    pub title: String,
    pub name: String,
    pub version: String,
    /// Introduction paragraphs. Empty when the source had no description.
    pub description: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshots: Option<Vec<ScreenshotRef>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_links: Option<Vec<DownloadLink>>,
    /// Free-form lines from the extra-info section, verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_notes: Option<Vec<String>>,
}

impl Record {
    /// Minimal record returned when a config file cannot be parsed.
    ///
    /// Rendering it yields a valid, if degraded, output set so a batch run
    /// never halts on one bad file.
    pub fn fallback(source_id: &str) -> Self {
        Self {
            title: source_id.to_string(),
            name: FALLBACK_NAME.to_string(),
            version: DEFAULT_VERSION.to_string(),
            description: vec![FALLBACK_DESCRIPTION.to_string()],
            features: None,
            screenshots: None,
            download_links: None,
            extra_notes: None,
        }
    }

    /// True when the description has at least one non-blank paragraph.
    pub fn has_description(&self) -> bool {
        self.description.iter().any(|p| !p.trim().is_empty())
    }

    /// Extra notes that survive blank-line filtering, in source order.
    pub fn visible_notes(&self) -> impl Iterator<Item = &str> {
        self.extra_notes
            .iter()
            .flatten()
            .map(String::as_str)
            .filter(|n| !n.trim().is_empty())
    }
}

/// A screenshot entry: `caption|attribution|url`, `caption|url` or `url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScreenshotRef {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribution: Option<String>,
}

impl ScreenshotRef {
    /// Build from a `|`-delimited value.
    ///
    /// - `"Cap|Attr|http://x/y.png"` → caption, attribution, url
    /// - `"Cap|http://x/y.png"` → caption, url
    /// - `"http://x/y.png"` → url only
    ///
    /// Parts beyond the third are ignored. Blank caption or attribution
    /// parts count as absent.
    pub fn from_value(value: &str) -> Self {
        let parts: Vec<&str> = value.split('|').map(str::trim).collect();
        match parts.as_slice() {
            [caption, attribution, url, ..] => Self {
                url: url.to_string(),
                caption: non_empty(caption),
                attribution: non_empty(attribution),
            },
            [caption, url] => Self {
                url: url.to_string(),
                caption: non_empty(caption),
                attribution: None,
            },
            _ => Self {
                url: value.trim().to_string(),
                caption: None,
                attribution: None,
            },
        }
    }

    /// Caption to display, defaulting to `软件截图 N` for the 0-based `index`.
    pub fn caption_or_default(&self, index: usize) -> String {
        match &self.caption {
            Some(c) => c.clone(),
            None => format!("软件截图 {}", index + 1),
        }
    }
}

/// A download link with an optional extraction code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadLink {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl DownloadLink {
    /// Parse `URL [CODE] [trailing comment...]`.
    ///
    /// Returns `None` for a blank line.
    pub fn from_line(line: &str) -> Option<Self> {
        let mut tokens = line.split_whitespace();
        let url = tokens.next()?;
        Some(Self {
            url: url.to_string(),
            code: tokens.next().map(String::from),
        })
    }

    /// The extraction code, if it is present and non-blank.
    pub fn visible_code(&self) -> Option<&str> {
        self.code.as_deref().filter(|c| !c.trim().is_empty())
    }
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screenshot_three_parts() {
        let s = ScreenshotRef::from_value("Cap|Attr|http://x/y.png");
        assert_eq!(s.caption.as_deref(), Some("Cap"));
        assert_eq!(s.attribution.as_deref(), Some("Attr"));
        assert_eq!(s.url, "http://x/y.png");
    }

    #[test]
    fn screenshot_two_parts() {
        let s = ScreenshotRef::from_value("Main window | http://x/a.png");
        assert_eq!(s.caption.as_deref(), Some("Main window"));
        assert_eq!(s.attribution, None);
        assert_eq!(s.url, "http://x/a.png");
    }

    #[test]
    fn screenshot_url_only() {
        let s = ScreenshotRef::from_value(" http://x/a.png ");
        assert_eq!(s.caption, None);
        assert_eq!(s.url, "http://x/a.png");
    }

    #[test]
    fn screenshot_extra_parts_ignored() {
        let s = ScreenshotRef::from_value("C|A|http://x/a.png|junk");
        assert_eq!(s.url, "http://x/a.png");
        assert_eq!(s.attribution.as_deref(), Some("A"));
    }

    #[test]
    fn screenshot_blank_caption_is_absent() {
        let s = ScreenshotRef::from_value("|http://x/a.png");
        assert_eq!(s.caption, None);
        assert_eq!(s.caption_or_default(2), "软件截图 3");
    }

    #[test]
    fn download_url_only() {
        let d = DownloadLink::from_line("https://pan.example/s/abc").unwrap();
        assert_eq!(d.url, "https://pan.example/s/abc");
        assert_eq!(d.code, None);
    }

    #[test]
    fn download_with_code_and_comment() {
        let d = DownloadLink::from_line("https://pan.example/s/abc  x7k2  # baidu").unwrap();
        assert_eq!(d.url, "https://pan.example/s/abc");
        assert_eq!(d.code.as_deref(), Some("x7k2"));
    }

    #[test]
    fn download_blank_line() {
        assert!(DownloadLink::from_line("   ").is_none());
    }

    #[test]
    fn fallback_record_shape() {
        let r = Record::fallback("broken");
        assert_eq!(r.title, "broken");
        assert_eq!(r.name, FALLBACK_NAME);
        assert_eq!(r.version, DEFAULT_VERSION);
        assert_eq!(r.description, vec![FALLBACK_DESCRIPTION.to_string()]);
        assert!(r.features.is_none());
    }

    #[test]
    fn visible_notes_skip_blank_entries() {
        let mut r = Record::fallback("x");
        r.extra_notes = Some(vec!["one".into(), "  ".into(), "two".into()]);
        assert_eq!(r.visible_notes().collect::<Vec<_>>(), vec!["one", "two"]);
    }
}
