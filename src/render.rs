//! Publishing fragment rendering.
//!
//! Turns a [`Record`] into the content-only HTML pasted into the WordPress
//! text editor. The fragment has no wrapping container and no document
//! scaffolding: only `h3`, `p`, `ol`/`li` and the theme's short-codes.
//!
//! ## Sections
//!
//! Always in this order, each guarded by its own presence check:
//!
//! 1. **软件介绍**: heading always emitted; one `<p>` per description
//!    paragraph when the description is not blank
//! 2. **功能（使用）说明**: `<ol>` of features
//! 3. **软件截图**: one `[insertimg]` block per screenshot
//! 4. **软件下载**: one `[downloads]` group of `[link]` short-codes, four
//!    per line
//! 5. **其他信息**: one `<p>` per non-blank extra note; the section is
//!    dropped entirely when every note is blank
//!
//! Output is built by string concatenation rather than `maud`: the exact
//! line breaks are part of the contract, and the short-codes and user text
//! are emitted verbatim for the publishing system to interpret.

use crate::record::{DownloadLink, Record, ScreenshotRef};
use std::fmt::Write;

pub const INTRO_HEADING: &str = "软件介绍";
pub const FEATURES_HEADING: &str = "功能（使用）说明";
pub const SCREENSHOTS_HEADING: &str = "软件截图";
pub const DOWNLOADS_HEADING: &str = "软件下载";
pub const EXTRA_HEADING: &str = "其他信息";

/// Links per line inside the `[downloads]` group.
const LINKS_PER_LINE: usize = 4;

/// Render the publishing fragment for a record.
///
/// Pure and total: equal records always produce byte-identical output.
pub fn render_fragment(record: &Record) -> String {
    let mut out = String::new();
    intro(&mut out, record);
    if let Some(features) = record.features.as_deref().filter(|f| !f.is_empty()) {
        feature_list(&mut out, features);
    }
    if let Some(shots) = record.screenshots.as_deref().filter(|s| !s.is_empty()) {
        screenshots(&mut out, shots);
    }
    if let Some(links) = record.download_links.as_deref().filter(|l| !l.is_empty()) {
        downloads(&mut out, links);
    }
    extra_info(&mut out, record);
    out
}

fn heading(out: &mut String, text: &str) {
    let _ = writeln!(out, "<h3>{text}</h3>");
}

fn intro(out: &mut String, record: &Record) {
    heading(out, INTRO_HEADING);
    if record.has_description() {
        for para in &record.description {
            let _ = writeln!(out, "<p>{para}</p>");
        }
    }
    out.push('\n');
}

fn feature_list(out: &mut String, features: &[String]) {
    heading(out, FEATURES_HEADING);
    out.push_str("<ol>\n");
    for feature in features {
        let _ = writeln!(out, " <li>{feature}</li>");
    }
    out.push_str("</ol>\n\n");
}

/// `[insertimg caption='…' attribution='…']<img src="…" />[/insertimg]`
pub fn image_shortcode(shot: &ScreenshotRef, index: usize) -> String {
    let caption = shot.caption_or_default(index);
    let open = match shot.attribution.as_deref().filter(|a| !a.is_empty()) {
        Some(attribution) => {
            format!("[insertimg caption='{caption}' attribution='{attribution}']")
        }
        None => format!("[insertimg caption='{caption}']"),
    };
    format!("{open}<img src=\"{}\" />[/insertimg]", shot.url)
}

fn screenshots(out: &mut String, shots: &[ScreenshotRef]) {
    heading(out, SCREENSHOTS_HEADING);
    for (i, shot) in shots.iter().enumerate() {
        out.push_str(&image_shortcode(shot, i));
        out.push('\n');
    }
    out.push('\n');
}

/// `[link url="…" code="…"][/link]`, the code only when non-blank.
pub fn link_shortcode(link: &DownloadLink) -> String {
    match link.visible_code() {
        Some(code) => format!("[link url=\"{}\" code=\"{code}\"][/link]", link.url),
        None => format!("[link url=\"{}\"][/link]", link.url),
    }
}

fn downloads(out: &mut String, links: &[DownloadLink]) {
    heading(out, DOWNLOADS_HEADING);
    out.push_str("[downloads]\n");
    for (i, link) in links.iter().enumerate() {
        out.push(' ');
        out.push_str(&link_shortcode(link));
        if (i + 1) % LINKS_PER_LINE == 0 {
            out.push('\n');
        }
    }
    if links.len() % LINKS_PER_LINE != 0 {
        out.push('\n');
    }
    out.push_str("[/downloads]\n");
}

fn extra_info(out: &mut String, record: &Record) {
    let mut notes = record.visible_notes().peekable();
    if notes.peek().is_none() {
        return;
    }
    out.push('\n');
    heading(out, EXTRA_HEADING);
    for note in notes {
        let _ = writeln!(out, "<p>{note}</p>");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;
    use crate::test_helpers::{bare_record, link, shot};

    #[test]
    fn bare_record_renders_only_intro_heading() {
        let html = render_fragment(&bare_record("x"));
        assert_eq!(html, "<h3>软件介绍</h3>\n\n");
    }

    #[test]
    fn deterministic() {
        let r = parse(crate::test_helpers::PASTEBAR_INFO, "pastebar");
        assert_eq!(render_fragment(&r), render_fragment(&r.clone()));
    }

    #[test]
    fn multi_paragraph_description() {
        let r = parse("[软件信息]\n描述 = A||B||C\n", "s");
        let html = render_fragment(&r);
        assert_eq!(html.matches("<p>").count(), 3);
        let a = html.find("<p>A</p>").unwrap();
        let b = html.find("<p>B</p>").unwrap();
        let c = html.find("<p>C</p>").unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn blank_description_emits_no_paragraph() {
        let mut r = bare_record("x");
        r.description = vec!["   ".into()];
        assert!(!render_fragment(&r).contains("<p>"));
    }

    #[test]
    fn feature_list_layout() {
        let mut r = bare_record("x");
        r.features = Some(vec!["一".into(), "二".into()]);
        let html = render_fragment(&r);
        assert!(html.contains(
            "<h3>功能（使用）说明</h3>\n<ol>\n <li>一</li>\n <li>二</li>\n</ol>\n\n"
        ));
    }

    #[test]
    fn screenshot_with_caption_and_attribution() {
        let mut r = bare_record("x");
        r.screenshots = Some(vec![ScreenshotRef::from_value("Cap|Attr|http://x/y.png")]);
        let html = render_fragment(&r);
        assert!(html.contains(
            "[insertimg caption='Cap' attribution='Attr']<img src=\"http://x/y.png\" />[/insertimg]\n"
        ));
    }

    #[test]
    fn screenshot_default_caption_is_one_based() {
        let mut r = bare_record("x");
        r.screenshots = Some(vec![shot("http://x/1.png"), shot("http://x/2.png")]);
        let html = render_fragment(&r);
        assert!(html.contains("[insertimg caption='软件截图 1']<img src=\"http://x/1.png\" />"));
        assert!(html.contains("[insertimg caption='软件截图 2']<img src=\"http://x/2.png\" />"));
        assert!(!html.contains("attribution="));
    }

    #[test]
    fn five_links_break_after_fourth_and_trail() {
        let mut r = bare_record("x");
        r.download_links = Some((1..=5).map(|i| link(&format!("u{i}"), None)).collect());
        let html = render_fragment(&r);
        let expected = "<h3>软件下载</h3>\n[downloads]\n \
             [link url=\"u1\"][/link] [link url=\"u2\"][/link] \
             [link url=\"u3\"][/link] [link url=\"u4\"][/link]\n \
             [link url=\"u5\"][/link]\n[/downloads]\n";
        assert!(html.ends_with(expected), "got:\n{html}");
        assert_eq!(html.matches("[link ").count(), 5);
    }

    #[test]
    fn four_links_have_single_break() {
        let mut r = bare_record("x");
        r.download_links = Some((1..=4).map(|i| link(&format!("u{i}"), None)).collect());
        let html = render_fragment(&r);
        assert!(html.contains("[link url=\"u4\"][/link]\n[/downloads]\n"));
        assert!(!html.contains("[/link]\n\n"));
    }

    #[test]
    fn link_code_only_when_non_blank() {
        assert_eq!(
            link_shortcode(&link("u", Some("ab12"))),
            "[link url=\"u\" code=\"ab12\"][/link]"
        );
        assert_eq!(link_shortcode(&link("u", Some(" "))), "[link url=\"u\"][/link]");
    }

    #[test]
    fn extra_notes_absent_means_no_heading() {
        let html = render_fragment(&bare_record("x"));
        assert!(!html.contains(EXTRA_HEADING));
    }

    #[test]
    fn all_blank_extra_notes_suppressed() {
        let mut r = bare_record("x");
        r.extra_notes = Some(vec!["".into(), "  ".into()]);
        let html = render_fragment(&r);
        assert!(!html.contains(EXTRA_HEADING));
        assert!(!html.contains("<p></p>"));
    }

    #[test]
    fn blank_extra_notes_skipped_individually() {
        let mut r = bare_record("x");
        r.extra_notes = Some(vec!["a".into(), " ".into(), "b".into()]);
        let html = render_fragment(&r);
        assert!(html.ends_with("\n<h3>其他信息</h3>\n<p>a</p>\n<p>b</p>\n"));
    }

    #[test]
    fn section_order_is_fixed() {
        let r = parse(crate::test_helpers::PASTEBAR_INFO, "pastebar");
        let html = render_fragment(&r);
        let positions: Vec<usize> = [
            INTRO_HEADING,
            FEATURES_HEADING,
            SCREENSHOTS_HEADING,
            DOWNLOADS_HEADING,
            EXTRA_HEADING,
        ]
        .iter()
        .map(|h| html.find(&format!("<h3>{h}</h3>")).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn fallback_record_renders() {
        let html = render_fragment(&Record::fallback("bad"));
        assert_eq!(html, "<h3>软件介绍</h3>\n<p>解析配置文件出错</p>\n\n");
    }
}
