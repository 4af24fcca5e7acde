//! CLI output formatting.
//!
//! Output is **record-centric**: every config leads with a positional index
//! and its title, with file paths as indented context lines.
//!
//! ## Build
//!
//! ```text
//! 001 minimal
//!     Source: configs/minimal.info
//!     Fragment: output/minimal.html
//!     Preview: previews/minimal_preview.html
//!     Payload: contents/minimal_wordpress.txt
//! 002 PasteBar
//!     ...
//!
//! Generated 2 configs
//! ```
//!
//! ## List
//!
//! ```text
//! 001 pastebar
//!     Title: PasteBar
//!     Name: PasteBar 剪贴板管理器
//!     Version: 0.6.2
//!     Fragment: generated (PasteBar.html)
//!     Preview: pending
//! ```
//!
//! Each command has a pure `format_*` function returning lines, and a
//! `print_*` wrapper that writes them to stdout.

use crate::config::Layout;
use crate::publish::{BuildReport, CleanStatus, CleanedDir, Generated, ListEntry};
use std::path::Path;

/// Characters of the fragment shown after a single-config generation.
const EXCERPT_CHARS: usize = 300;
/// Width at which excerpt lines are cut.
const EXCERPT_LINE_CHARS: usize = 50;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn display(layout: &Layout, path: &Path) -> String {
    layout.relative(path).display().to_string()
}

/// Cut `text` to `max` characters, appending `...` when cut.
fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{cut}...")
    }
}

/// Lines describing one generated config.
pub fn format_generated(index: usize, generated: &Generated, layout: &Layout) -> Vec<String> {
    let source = layout.config_path(&generated.config_name);
    vec![
        format!("{} {}", format_index(index), generated.record.title),
        format!("    Source: {}", display(layout, &source)),
        format!("    Fragment: {}", display(layout, &generated.artifacts.fragment)),
        format!("    Preview: {}", display(layout, &generated.artifacts.preview)),
        format!("    Payload: {}", display(layout, &generated.artifacts.payload)),
    ]
}

/// The first part of a fragment, each line cut for terminal width.
pub fn format_fragment_excerpt(fragment: &str) -> Vec<String> {
    let head: String = fragment.chars().take(EXCERPT_CHARS).collect();
    let rule = "-".repeat(56);
    let mut lines = vec![rule.clone()];
    lines.extend(
        head.split('\n')
            .map(|line| truncate_chars(line, EXCERPT_LINE_CHARS)),
    );
    lines.push(rule);
    lines
}

/// Output of a batch build.
pub fn format_build_output(report: &BuildReport, layout: &Layout) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, generated) in report.generated.iter().enumerate() {
        lines.extend(format_generated(i + 1, generated, layout));
    }

    if !report.failed.is_empty() {
        lines.push(String::new());
        lines.push("Failed".to_string());
        for failure in &report.failed {
            lines.push(format!("    {}: {}", failure.config_name, failure.error));
        }
    }

    lines.push(String::new());
    if report.generated.is_empty() && report.failed.is_empty() {
        lines.push(format!(
            "No config files found in {}",
            display(layout, &layout.configs_dir)
        ));
    } else if report.failed.is_empty() {
        lines.push(format!("Generated {} configs", report.generated.len()));
    } else {
        lines.push(format!(
            "Generated {} configs, {} failed",
            report.generated.len(),
            report.failed.len()
        ));
    }
    lines
}

/// Output of `gen <name>`: the summary plus a fragment excerpt.
pub fn format_single_output(generated: &Generated, layout: &Layout) -> Vec<String> {
    let mut lines = format_generated(1, generated, layout);
    lines.push(String::new());
    lines.extend(format_fragment_excerpt(&generated.fragment));
    lines
}

fn artifact_status(exists: bool, path: &Path) -> String {
    if exists {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        format!("generated ({name})")
    } else {
        "pending".to_string()
    }
}

/// Output of `list`.
pub fn format_list_output(entries: &[ListEntry], layout: &Layout) -> Vec<String> {
    if entries.is_empty() {
        return vec![format!(
            "No config files found in {}",
            display(layout, &layout.configs_dir)
        )];
    }
    let mut lines = Vec::new();
    for (i, entry) in entries.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), entry.config_name));
        lines.push(format!("    Title: {}", entry.record.title));
        lines.push(format!("    Name: {}", entry.record.name));
        lines.push(format!("    Version: {}", entry.record.version));
        lines.push(format!(
            "    Fragment: {}",
            artifact_status(entry.fragment_exists, &entry.artifacts.fragment)
        ));
        lines.push(format!(
            "    Preview: {}",
            artifact_status(entry.preview_exists, &entry.artifacts.preview)
        ));
    }
    lines
}

/// Output of `clean`.
pub fn format_clean_output(cleaned: &[CleanedDir], layout: &Layout) -> Vec<String> {
    cleaned
        .iter()
        .map(|dir| {
            let path = display(layout, &dir.path);
            match dir.status {
                CleanStatus::Cleaned { removed } => {
                    format!("Cleaned {path}/ ({removed} files)")
                }
                CleanStatus::Missing => format!("Missing {path}/"),
            }
        })
        .collect()
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}

pub fn print_build_output(report: &BuildReport, layout: &Layout) {
    print_lines(format_build_output(report, layout));
}

pub fn print_single_output(generated: &Generated, layout: &Layout) {
    print_lines(format_single_output(generated, layout));
}

pub fn print_list_output(entries: &[ListEntry], layout: &Layout) {
    print_lines(format_list_output(entries, layout));
}

pub fn print_clean_output(cleaned: &[CleanedDir], layout: &Layout) {
    print_lines(format_clean_output(cleaned, layout));
}
