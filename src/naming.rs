//! Filename sanitizing and the artifact naming convention.
//!
//! Every generated file is named from the record title after sanitizing:
//!
//! - `output/{safe}.html`: the content fragment
//! - `previews/{safe}_preview.html`: the standalone preview page
//! - `contents/{safe}_wordpress.txt`: the publishing payload
//!
//! Sanitizing strips the characters Windows forbids in filenames
//! (`\ / : * ? " < > |`), turns spaces into underscores and caps the result
//! at [`MAX_FILENAME_CHARS`] characters.

/// Upper bound on a sanitized name, in characters.
pub const MAX_FILENAME_CHARS: usize = 100;

const FORBIDDEN: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Make a title safe for use as a filename.
///
/// - `"My:App?Name 2024"` → `"MyAppName_2024"`
/// - `"a/b\\c"` → `"abc"`
pub fn sanitize(name: &str) -> String {
    name.chars()
        .filter(|c| !FORBIDDEN.contains(c))
        .map(|c| if c == ' ' { '_' } else { c })
        .take(MAX_FILENAME_CHARS)
        .collect()
}

/// Filenames of the three artifacts generated for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactNames {
    /// Sanitized title shared by all three names.
    pub stem: String,
    pub fragment: String,
    pub preview: String,
    pub payload: String,
}

impl ArtifactNames {
    pub fn for_title(title: &str) -> Self {
        let stem = sanitize(title);
        Self {
            fragment: format!("{stem}.html"),
            preview: format!("{stem}_preview.html"),
            payload: format!("{stem}_wordpress.txt"),
            stem,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_forbidden_and_replaces_spaces() {
        assert_eq!(sanitize("My:App?Name 2024"), "MyAppName_2024");
    }

    #[test]
    fn strips_every_forbidden_char() {
        assert_eq!(sanitize(r#"a\b/c:d*e?f"g<h>i|j"#), "abcdefghij");
    }

    #[test]
    fn keeps_non_ascii() {
        assert_eq!(sanitize("剪贴板 管理器"), "剪贴板_管理器");
    }

    #[test]
    fn truncates_by_characters() {
        let long = "软".repeat(150);
        let out = sanitize(&long);
        assert_eq!(out.chars().count(), MAX_FILENAME_CHARS);
    }

    #[test]
    fn truncation_applies_after_stripping() {
        let input = format!("{}{}", "?".repeat(50), "a".repeat(120));
        assert_eq!(sanitize(&input), "a".repeat(100));
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn artifact_names_share_stem() {
        let names = ArtifactNames::for_title("Paste Bar");
        assert_eq!(names.stem, "Paste_Bar");
        assert_eq!(names.fragment, "Paste_Bar.html");
        assert_eq!(names.preview, "Paste_Bar_preview.html");
        assert_eq!(names.payload, "Paste_Bar_wordpress.txt");
    }
}
