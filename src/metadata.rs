//! Caption lookup for a single comic.
//!
//! A caption lives in a sidecar text file with the same stem as the image:
//! `2025-08-05-bug-fix.txt` alongside `2025-08-05-bug-fix.png`. The whole file
//! is the description shown under the comic; its first line doubles as the
//! image's alt text.
//!
//! Captions never fail a page. A missing file, a file that vanished between
//! scan and read, or one we lack permission for all resolve to "no caption".
//! Invalid UTF-8 is decoded lossily rather than rejected.

use crate::catalog::ComicEntry;
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};

/// Resolved caption text for one comic.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Caption {
    /// Full caption, trailing whitespace removed.
    pub description: Option<String>,
    /// First line of the description.
    pub alt_text: Option<String>,
}

/// Path of the sidecar caption for an image.
pub fn caption_path(image_path: &Path) -> PathBuf {
    image_path.with_extension("txt")
}

/// Read the caption for `entry`, if there is one.
pub fn load_description(entry: &ComicEntry) -> Option<String> {
    read_sidecar(&entry.path)
}

/// Read `<stem>.txt` next to `image_path`.
///
/// Only the end of the text is trimmed, so intentional leading indentation
/// survives. A caption that is blank after trimming counts as absent.
pub fn read_sidecar(image_path: &Path) -> Option<String> {
    let sidecar = caption_path(image_path);
    let bytes = match std::fs::read(&sidecar) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
        Err(e) => {
            tracing::warn!(path = %sidecar.display(), error = %e, "unreadable caption, ignoring");
            return None;
        }
    };

    let text = String::from_utf8_lossy(&bytes);
    let trimmed = text.trim_end();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// First line of the description, trimmed. `None` when that line is blank.
pub fn alt_text(description: Option<&str>) -> Option<String> {
    description
        .and_then(|d| d.lines().next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// Description and alt text for `entry`, from a single file read.
pub fn load_caption(entry: &ComicEntry) -> Caption {
    let description = load_description(entry);
    let alt_text = alt_text(description.as_deref());
    Caption {
        description,
        alt_text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::test_helpers::*;

    fn only_entry(dir: &Path) -> ComicEntry {
        let catalog = catalog::scan(dir).unwrap();
        assert_eq!(catalog.len(), 1, "expected exactly one comic");
        catalog.entries.into_iter().next().unwrap()
    }

    // =========================================================================
    // load_description() tests
    // =========================================================================

    #[test]
    fn no_sidecar_is_none() {
        let tmp = comics_dir(&["2025-08-05-bug-fix.png"]);
        let entry = only_entry(tmp.path());
        assert_eq!(load_description(&entry), None);
    }

    #[test]
    fn trailing_blank_lines_stripped() {
        let tmp = comics_dir(&["2025-08-05-bug-fix.png"]);
        write_caption(tmp.path(), "2025-08-05-bug-fix.png", "Line one\nLine two\n\n");
        let entry = only_entry(tmp.path());

        let description = load_description(&entry);
        assert_eq!(description.as_deref(), Some("Line one\nLine two"));
        assert_eq!(alt_text(description.as_deref()).as_deref(), Some("Line one"));
    }

    #[test]
    fn leading_whitespace_kept() {
        let tmp = comics_dir(&["a.png"]);
        write_caption(tmp.path(), "a.png", "  indented\n  \t\n");
        let entry = only_entry(tmp.path());
        assert_eq!(load_description(&entry).as_deref(), Some("  indented"));
    }

    #[test]
    fn invalid_utf8_replaced() {
        let tmp = comics_dir(&["a.png"]);
        write_caption(tmp.path(), "a.png", b"caf\xff\n");
        let entry = only_entry(tmp.path());
        assert_eq!(load_description(&entry).as_deref(), Some("caf\u{FFFD}"));
    }

    #[test]
    fn blank_sidecar_is_none() {
        let tmp = comics_dir(&["a.png"]);
        write_caption(tmp.path(), "a.png", "\n\n   \n");
        let entry = only_entry(tmp.path());
        assert_eq!(load_description(&entry), None);
    }

    #[test]
    fn sidecar_that_is_a_directory_is_none() {
        let tmp = comics_dir(&["a.png"]);
        std::fs::create_dir(tmp.path().join("a.txt")).unwrap();
        let entry = only_entry(tmp.path());
        assert_eq!(load_description(&entry), None);
    }

    #[test]
    fn sidecar_uses_stem_of_dotted_name() {
        let tmp = comics_dir(&["2025-08-05-v1.2.png"]);
        write_caption(tmp.path(), "2025-08-05-v1.2.png", "Point release");
        let entry = only_entry(tmp.path());
        assert_eq!(caption_path(&entry.path), tmp.path().join("2025-08-05-v1.2.txt"));
        assert_eq!(load_description(&entry).as_deref(), Some("Point release"));
    }

    // =========================================================================
    // alt_text() tests
    // =========================================================================

    #[test]
    fn alt_text_none_without_description() {
        assert_eq!(alt_text(None), None);
    }

    #[test]
    fn alt_text_trims_first_line() {
        assert_eq!(
            alt_text(Some("  A cat, unimpressed.  \nMore words")),
            Some("A cat, unimpressed.".to_string())
        );
    }

    #[test]
    fn alt_text_handles_crlf() {
        assert_eq!(alt_text(Some("First\r\nSecond")), Some("First".to_string()));
    }

    #[test]
    fn alt_text_none_when_first_line_blank() {
        assert_eq!(alt_text(Some("\nSecond")), None);
    }

    // =========================================================================
    // load_caption() tests
    // =========================================================================

    #[test]
    fn caption_combines_both_fields() {
        let tmp = comics_dir(&["a.png"]);
        write_caption(tmp.path(), "a.png", "Alt line\nBody line\n");
        let entry = only_entry(tmp.path());
        assert_eq!(
            load_caption(&entry),
            Caption {
                description: Some("Alt line\nBody line".to_string()),
                alt_text: Some("Alt line".to_string()),
            }
        );
    }

    #[test]
    fn caption_default_when_missing() {
        let tmp = comics_dir(&["a.png"]);
        let entry = only_entry(tmp.path());
        assert_eq!(load_caption(&entry), Caption::default());
    }
}
