//! Directory scanning and ordering.
//!
//! The comics directory is the only data source. Every request rescans it; no
//! index survives between calls, so dropping a new file in is all it takes to
//! publish.
//!
//! ## Directory Structure
//!
//! ```text
//! static/comics/
//! ├── 2025-08-01-first.png          # Comic (index 0, "First")
//! ├── 2025-08-01-first.txt          # Optional caption for the comic above
//! ├── 2025-08-05-bug-fix.jpg        # Comic (index 1, "Bug Fix")
//! ├── 2025-08-12-deploy-day.webp    # Comic (index 2, latest)
//! └── notes.md                      # Ignored: not an image
//! ```
//!
//! ## Rules
//!
//! - Non-recursive: subdirectories are ignored.
//! - Only regular files with an allowed image extension (case-insensitive) count.
//! - Order is plain filename order, ascending. Date-prefixed names make this
//!   chronological, but no date is ever parsed.
//! - A missing directory is an empty catalog, not an error.

use crate::naming;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("cannot read comics directory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Extensions accepted as comics, compared case-insensitively.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif"];

/// One displayable comic.
///
/// The title is derived from the filename at scan time. Captions are not part
/// of the entry; they are read on demand via [`crate::metadata::load_caption`]
/// for the single entry being shown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComicEntry {
    /// Basename, unique within the catalog.
    pub filename: String,
    /// Full path on disk.
    #[serde(skip)]
    pub path: PathBuf,
    pub title: String,
}

impl ComicEntry {
    pub fn from_path(path: PathBuf) -> Option<Self> {
        let filename = path.file_name()?.to_string_lossy().into_owned();
        let title = naming::derive_title(&filename);
        Some(Self {
            filename,
            path,
            title,
        })
    }
}

/// Snapshot of the comics directory, ordered by filename.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Catalog {
    pub entries: Vec<ComicEntry>,
}

impl Catalog {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ComicEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ComicEntry> {
        self.entries.iter()
    }
}

impl FromIterator<ComicEntry> for Catalog {
    fn from_iter<I: IntoIterator<Item = ComicEntry>>(iter: I) -> Self {
        let mut entries: Vec<ComicEntry> = iter.into_iter().collect();
        entries.sort_by(|a, b| a.filename.cmp(&b.filename));
        Self { entries }
    }
}

/// Scan `dir` for comics.
pub fn scan(dir: &Path) -> Result<Catalog, CatalogError> {
    let read = match fs::read_dir(dir) {
        Ok(read) => read,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(dir = %dir.display(), "comics directory does not exist");
            return Ok(Catalog::default());
        }
        Err(source) => {
            return Err(CatalogError::Io {
                path: dir.to_path_buf(),
                source,
            });
        }
    };

    let catalog: Catalog = read
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| is_image(p))
        .filter_map(ComicEntry::from_path)
        .collect();

    tracing::debug!(dir = %dir.display(), count = catalog.len(), "scanned comics");
    Ok(catalog)
}

/// Regular file with an allowed extension.
pub fn is_image(path: &Path) -> bool {
    if !path.is_file() {
        return false;
    }
    has_image_extension(path)
}

fn has_image_extension(path: &Path) -> bool {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    IMAGE_EXTENSIONS.contains(&ext.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn only_images_listed_in_order() {
        let tmp = comics_dir(&["b.jpg", "c.txt", "a.png"]);
        let catalog = scan(tmp.path()).unwrap();
        assert_eq!(filenames(&catalog), vec!["a.png", "b.jpg"]);
    }

    #[test]
    fn missing_directory_is_empty() {
        let tmp = TempDir::new().unwrap();
        let catalog = scan(&tmp.path().join("nope")).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn file_instead_of_directory_is_error() {
        let tmp = comics_dir(&["a.png"]);
        let result = scan(&tmp.path().join("a.png"));
        assert!(matches!(result, Err(CatalogError::Io { .. })));
    }

    #[test]
    fn extensions_are_case_insensitive() {
        let tmp = comics_dir(&["a.PNG", "b.JpEg", "c.GIF", "d.webp", "e.bmp", "f"]);
        let catalog = scan(tmp.path()).unwrap();
        assert_eq!(filenames(&catalog), vec!["a.PNG", "b.JpEg", "c.GIF", "d.webp"]);
    }

    #[test]
    fn subdirectories_are_ignored() {
        let tmp = comics_dir(&["2025-01-01-a.png"]);
        fs::create_dir_all(tmp.path().join("archive.png")).unwrap();
        fs::create_dir_all(tmp.path().join("nested")).unwrap();
        fs::write(tmp.path().join("nested/2024-01-01-old.png"), "fake image").unwrap();

        let catalog = scan(tmp.path()).unwrap();
        assert_eq!(filenames(&catalog), vec!["2025-01-01-a.png"]);
    }

    #[test]
    fn date_prefixes_sort_chronologically() {
        let tmp = comics_dir(&[
            "2025-08-12-deploy-day.webp",
            "2025-08-01-first.png",
            "2025-08-05-bug-fix.jpg",
        ]);
        let catalog = scan(tmp.path()).unwrap();
        assert_eq!(titles(&catalog), vec!["First", "Bug Fix", "Deploy Day"]);
    }

    #[test]
    fn ordering_is_bytewise_not_natural() {
        let tmp = comics_dir(&["10.png", "9.png", "B.png", "a.png"]);
        let catalog = scan(tmp.path()).unwrap();
        assert_eq!(filenames(&catalog), vec!["10.png", "9.png", "B.png", "a.png"]);
    }

    #[test]
    fn scan_is_idempotent() {
        let tmp = comics_dir(&["2025-08-01-a.png", "2025-08-02-b.gif", "x.txt"]);
        let first = scan(tmp.path()).unwrap();
        let second = scan(tmp.path()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn rescan_sees_new_files() {
        let tmp = comics_dir(&["2025-08-01-a.png"]);
        assert_eq!(scan(tmp.path()).unwrap().len(), 1);
        fs::write(tmp.path().join("2025-08-02-b.png"), "fake image").unwrap();
        assert_eq!(scan(tmp.path()).unwrap().len(), 2);
    }

    #[test]
    fn entry_carries_path_and_title() {
        let tmp = comics_dir(&["2025-08-05-bug-fix.JPG"]);
        let catalog = scan(tmp.path()).unwrap();
        let entry = catalog.get(0).unwrap();
        assert_eq!(entry.path, tmp.path().join("2025-08-05-bug-fix.JPG"));
        assert_eq!(entry.title, "Bug Fix");
    }
}
