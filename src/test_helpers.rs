//! Shared test utilities for the comic-viewer test suite.
//!
//! Builds throwaway comics directories and pulls common fields out of a
//! [`Catalog`] so assertions read as lists.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = comics_dir(&["2025-08-01-first.png", "notes.txt"]);
//! let catalog = scan(tmp.path()).unwrap();
//! assert_eq!(titles(&catalog), vec!["First"]);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::catalog::{Catalog, ComicEntry};

// =========================================================================
// Fixture setup
// =========================================================================

/// Create a temp directory containing the named files.
///
/// Image contents are placeholder bytes; the catalog only looks at names.
pub fn comics_dir(files: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for name in files {
        std::fs::write(tmp.path().join(name), "fake image").unwrap();
    }
    tmp
}

/// Write a caption file next to `image` with the given contents.
pub fn write_caption(dir: &Path, image: &str, contents: impl AsRef<[u8]>) {
    let caption = dir.join(image).with_extension("txt");
    std::fs::write(caption, contents).unwrap();
}

/// Catalog of `n` dated comics, built without touching the filesystem.
pub fn catalog_of(n: usize) -> Catalog {
    (0..n)
        .map(|i| {
            let name = format!("2025-01-{:02}-comic-{}.png", i + 1, i);
            ComicEntry::from_path(Path::new("/comics").join(name)).unwrap()
        })
        .collect()
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// All filenames in catalog order.
pub fn filenames(catalog: &Catalog) -> Vec<&str> {
    catalog.iter().map(|e| e.filename.as_str()).collect()
}

/// All titles in catalog order.
pub fn titles(catalog: &Catalog) -> Vec<&str> {
    catalog.iter().map(|e| e.title.as_str()).collect()
}
