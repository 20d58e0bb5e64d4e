//! CLI output for the `list` command.
//!
//! Each comic leads with its 1-based position and title; the file it came from,
//! its date prefix and its caption file (if any) follow as indented context
//! lines:
//!
//! ```text
//! Comics (3) in static/comics
//! 001 First
//!     Source: 2025-08-01-first.png
//!     Date: 2025-08-01
//!     Caption: 2025-08-01-first.txt
//! 002 Bug Fix
//!     Source: 2025-08-05-bug-fix.jpg
//!     Date: 2025-08-05
//! 003 (2025-08-12-.webp)
//!     Date: 2025-08-12
//! ```
//!
//! Comics whose title is empty show the filename in parentheses instead, and
//! skip the redundant `Source:` line.
//!
//! `format_*` functions return lines for testability; `print_*` writes them.

use crate::catalog::Catalog;
use crate::metadata;
use crate::naming;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Titled comics show the title, untitled ones the filename in parens.
fn comic_line(index: usize, title: &str, filename: &str) -> String {
    if title.is_empty() {
        format!("{} ({})", format_index(index), filename)
    } else {
        format!("{} {}", format_index(index), title)
    }
}

/// Format the catalog listing.
pub fn format_catalog(catalog: &Catalog, dir: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    if catalog.is_empty() {
        lines.push(format!("No comics in {}", dir.display()));
        return lines;
    }

    lines.push(format!("Comics ({}) in {}", catalog.len(), dir.display()));
    for (i, entry) in catalog.iter().enumerate() {
        lines.push(comic_line(i + 1, &entry.title, &entry.filename));
        if !entry.title.is_empty() {
            lines.push(format!("    Source: {}", entry.filename));
        }
        if let Some(date) = naming::parse_stem(naming::stem(&entry.filename)).date_prefix {
            lines.push(format!("    Date: {}", date));
        }

        let caption = metadata::caption_path(&entry.path);
        if caption.is_file() {
            let name = caption
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            lines.push(format!("    Caption: {}", name));
        }
    }

    lines
}

/// Print the catalog listing to stdout.
pub fn print_catalog(catalog: &Catalog, dir: &Path) {
    for line in format_catalog(catalog, dir) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::scan;
    use crate::test_helpers::*;

    #[test]
    fn lists_comics_with_sources_and_captions() {
        let tmp = comics_dir(&["2025-08-05-bug-fix.jpg", "2025-08-01-first.png"]);
        write_caption(tmp.path(), "2025-08-01-first.png", "Hello");
        let catalog = scan(tmp.path()).unwrap();

        let lines = format_catalog(&catalog, Path::new("static/comics"));
        assert_eq!(
            lines,
            vec![
                "Comics (2) in static/comics",
                "001 First",
                "    Source: 2025-08-01-first.png",
                "    Date: 2025-08-01",
                "    Caption: 2025-08-01-first.txt",
                "002 Bug Fix",
                "    Source: 2025-08-05-bug-fix.jpg",
                "    Date: 2025-08-05",
            ]
        );
    }

    #[test]
    fn untitled_comic_shows_filename() {
        let tmp = comics_dir(&["2025-08-12-.webp"]);
        let catalog = scan(tmp.path()).unwrap();

        let lines = format_catalog(&catalog, Path::new("c"));
        assert_eq!(lines[1], "001 (2025-08-12-.webp)");
        assert_eq!(lines[2], "    Date: 2025-08-12");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn undated_comic_has_no_date_line() {
        let tmp = comics_dir(&["my-plain-name.png"]);
        let catalog = scan(tmp.path()).unwrap();

        let lines = format_catalog(&catalog, Path::new("c"));
        assert_eq!(
            lines,
            vec![
                "Comics (1) in c",
                "001 My Plain Name",
                "    Source: my-plain-name.png",
            ]
        );
    }

    #[test]
    fn empty_catalog_message() {
        let lines = format_catalog(&Catalog::default(), Path::new("static/comics"));
        assert_eq!(lines, vec!["No comics in static/comics"]);
    }

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(1234), "1234");
    }
}
