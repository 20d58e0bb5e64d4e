//! Display titles derived from comic filenames.
//!
//! Comics are conventionally named `YYYY-MM-DD-slug.ext` so that plain filename
//! order is publication order. The title shown to readers comes from the slug:
//!
//! - `2025-08-05-bug-fix.png` → "Bug Fix"
//! - `2025-08-05-a-b-c.png` → "A B C"
//! - `my-plain-name.png` → "My Plain Name"  (no date prefix, whole stem used)
//!
//! The date prefix is a convention, not a contract. Nothing here parses dates;
//! a stem that does not look like `digits-x-x-slug` is titled as a whole.

use std::path::Path;

/// Result of splitting a comic stem into its optional prefix and slug.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedName {
    /// The `YYYY-MM-DD` part when the stem follows the dated convention.
    pub date_prefix: Option<String>,
    /// Raw title source, dashes preserved. The whole stem when undated.
    pub slug: String,
    /// Title-cased display title.
    pub display_title: String,
}

/// Filename without its final extension.
///
/// `2025-08-05-a.b.png` → `2025-08-05-a.b`. Hidden files such as `.png`
/// have no extension and are returned unchanged.
pub fn stem(filename: &str) -> &str {
    Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename)
}

/// Parse a stem following the `YYYY-MM-DD-slug` convention.
///
/// The stem is split on `-` into at most four parts. When there are four parts
/// and the first is all digits, the fourth (unsplit, so it may still contain
/// dashes) is the slug. Otherwise the entire stem is the slug.
pub fn parse_stem(stem: &str) -> ParsedName {
    let parts: Vec<&str> = stem.splitn(4, '-').collect();
    let (date_prefix, slug) = if parts.len() == 4 && is_all_digits(parts[0]) {
        (Some(parts[..3].join("-")), parts[3])
    } else {
        (None, stem)
    };

    ParsedName {
        date_prefix,
        slug: slug.to_string(),
        display_title: title_case(slug.replace('-', " ").trim()),
    }
}

/// Derive the reader-facing title for a comic filename.
pub fn derive_title(filename: &str) -> String {
    parse_stem(stem(filename)).display_title
}

/// ASCII digits only; other Unicode digits do not mark a date prefix.
fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// Upper-case the first letter of every whitespace-separated word and
/// lower-case the rest. Whitespace runs are preserved as-is.
///
/// Leading punctuation and digits are skipped when looking for the first
/// letter, so `(draft)` → `(Draft)` and `3d` → `3D`. Letters after an
/// apostrophe inside a word stay lower-case (`it's` → `It's`).
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_whitespace() {
            at_word_start = true;
            out.push(c);
        } else if !c.is_alphabetic() {
            out.push(c);
        } else if at_word_start {
            at_word_start = false;
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}
