//! # Comic Viewer
//!
//! A minimal web comic viewer. Your filesystem is the data source: drop image
//! files into a directory, name them so that alphabetical order is publication
//! order, and each one becomes a page with first/latest/prev/next navigation.
//!
//! ```text
//! static/comics/
//! ├── 2025-08-01-first.png      → /c/0   "First"
//! ├── 2025-08-01-first.txt      → caption for the comic above
//! ├── 2025-08-05-bug-fix.jpg    → /c/1   "Bug Fix"
//! └── 2025-08-12-deploy-day.png → /c/2   "Deploy Day" (also /)
//! ```
//!
//! # Request Flow
//!
//! Every page request runs the same short pipeline against a fresh directory
//! listing. Nothing is cached between requests.
//!
//! ```text
//! scan dir  →  resolve position  →  read caption  →  render HTML
//! (catalog)    (navigation)         (metadata)       (render)
//! ```
//!
//! The first three steps are plain functions taking the directory or catalog
//! as an argument, so they are unit tested without a running server.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`catalog`] | Non-recursive directory scan, image filter, filename ordering |
//! | [`naming`] | `YYYY-MM-DD-slug` convention and title derivation |
//! | [`metadata`] | Sidecar `.txt` captions and alt text |
//! | [`navigation`] | Index / first / latest resolution and prev/next |
//! | [`render`] | Maud templates for the comic, empty, 404 and error pages |
//! | [`server`] | Axum router, handlers, static image serving, shutdown |
//! | [`config`] | Layered `config.toml` + environment + flag configuration |
//! | [`logging`] | `tracing-subscriber` setup |
//! | [`output`] | Text listing for the `list` command |
//!
//! # Design Decisions
//!
//! ## The Directory Is the Database
//!
//! There is no index file, no upload endpoint and no admin page. Publishing is
//! copying a file. Because the directory is rescanned per request, the viewer
//! never disagrees with what is on disk, and a restart is never needed.
//!
//! ## Filenames Are Compared, Never Parsed
//!
//! Ordering is byte order of the filename. The `YYYY-MM-DD-` prefix is a
//! convention that makes byte order chronological; it is used to strip the
//! date from the display title but is never validated. Files that ignore the
//! convention still work and are titled from their whole name.
//!
//! ## Captions Degrade, Pages Don't Fail
//!
//! A caption that is missing, unreadable, or not valid UTF-8 yields a page
//! without (or with a lossily decoded) caption rather than an error.

pub mod catalog;
pub mod config;
pub mod logging;
pub mod metadata;
pub mod naming;
pub mod navigation;
pub mod output;
pub mod render;
pub mod server;

#[cfg(test)]
pub(crate) mod test_helpers;
