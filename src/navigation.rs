//! Index resolution and prev/next computation.
//!
//! Readers address comics by zero-based position in the [`Catalog`], or by the
//! two named positions "first" and "latest". Positions are resolved against a
//! fresh scan on every request, so an index is only meaningful for the catalog
//! it was resolved against.
//!
//! Navigation never wraps: the first comic has no previous one and the latest
//! has no next. An absent link is still rendered, just disabled.

use crate::catalog::{Catalog, ComicEntry};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("no comics in catalog")]
    EmptyCatalog,
    #[error("comic {index} not found (catalog has {len})")]
    NotFound { index: i64, len: usize },
}

/// A requested position in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    First,
    Latest,
    /// Explicit index. Signed so that negative requests report `NotFound`
    /// rather than failing to parse.
    Index(i64),
}

/// Previous and next indices around a comic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Navigation {
    pub prev: Option<usize>,
    pub next: Option<usize>,
}

/// A position resolved to a concrete entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<'a> {
    pub index: usize,
    pub entry: &'a ComicEntry,
    pub navigation: Navigation,
}

/// Look up the comic at `index`.
///
/// Valid indices are `0..len`. Anything else, including every index into an
/// empty catalog, is `NotFound`.
pub fn resolve_index(catalog: &Catalog, index: i64) -> Result<&ComicEntry, LookupError> {
    usize::try_from(index)
        .ok()
        .and_then(|i| catalog.get(i))
        .ok_or(LookupError::NotFound {
            index,
            len: catalog.len(),
        })
}

/// Resolve a [`Position`] and compute its navigation.
///
/// `First` and `Latest` on an empty catalog report `EmptyCatalog`, which the
/// presentation layer shows as an empty state rather than a missing page.
pub fn resolve(catalog: &Catalog, position: Position) -> Result<Resolved<'_>, LookupError> {
    let index = match position {
        Position::First if catalog.is_empty() => return Err(LookupError::EmptyCatalog),
        Position::Latest if catalog.is_empty() => return Err(LookupError::EmptyCatalog),
        Position::First => 0,
        Position::Latest => catalog.len() as i64 - 1,
        Position::Index(i) => i,
    };

    let entry = resolve_index(catalog, index)?;
    let index = index as usize;
    Ok(Resolved {
        index,
        entry,
        navigation: navigation(catalog, index),
    })
}

/// Prev/next around `index`, without wraparound.
pub fn navigation(catalog: &Catalog, index: usize) -> Navigation {
    Navigation {
        prev: index.checked_sub(1),
        next: index.checked_add(1).filter(|&n| n < catalog.len()),
    }
}
