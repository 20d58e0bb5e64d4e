//! HTML rendering.
//!
//! ## Pages
//!
//! - **Comic page**: one image with title, position counter, caption, and a
//!   Prev / First / Latest / Next bar above and below the image
//! - **Empty state**: shown at `/` and `/first` while the directory has no comics
//! - **Not found**: an index outside the catalog
//! - **Error**: the comics directory exists but could not be read
//!
//! ## Navigation Controls
//!
//! Prev and Next are always rendered. When there is nowhere to go they carry
//! `aria-disabled="true"` and no `href`, so the layout never shifts between
//! the first, middle and latest comic.
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time:
//! - `static/style.css`: base styles (colors injected from config)
//! - `static/nav.js`: arrow keys, `f`/`l`, and swipe gestures
//!
//! Uses [maud](https://maud.lambda.xyz/) so every interpolated filename and
//! caption is escaped.

use crate::catalog::ComicEntry;
use crate::config::{self, ViewerConfig};
use crate::metadata::Caption;
use crate::navigation::Navigation;
use maud::{DOCTYPE, Markup, PreEscaped, html};

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/nav.js");

pub const LATEST_URL: &str = "/";
pub const FIRST_URL: &str = "/first";

/// Page URL for the comic at `index`.
pub fn comic_url(index: usize) -> String {
    format!("/c/{index}")
}

/// URL of the raw image, served from the comics directory.
pub fn image_url(filename: &str) -> String {
    format!("/comics/{}", urlencoding::encode(filename))
}

/// Settings shared by every page, computed once at startup.
#[derive(Debug, Clone)]
pub struct PageContext {
    pub site_title: String,
    pub css: String,
    pub swipe_threshold: u32,
    /// Shown in the empty-state hint.
    pub comics_dir: String,
}

impl PageContext {
    pub fn from_config(config: &ViewerConfig) -> Self {
        let color_css = config::generate_color_css(&config.colors);
        Self {
            site_title: config.site_title.clone(),
            css: format!("{}\n\n{}", color_css, CSS_STATIC),
            swipe_threshold: config.navigation.swipe_threshold,
            comics_dir: config.comics_dir.display().to_string(),
        }
    }
}

/// Everything the comic page shows.
#[derive(Debug, Clone)]
pub struct ComicPage<'a> {
    pub index: usize,
    pub total: usize,
    pub entry: &'a ComicEntry,
    pub caption: &'a Caption,
    pub navigation: Navigation,
}

// ============================================================================
// HTML Components
// ============================================================================

fn base_document(ctx: &PageContext, title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title {
                    @if title.is_empty() {
                        (ctx.site_title)
                    } @else {
                        (title) " — " (ctx.site_title)
                    }
                }
                style { (PreEscaped(&ctx.css)) }
            }
            body {
                (content)
            }
        }
    }
}

/// A navigation link that may be disabled.
fn nav_button(url: Option<&str>, label: &str) -> Markup {
    let disabled = if url.is_some() { "false" } else { "true" };
    html! {
        a.btn href=[url] aria-disabled=(disabled) { (label) }
    }
}

/// The Prev / First / Latest / Next bar.
fn nav_bar(aria_label: &str, prev: Option<&str>, next: Option<&str>) -> Markup {
    html! {
        nav.grid aria-label=(aria_label) {
            (nav_button(prev, "← Prev"))
            div.center {
                a.btn href=(FIRST_URL) title="First" { "⏮" }
                " "
                a.btn href=(LATEST_URL) title="Latest" { "⏭" }
            }
            (nav_button(next, "Next →"))
        }
    }
}

/// Caption split into paragraphs on blank lines, single newlines kept as breaks.
fn render_caption(description: &str) -> Markup {
    let paragraphs = paragraphs(description);
    html! {
        figcaption.caption {
            @for para in &paragraphs {
                p {
                    @for (i, line) in para.iter().enumerate() {
                        @if i > 0 { br; }
                        (line)
                    }
                }
            }
        }
    }
}

fn paragraphs(text: &str) -> Vec<Vec<&str>> {
    let mut out: Vec<Vec<&str>> = Vec::new();
    let mut current = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the single-comic view.
pub fn render_comic_page(ctx: &PageContext, page: &ComicPage<'_>) -> Markup {
    let entry = page.entry;
    let prev_url = page.navigation.prev.map(comic_url);
    let next_url = page.navigation.next.map(comic_url);
    let alt = page
        .caption
        .alt_text
        .as_deref()
        .unwrap_or(entry.title.as_str());

    let content = html! {
        header {
            h1 { (entry.title) }
            div.sub { (page.index + 1) " / " (page.total) }
        }
        main {
            (nav_bar("pagination top", prev_url.as_deref(), next_url.as_deref()))
            figure.comic {
                img src=(image_url(&entry.filename)) alt=(alt);
                @if let Some(description) = &page.caption.description {
                    (render_caption(description))
                }
            }
            footer {
                (nav_bar("pagination bottom", prev_url.as_deref(), next_url.as_deref()))
                div.meta { "File: " (entry.filename) }
            }
        }
        div id="comic-nav"
            data-prev=[prev_url.as_deref()]
            data-next=[next_url.as_deref()]
            data-first=(FIRST_URL)
            data-latest=(LATEST_URL)
            data-swipe=(ctx.swipe_threshold) {}
        script { (PreEscaped(JS)) }
    };

    base_document(ctx, &entry.title, content)
}

/// Renders the "no comics yet" page.
pub fn render_empty(ctx: &PageContext) -> Markup {
    let content = html! {
        main.empty {
            h1 { "No comics yet" }
            p { "Put images into " code { (ctx.comics_dir) "/" } "." }
        }
    };
    base_document(ctx, "No comics yet", content)
}

/// Renders the 404 page.
pub fn render_not_found(ctx: &PageContext) -> Markup {
    let content = html! {
        main.empty {
            h1 { "Not Found" }
            p { "There is no comic here. " a href=(LATEST_URL) { "Go to the latest one" } "." }
        }
    };
    base_document(ctx, "Not Found", content)
}

/// Renders the 500 page. Details go to the log, not the reader.
pub fn render_error(ctx: &PageContext) -> Markup {
    let content = html! {
        main.empty {
            h1 { "Something went wrong" }
            p { "The comics could not be loaded. Try again shortly." }
        }
    };
    base_document(ctx, "Error", content)
}
