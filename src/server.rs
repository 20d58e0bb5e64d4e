//! HTTP server.
//!
//! ## Routes
//!
//! | Route | Page |
//! |-------|------|
//! | `GET /` | latest comic, or the empty state |
//! | `GET /first` | first comic, or the empty state |
//! | `GET /c/{i}` | comic at zero-based index `i` |
//! | `GET /r/{i}` | same page as `/c/{i}`, kept for stable links in posts |
//! | `GET /comics/{file}` | raw image from the comics directory |
//! | `GET /health` | liveness probe |
//!
//! Each page request rescans the directory and reads at most one caption, on a
//! blocking worker thread. The only shared state is the immutable config.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use tokio::task;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::catalog;
use crate::config::ViewerConfig;
use crate::metadata;
use crate::navigation::{self, LookupError, Position};
use crate::render::{self, ComicPage, PageContext};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid listen address {0:?}")]
    Addr(String),
}

/// Shared application state.
pub struct AppState {
    pub config: ViewerConfig,
    pub pages: PageContext,
}

impl AppState {
    pub fn new(config: ViewerConfig) -> Self {
        let pages = PageContext::from_config(&config);
        Self { config, pages }
    }
}

/// Build the router for `state`.
pub fn router(state: Arc<AppState>) -> Router {
    let images = ServeDir::new(&state.config.comics_dir);

    Router::new()
        .route("/", get(latest))
        .route("/first", get(first))
        .route("/c/:index", get(by_index))
        .route("/r/:index", get(by_index))
        .route("/health", get(health))
        .nest_service("/comics", images)
        .fallback(not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Render the page for `position`: scan, resolve, read the caption, render.
///
/// Synchronous; callers run it on a blocking thread.
pub fn page_for(state: &AppState, position: Position) -> Response {
    let ctx = &state.pages;
    let catalog = match catalog::scan(&state.config.comics_dir) {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::error!(error = %e, "failed to scan comics");
            let body = Html(render::render_error(ctx).into_string());
            return (StatusCode::INTERNAL_SERVER_ERROR, body).into_response();
        }
    };

    match navigation::resolve(&catalog, position) {
        Ok(resolved) => {
            let caption = metadata::load_caption(resolved.entry);
            let page = ComicPage {
                index: resolved.index,
                total: catalog.len(),
                entry: resolved.entry,
                caption: &caption,
                navigation: resolved.navigation,
            };
            Html(render::render_comic_page(ctx, &page).into_string()).into_response()
        }
        Err(LookupError::EmptyCatalog) => {
            Html(render::render_empty(ctx).into_string()).into_response()
        }
        Err(e @ LookupError::NotFound { .. }) => {
            tracing::debug!(error = %e, "comic lookup missed");
            not_found_page(ctx)
        }
    }
}

fn not_found_page(ctx: &PageContext) -> Response {
    let body = Html(render::render_not_found(ctx).into_string());
    (StatusCode::NOT_FOUND, body).into_response()
}

async fn render_position(state: Arc<AppState>, position: Position) -> Response {
    match task::spawn_blocking(move || page_for(&state, position)).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(error = %e, "page render task failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

// === Page Handlers ===

async fn latest(State(state): State<Arc<AppState>>) -> Response {
    render_position(state, Position::Latest).await
}

async fn first(State(state): State<Arc<AppState>>) -> Response {
    render_position(state, Position::First).await
}

/// Parse an index path segment: an optional `-` and ASCII digits.
///
/// `+1` is rejected so each comic has exactly one URL.
pub fn parse_index(raw: &str) -> Option<i64> {
    if raw.starts_with('+') {
        return None;
    }
    raw.parse().ok()
}

/// Anything that is not an integer is simply a page that doesn't exist.
async fn by_index(State(state): State<Arc<AppState>>, Path(raw): Path<String>) -> Response {
    match parse_index(&raw) {
        Some(index) => render_position(state, Position::Index(index)).await,
        None => not_found_page(&state.pages),
    }
}

async fn not_found(State(state): State<Arc<AppState>>) -> Response {
    not_found_page(&state.pages)
}

async fn health() -> &'static str {
    "OK"
}

// === Startup ===

/// Create the comics directory if missing. Failure is logged, not fatal:
/// the catalog treats a missing directory as empty.
pub fn ensure_comics_dir(config: &ViewerConfig) {
    let dir = &config.comics_dir;
    if dir.is_dir() {
        return;
    }
    match std::fs::create_dir_all(dir) {
        Ok(()) => tracing::info!(dir = %dir.display(), "created comics directory"),
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %e, "could not create comics directory")
        }
    }
}

/// Bind and serve until Ctrl+C or SIGTERM.
pub async fn run(config: ViewerConfig) -> Result<(), ServerError> {
    ensure_comics_dir(&config);

    let addr_str = config.bind_addr();
    let addr: SocketAddr = addr_str
        .parse()
        .map_err(|_| ServerError::Addr(addr_str.clone()))?;

    let state = Arc::new(AppState::new(config));
    let app = router(state.clone());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        addr = %addr,
        comics_dir = %state.config.comics_dir.display(),
        "serving comics"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
