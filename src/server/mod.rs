//! Read-only JSON API over the post catalog, with optional live reload

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode};
use serde_json::json;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use tower_http::trace::TraceLayer;

use crate::blog::{Catalog, ParseSortKeyError, Selection};
use crate::i18n::I18n;
use crate::Blogshelf;

/// Everything loaded from disk, swapped as a whole on reload
struct Snapshot {
    catalogs: HashMap<String, Catalog>,
    i18n: I18n,
}

impl Snapshot {
    fn load(shelf: &Blogshelf) -> Result<Self> {
        let mut catalogs = HashMap::new();
        for lang in &shelf.config.languages {
            let lang = lang.to_lowercase();
            let catalog = shelf.load_catalog(&lang)?;
            catalogs.insert(lang, catalog);
        }

        Ok(Self {
            catalogs,
            i18n: shelf.i18n()?,
        })
    }
}

/// Server state
pub struct ServerState {
    shelf: Blogshelf,
    snapshot: RwLock<Snapshot>,
}

impl ServerState {
    /// Load the catalogs of every configured language
    pub fn load(shelf: Blogshelf) -> Result<Self> {
        let snapshot = Snapshot::load(&shelf)?;
        Ok(Self {
            shelf,
            snapshot: RwLock::new(snapshot),
        })
    }

    /// Reload content and translations; the previous snapshot stays in
    /// place when loading fails
    pub fn reload(&self) -> Result<()> {
        let snapshot = Snapshot::load(&self.shelf)?;
        *self.snapshot.write().unwrap_or_else(PoisonError::into_inner) = snapshot;
        Ok(())
    }

    fn read<T>(&self, f: impl FnOnce(&Snapshot) -> T) -> T {
        let guard = self.snapshot.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }
}

/// Build the API router
pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/api/:lang/posts", get(posts_handler))
        .route("/api/:lang/facets", get(facets_handler))
        .route("/api/:lang/i18n", get(i18n_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the API server
pub async fn start(shelf: &Blogshelf, ip: &str, port: u16, watch: bool) -> Result<()> {
    let state = Arc::new(ServerState::load(shelf.clone())?);
    let app = router(state.clone());

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!(
        "Server running at http://{}:{}/api/{}/posts",
        ip, port, shelf.config.default_language
    );
    if watch {
        println!("Watching for content changes...");
    }
    println!("Press Ctrl+C to stop.");

    if watch {
        let mut paths = vec![shelf.content_dir.clone(), shelf.i18n_dir.clone()];
        paths.extend(shelf.pages_file.clone());
        let config_path = shelf.base_dir.join("_config.yml");
        let watched = state.clone();

        tokio::task::spawn_blocking(move || {
            if let Err(e) = watch_and_reload(watched, paths, config_path) {
                tracing::error!("File watcher error: {}", e);
            }
        });
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Watch content for changes and swap in a fresh snapshot
fn watch_and_reload(
    state: Arc<ServerState>,
    paths: Vec<PathBuf>,
    config_path: PathBuf,
) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();

    // Create debouncer to avoid multiple rapid reloads
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    for path in &paths {
        if path.exists() {
            debouncer.watcher().watch(path, RecursiveMode::Recursive)?;
            tracing::debug!("Watching: {:?}", path);
        }
    }

    if config_path.exists() {
        tracing::info!("Changes to {:?} need a restart to take effect", config_path);
    }

    for result in rx {
        match result {
            Ok(events) => {
                let relevant = events.iter().any(|e| {
                    let path_str = e.path.to_string_lossy();
                    !path_str.contains(".git")
                        && !path_str.contains(".DS_Store")
                        && !path_str.ends_with('~')
                });
                if !relevant {
                    continue;
                }

                for event in &events {
                    tracing::info!("File changed: {}", event.path.display());
                }

                match state.reload() {
                    Ok(()) => tracing::info!("Reloaded content"),
                    Err(e) => tracing::warn!("Reload failed, keeping previous content: {}", e),
                }
            }
            Err(e) => {
                tracing::error!("Watch error: {:?}", e);
            }
        }
    }

    Ok(())
}

/// Build a selection from query pairs.
///
/// `q`, `category`, `difficulty`, `tag` and `sort` are recognized; facet
/// keys may repeat or carry comma-separated values.
pub fn selection_from_query(
    params: &[(String, String)],
) -> Result<Selection, ParseSortKeyError> {
    let mut selection = Selection::default();

    for (key, value) in params {
        match key.as_str() {
            "q" | "query" => selection.query = value.clone(),
            "category" | "categories" => push_values(&mut selection.categories, value),
            "difficulty" | "difficulties" => push_values(&mut selection.difficulties, value),
            "tag" | "tags" => push_values(&mut selection.tags, value),
            "sort" => selection.sort = value.parse()?,
            _ => tracing::debug!("Ignoring query parameter {}", key),
        }
    }

    Ok(selection)
}

fn push_values(target: &mut Vec<String>, raw: &str) {
    for value in raw.split(',').map(str::trim).filter(|v| !v.is_empty()) {
        if !target.iter().any(|t| t == value) {
            target.push(value.to_string());
        }
    }
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn unknown_language(lang: &str) -> Response {
    error_response(StatusCode::NOT_FOUND, format!("unknown language: {}", lang))
}

async fn posts_handler(
    State(state): State<Arc<ServerState>>,
    Path(lang): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    let selection = match selection_from_query(&params) {
        Ok(selection) => selection,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
    };

    let lang = lang.to_lowercase();
    let view = state.read(|s| s.catalogs.get(&lang).map(|c| c.view(&selection)));
    match view {
        Some(view) => Json(view).into_response(),
        None => unknown_language(&lang),
    }
}

async fn facets_handler(
    State(state): State<Arc<ServerState>>,
    Path(lang): Path<String>,
) -> Response {
    let lang = lang.to_lowercase();
    match state.read(|s| s.catalogs.get(&lang).map(|c| c.facets.clone())) {
        Some(facets) => Json(facets).into_response(),
        None => unknown_language(&lang),
    }
}

async fn i18n_handler(
    State(state): State<Arc<ServerState>>,
    Path(lang): Path<String>,
) -> Response {
    let lang = lang.to_lowercase();
    let table = state.read(|s| {
        s.catalogs
            .contains_key(&lang)
            .then(|| s.i18n.table(&lang))
    });
    match table {
        Some(table) => Json(table).into_response(),
        None => unknown_language(&lang),
    }
}
