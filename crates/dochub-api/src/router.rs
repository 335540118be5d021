//! Route definitions for the DocHub HTTP API.
//!
//! All routes are mounted under `/api`. Screen endpoints accept both GET
//! (query parameters) and POST (url-encoded or multipart bodies).

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::StatusCode,
    middleware as axum_middleware,
    routing::{get, post},
};
use std::time::Duration;

use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Slack on top of the upload limit for the other multipart fields.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let body_limit = usize::try_from(state.config.storage.max_upload_size_bytes)
        .unwrap_or(usize::MAX)
        .saturating_add(FORM_OVERHEAD_BYTES);

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(document_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::compression::build_compression_layer())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(state.config.server.request_timeout_seconds),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::cors::build_cors_layer(&state.config.server.cors))
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Auth endpoints: login, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/me", get(handlers::auth::me))
}

/// Folder and document screens
fn document_routes() -> Router<AppState> {
    use handlers::{document, folder};

    Router::new()
        .route(
            "/documents/folderList",
            get(folder::folder_list).post(folder::folder_list),
        )
        .route(
            "/documents/folderAddModify",
            get(folder::folder_add_modify).post(folder::folder_add_modify),
        )
        .route(
            "/documents/folderDel",
            get(folder::folder_del).post(folder::folder_del),
        )
        .route(
            "/documents/documentList",
            get(document::document_list).post(document::document_list),
        )
        .route(
            "/documents/documentAddModify",
            get(document::document_add_modify).post(document::document_add_modify),
        )
        .route(
            "/documents/documentShow",
            get(document::document_show).post(document::document_show),
        )
        .route(
            "/documents/documentDel",
            get(document::document_del).post(document::document_del),
        )
        .route(
            "/documents/documentDownload",
            get(document::document_download).post(document::document_download),
        )
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
