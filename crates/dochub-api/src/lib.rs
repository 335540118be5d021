//! # dochub-api
//!
//! HTTP API layer for DocHub built on Axum.
//!
//! Serves the folder and document views as UI descriptions consumed by a
//! generic client renderer, plus login and health endpoints.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
pub mod ui;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
