//! Custom Axum extractors.

pub mod auth;
pub mod params;

pub use auth::AuthUser;
pub use params::Params;
