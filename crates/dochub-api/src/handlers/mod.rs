//! HTTP handlers.

pub mod auth;
pub mod document;
pub mod folder;
pub mod health;
