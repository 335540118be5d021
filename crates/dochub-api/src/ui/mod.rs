//! UI description protocol.
//!
//! Every document endpoint answers with a [`UiResponse`]: a screen made of
//! positioned components and actions that a generic client renders.

pub mod action;
pub mod component;
pub mod response;

pub use action::UiAction;
pub use component::{Case, Component, ComponentKind, Grid};
pub use response::{Observer, UiResponse};

use std::fmt::Write;

use chrono::{DateTime, Utc};

/// Extension every screen belongs to.
pub const EXTENSION: &str = "documents";

/// Format a timestamp with a configured `strftime` pattern, falling back
/// to RFC 3339 when the pattern is invalid.
pub fn format_datetime(value: &DateTime<Utc>, pattern: &str) -> String {
    let mut out = String::new();
    match write!(out, "{}", value.format(pattern)) {
        Ok(()) => out,
        Err(_) => value.to_rfc3339(),
    }
}
