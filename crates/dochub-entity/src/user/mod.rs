//! User domain entities.

pub mod model;

pub use model::{CreateUser, NO_USER, User, display_or_none};
