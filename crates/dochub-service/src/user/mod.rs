//! User administration and authentication services.

pub mod auth;
pub mod service;

pub use auth::{AuthService, LoginResult};
pub use service::{NewUser, UserService};
