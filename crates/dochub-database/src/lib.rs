//! # dochub-database
//!
//! SQLite connection management, embedded migrations, and concrete
//! repository implementations for all DocHub entities.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
