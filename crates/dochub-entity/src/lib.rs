//! # dochub-entity
//!
//! Domain entity models for DocHub. Every struct in this crate represents
//! a database table row or a domain value object. Database entities derive
//! `sqlx::FromRow`.

pub mod document;
pub mod folder;
pub mod group;
pub mod user;
