//! HTTP-level integration tests driving the router in-process.

mod helpers;

mod auth_test;
mod document_test;
mod folder_test;
