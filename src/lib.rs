//! userdash: terminal dashboard for a remote user directory (library crate).
//!
//! Re-exports public modules for integration tests and external use.

pub mod api;
pub mod config;
pub mod constants;
pub mod dashboard;
pub mod env;
pub mod models;
pub mod output;
pub mod store;
pub mod validation;
