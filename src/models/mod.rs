//! Shared types used across all modules.
//!
//! This module defines the user record, the form that edits it, and the
//! id assignment rule. Other modules import from here rather than reaching
//! into each other's internals.

pub mod form;
pub mod user;

pub use form::{FormField, UserForm};
pub use user::{Company, Summary, UserRecord, next_id};
