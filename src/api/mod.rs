//! DirectoryApi trait and remote directory integration.
//!
//! Decouples the dashboard from the HTTP client so tests can drive it with
//! an in-memory directory.

pub mod http;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::UserRecord;

pub use http::HttpDirectory;

/// Errors from the remote directory.
///
/// The display text is what the dashboard shows as its error message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    Transport(String),

    #[error("request failed with status code {0}")]
    Status(u16),

    #[error("invalid response payload: {0}")]
    Decode(String),

    #[error("invalid base URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Remote user directory.
///
/// Create and update responses echo the submitted record; implementations
/// discard the echo because the submitted record is authoritative locally.
#[async_trait]
pub trait DirectoryApi: Send + Sync {
    /// `GET /users`. Only a `200` counts as success.
    async fn list_users(&self) -> Result<Vec<UserRecord>, ApiError>;

    /// `POST /users` with the record as body.
    async fn create_user(&self, user: &UserRecord) -> Result<(), ApiError>;

    /// `PUT /users/{id}` with the record as body.
    async fn update_user(&self, id: i64, user: &UserRecord) -> Result<(), ApiError>;

    /// `DELETE /users/{id}`.
    async fn delete_user(&self, id: i64) -> Result<(), ApiError>;
}
