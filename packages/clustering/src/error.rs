//! Typed errors for the clustering library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during clustering operations.
#[derive(Debug, Error)]
pub enum ClusterError {
    /// AI collaborator unavailable or failed
    #[error("AI service error: {0}")]
    AI(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Storage operation failed
    #[error("storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Cluster name already taken (unique-name constraint)
    #[error("duplicate cluster name: {name}")]
    DuplicateClusterName { name: String },

    /// Item not found in store
    #[error("item not found: {id}")]
    ItemNotFound { id: Uuid },

    /// Cluster not found in store
    #[error("cluster not found: {id}")]
    ClusterNotFound { id: Uuid },

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Configuration error
    #[error("config error: {0}")]
    Config(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Result type alias for clustering operations.
pub type Result<T> = std::result::Result<T, ClusterError>;
