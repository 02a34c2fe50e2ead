//! Error types
//!
//! Build errors are fatal and abort a flatten or seed. Query errors are caller
//! mistakes. `ApiError` is what the query surface and the CLI report.

use crate::types::{Level, RecordId};
use thiserror::Error;

/// Structural invariant violations found while building or validating records
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("Record sequence is empty")]
    Empty,

    #[error("Duplicate materialized path: {0}")]
    DuplicatePath(String),

    #[error("Title {title:?} contains the reserved path separator")]
    ReservedSeparator { title: String },

    #[error("Name of record {id} is {len} characters long (limit {limit})")]
    NameTooLong { id: RecordId, len: usize, limit: usize },

    #[error("Title of record {id} is {len} characters long (limit {limit})")]
    TitleTooLong { id: RecordId, len: usize, limit: usize },

    #[error("Record at position {position} has id {found}, expected {expected}")]
    IdMismatch {
        position: usize,
        expected: RecordId,
        found: RecordId,
    },

    #[error("Record {id} has no root at position 0")]
    MissingRoot { id: RecordId },

    #[error("Record {id} is a second root")]
    MultipleRoots { id: RecordId },

    #[error("Record {id} has invalid parent {parent:?}: {reason}")]
    InvalidParent {
        id: RecordId,
        parent: Option<RecordId>,
        reason: String,
    },

    #[error("Record {id} has name {name:?}, expected {expected:?}")]
    PathMismatch {
        id: RecordId,
        name: String,
        expected: String,
    },

    #[error("Record {id} has size {found}, counted {expected}")]
    SizeMismatch {
        id: RecordId,
        expected: u64,
        found: u64,
    },
}

/// Caller-supplied query input that is structurally wrong
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("maxDepth must be a positive integer, got {0}")]
    InvalidDepth(i64),

    #[error("Search term cannot be null or empty")]
    EmptySearchTerm,
}

/// Input to the reconstructor that is not a single subtree's preorder slice
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReconstructError {
    #[error("Record {id} at level {level} does not fit the subtree (expected {expected})")]
    Malformed {
        id: RecordId,
        level: Level,
        expected: String,
    },
}

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Sled error: {0}")]
    Sled(#[from] sled::Error),

    #[error("Record encoding error: {0}")]
    Codec(#[from] bincode::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Transaction failed: {0}")]
    Transaction(String),

    #[error("Store is corrupt: {0}")]
    Corrupt(String),

    #[error("Refusing to seed an empty record sequence")]
    EmptySeed,
}

/// Errors reported by the query surface and the CLI
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] QueryError),

    #[error("Node not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Reconstruct(#[from] ReconstructError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl ApiError {
    /// Problem-style status code an HTTP layer would answer with
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Validation(_) => 400,
            ApiError::NotFound(_) => 404,
            ApiError::Build(_) => 409,
            ApiError::Reconstruct(_) | ApiError::Storage(_) | ApiError::ConfigError(_) => 500,
        }
    }

    /// Short title matching the status code
    pub fn title(&self) -> &'static str {
        match self.status_code() {
            400 => "Bad request",
            404 => "Not found",
            409 => "Conflict",
            _ => "An unexpected error occurred",
        }
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
