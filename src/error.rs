//! Error types for the binsift triage library.
//!
//! The core analyzers are total functions over in-memory buffers and do not
//! fail; errors originate at the I/O boundary (unreadable files, exceeded
//! size limits) and at batch admission control.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for binsift operations.
#[derive(Debug, Error)]
pub enum BinsiftError {
    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Artifact larger than the configured limit
    #[error("File too large: {} ({size} bytes, limit {limit})", path.display())]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        limit: u64,
    },

    /// Batch submitted with no artifacts
    #[error("Empty batch: no artifact paths provided")]
    EmptyBatch,

    /// Batch exceeds the admission cap
    #[error("Batch too large: {count} artifacts (limit {limit})")]
    BatchTooLarge { count: usize, limit: usize },

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for binsift operations
pub type Result<T> = std::result::Result<T, BinsiftError>;
