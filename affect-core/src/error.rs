//! Error types for the affect core library.
//!
//! The simulation itself never fails: unknown names, partial snapshots and
//! empty fields all resolve to documented defaults. Errors only surface at the
//! edges, when parsing text, loading config or touching the filesystem.

use thiserror::Error;

/// Top-level error type for fallible affect operations.
#[derive(Error, Debug)]
pub enum AffectError {
    /// A string did not name any emotion in the catalog.
    #[error("Unknown emotion: {0}")]
    UnknownEmotion(String),

    /// A string did not name any synergy in the rule table.
    #[error("Unknown synergy: {0}")]
    UnknownSynergy(String),

    /// Serialization or deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for AffectError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, AffectError>;
