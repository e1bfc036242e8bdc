//! Error types for voicevars
//!
//! Centralized error handling using thiserror. The resolver path itself never
//! fails; these errors surface only from the strict readers that sit beside it.

use std::path::PathBuf;

use thiserror::Error;

/// Failures while reading the per-user profile store
#[derive(Debug, Error)]
pub enum ProfileError {
    /// The profile file does not exist
    #[error("Profile store missing: {}", .0.display())]
    Missing(PathBuf),

    /// The profile file exists but could not be read
    #[error("Failed to read profile store {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The profile file is not valid JSON
    #[error("Malformed profile store {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The profile file parsed, but its top level is not a JSON object
    #[error("Profile store {} is not a JSON object", .0.display())]
    NotAnObject(PathBuf),
}

/// All error types that can occur in voicevars
#[derive(Debug, Error)]
pub enum VoiceVarsError {
    /// Profile store error
    #[error(transparent)]
    Profile(#[from] ProfileError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for voicevars operations
pub type Result<T> = std::result::Result<T, VoiceVarsError>;
