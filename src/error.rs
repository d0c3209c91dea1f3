//! Error types for the cold path
//!
//! The per-step simulation never fails; only loading data and talking to the
//! audio backend can.

use thiserror::Error;

/// Result alias for fallible crate operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("level {index} does not exist (level set has {count} levels)")]
    UnknownLevel { index: usize, count: usize },

    #[error("level set contains no levels")]
    EmptyLevelSet,

    #[error("level {level} entity {entity} has no kind")]
    InvalidEntity { level: usize, entity: usize },

    #[error("setting {name} must be positive and finite, got {value}")]
    InvalidSetting { name: &'static str, value: f32 },

    #[error("audio backend rejected voice {voice}: {reason}")]
    Audio { voice: usize, reason: String },
}
