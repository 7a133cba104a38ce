//! Error types for the crate's I/O edges
//!
//! The projection engine itself is total and never returns these.

use std::path::PathBuf;

/// Failure writing projection records as CSV
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Failed to write {}: {source}", path.display())]
    File {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Invalid or unreadable asset allocation
#[derive(Debug, thiserror::Error)]
pub enum AllocationError {
    #[error("Allocation has no holdings")]
    Empty,

    #[error("Allocation weights sum to zero")]
    ZeroWeight,

    #[error("Negative weight for holding: {name}")]
    NegativeWeight { name: String },

    #[error("Non-finite weight or return for holding: {name}")]
    NonFinite { name: String },

    #[error("CSV read error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Unreadable scenario file
#[derive(Debug, thiserror::Error)]
pub enum ScenarioFileError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid scenario JSON: {0}")]
    Json(#[from] serde_json::Error),
}
