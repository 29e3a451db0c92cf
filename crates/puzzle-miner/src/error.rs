//! Miner error types

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MinerError {
    #[error("Configuration error: {0}")]
    Config(&'static str),

    #[error("Dataset root does not exist: {}", .0.display())]
    MissingDatasetRoot(PathBuf),

    #[error("Dataset glob error: {0}")]
    Glob(#[from] glob::PatternError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
