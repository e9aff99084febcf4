use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, MetadataError>;

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to scan project tree: {0}")]
    Scan(#[from] walkdir::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no JSON metadata block found in {0}")]
    MissingPayload(PathBuf),

    #[error("invalid project path: {0}")]
    InvalidPath(String),
}
