use std::path::PathBuf;

/// Errors from loading or persisting the title database.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("title database not found at {0}")]
    Missing(PathBuf),

    #[error("title database at {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
