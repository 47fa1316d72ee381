//! Error types for the catalog file boundary

use std::path::PathBuf;

/// Failures surfaced by reading playlists and reading/writing catalogs.
///
/// The parser itself never fails; only file access and JSON encoding do.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Input file \"{}\" not found", .0.display())]
    InputNotFound(PathBuf),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CatalogError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CatalogError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
