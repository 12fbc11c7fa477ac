//! Catalog load error types.
//!
//! Load-time structural failures are the only fatal condition in the crate;
//! per-item and per-token resolution failures are absorbed into output data.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading catalog data.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Failed to read a catalog file from disk.
    #[error("Failed to read catalog '{catalog}' from {}: {source}", path.display())]
    ReadFailed {
        catalog: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse catalog JSON.
    #[error("Failed to parse catalog '{catalog}': {source}")]
    ParseFailed {
        catalog: String,
        #[source]
        source: serde_json::Error,
    },

    /// No category could be loaded at all; the generator cannot function.
    #[error("No catalogs could be loaded from {}", dir.display())]
    NoCatalogs { dir: PathBuf },
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
