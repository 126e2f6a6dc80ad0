//! Errors returned by catalog operations.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::ReferenceNumber;

/// Errors that can occur while mutating, loading or saving a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Insufficient copies of item {reference_number}: requested {requested}, available {available}")]
    InsufficientCopies {
        reference_number: ReferenceNumber,
        requested: u64,
        available: u32,
    },

    #[error("Item {reference_number} is not available")]
    NotAvailable { reference_number: ReferenceNumber },

    #[error("Malformed catalog data: {0}")]
    MalformedData(#[from] serde_json::Error),

    #[error("Failed to encode catalog: {0}")]
    Encoding(#[source] serde_json::Error),

    #[error("Unknown reference number: {0}")]
    UnknownReference(ReferenceNumber),

    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
