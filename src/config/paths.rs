//! Canonical paths for lendlib.
//!
//! Single source of truth - import this instead of hardcoding paths.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lendlib::config::paths;
//!
//! let catalog = paths::catalog_file()?;
//! ```

use std::path::PathBuf;

use anyhow::Result;

/// Get the lendlib home directory (~/.lendlib)
pub fn home() -> Result<PathBuf> {
    Ok(crate::config::config()?.home.clone())
}

/// Get the catalog file path (~/.lendlib/catalog.json)
pub fn catalog_file() -> Result<PathBuf> {
    Ok(crate::config::config()?.catalog.clone())
}

/// Catalog file to use, preferring an explicit path over configuration
pub fn catalog_file_or(explicit: Option<PathBuf>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path),
        None => catalog_file(),
    }
}
