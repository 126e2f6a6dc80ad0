//! Catalog management for lending items.
//!
//! The catalog is persisted as a single JSON file holding an array of
//! items, one object per entry:
//!
//! ```text
//! [
//!   {
//!     "title": "Le Petit Prince",
//!     "referenceNumber": 1,
//!     "availableCount": 5,
//!     "category": "Book",
//!     "author": "Antoine de Saint-Exupéry"
//!   }
//! ]
//! ```

pub mod catalog;
pub mod error;

pub use catalog::{Catalog, CatalogStats};
pub use error::CatalogError;
