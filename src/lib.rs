//! lendlib - Catalog manager for lending items
//!
//! Tracks books, discs and videos available for loan: add and remove
//! entries, check copies out and back in, search by title or author,
//! and keep the whole catalog in a JSON file.
//!
//! # Modules
//!
//! - `domain`: Data structures (Item, ItemKind, ReferenceNumber)
//! - `library`: The catalog and its persistence
//! - `config`: Path configuration
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Add a book with five copies
//! lendlib add book --title "Le Petit Prince" --reference 1 --copies 5 \
//!     --author "Antoine de Saint-Exupéry"
//!
//! # Lend and take back a copy
//! lendlib checkout 1
//! lendlib return 1
//!
//! # Search titles and authors
//! lendlib search Prince
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod library;

// Re-export main types at crate root for convenience
pub use domain::{Category, Item, ItemKind, ReferenceNumber};
pub use library::{Catalog, CatalogError, CatalogStats};
