//! Domain types for lendlib.
//!
//! - Item: one catalog entry (book, disc or video)

pub mod item;

// Re-export commonly used types
pub use item::{Category, Item, ItemKind, ReferenceNumber};
