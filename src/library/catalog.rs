//! Catalog of lending items.
//!
//! Ordered in-memory collection with checkout/return bookkeeping,
//! substring search and a JSON file representation (an array of items).

use std::path::Path;

use tokio::fs;
use tracing::{debug, info, warn};

use super::error::CatalogError;
use crate::domain::{Category, Item, ReferenceNumber};

/// Ordered collection of items
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    /// Items in insertion order
    items: Vec<Item>,
}

/// Aggregate counts over a catalog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogStats {
    /// Number of entries
    pub total_items: usize,

    /// Sum of available copies over all entries
    pub total_available: u64,
}

impl Catalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Open a catalog file. A missing file yields an empty catalog.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        catalog.load(path).await?;
        Ok(catalog)
    }

    /// Append an item. Reference numbers are not checked for duplicates.
    pub fn add(&mut self, item: Item) {
        debug!(reference = %item.reference_number, title = %item.title, "Adding item");
        self.items.push(item);
    }

    /// Remove the first item with the same reference number as `item`
    pub fn remove(&mut self, item: &Item) -> Option<Item> {
        self.remove_reference(item.reference_number)
    }

    /// Remove the first item with the given reference number
    pub fn remove_reference(&mut self, reference_number: ReferenceNumber) -> Option<Item> {
        let pos = self
            .items
            .iter()
            .position(|i| i.reference_number == reference_number)?;
        Some(self.items.remove(pos))
    }

    /// Get the first item with the given reference number
    pub fn get(&self, reference_number: ReferenceNumber) -> Option<&Item> {
        self.items
            .iter()
            .find(|i| i.reference_number == reference_number)
    }

    /// Mutable access to the first item with the given reference number
    pub fn get_mut(&mut self, reference_number: ReferenceNumber) -> Option<&mut Item> {
        self.items
            .iter_mut()
            .find(|i| i.reference_number == reference_number)
    }

    /// Lend one copy of an item.
    ///
    /// Fails with `NotAvailable` if the reference number is unknown or no
    /// copies are left; the catalog is unchanged in that case.
    pub fn checkout(&mut self, reference_number: ReferenceNumber) -> Result<&Item, CatalogError> {
        match self.get_mut(reference_number) {
            Some(item) if item.available_count > 0 => {
                item.available_count -= 1;
                debug!(reference = %reference_number, remaining = item.available_count, "Checked out");
                Ok(&*item)
            }
            _ => {
                warn!(reference = %reference_number, "Checkout refused");
                Err(CatalogError::NotAvailable { reference_number })
            }
        }
    }

    /// Take back one copy of an item.
    ///
    /// Unknown reference numbers are ignored and yield `None`. There is no
    /// upper bound: returning more copies than were lent raises the count.
    pub fn return_item(&mut self, reference_number: ReferenceNumber) -> Option<&Item> {
        let Some(item) = self.get_mut(reference_number) else {
            debug!(reference = %reference_number, "Return ignored, no such item");
            return None;
        };
        item.add_copies(1);
        Some(&*item)
    }

    /// Adjust the available count of an item by `delta`. Returns the new count.
    pub fn adjust_count(
        &mut self,
        reference_number: ReferenceNumber,
        delta: i64,
    ) -> Result<u32, CatalogError> {
        self.get_mut(reference_number)
            .ok_or(CatalogError::UnknownReference(reference_number))?
            .adjust_count(delta)
    }

    /// Items whose title, or author for books, contains `query`.
    ///
    /// Case-sensitive, in insertion order. An empty query returns every item.
    pub fn search(&self, query: &str) -> Vec<&Item> {
        self.items.iter().filter(|item| item.matches(query)).collect()
    }

    /// Filter items by category
    pub fn filter_by_category(&self, category: Category) -> Vec<&Item> {
        self.items
            .iter()
            .filter(|item| item.category() == category)
            .collect()
    }

    pub fn statistics(&self) -> CatalogStats {
        CatalogStats {
            total_items: self.items.len(),
            total_available: self
                .items
                .iter()
                .map(|item| u64::from(item.available_count))
                .sum(),
        }
    }

    /// All items in insertion order
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Iterate over items in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    /// Get the number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Encode every item, in order, as a pretty-printed JSON array
    pub fn to_json(&self) -> Result<Vec<u8>, CatalogError> {
        serde_json::to_vec_pretty(&self.items).map_err(CatalogError::Encoding)
    }

    /// Replace the whole collection with the items decoded from `bytes`.
    ///
    /// On error the current items are kept.
    pub fn replace_from_json(&mut self, bytes: &[u8]) -> Result<(), CatalogError> {
        self.items = serde_json::from_slice(bytes)?;
        Ok(())
    }

    /// Save the catalog to disk
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<(), CatalogError> {
        let path = path.as_ref();
        let io_error = |source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        };

        // Ensure parent directory exists
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(io_error)?;
        }

        let content = self.to_json()?;
        fs::write(path, content).await.map_err(io_error)?;

        info!(path = %path.display(), items = self.items.len(), "Catalog saved");
        Ok(())
    }

    /// Load the catalog from disk, replacing the current items.
    ///
    /// A missing file leaves the catalog unchanged.
    pub async fn load(&mut self, path: impl AsRef<Path>) -> Result<(), CatalogError> {
        let path = path.as_ref();

        if !path.exists() {
            debug!(path = %path.display(), "No catalog file, keeping current items");
            return Ok(());
        }

        let content = fs::read(path).await.map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.replace_from_json(&content)?;

        info!(path = %path.display(), items = self.items.len(), "Catalog loaded");
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl FromIterator<Item> for Catalog {
    fn from_iter<T: IntoIterator<Item = Item>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
