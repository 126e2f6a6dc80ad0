//! Lending items held by a catalog.
//!
//! An item is one catalog entry: a title, a caller-assigned reference number,
//! the number of copies currently on the shelf, and one category-specific
//! attribute (author, performer or running time).

use serde::{Deserialize, Serialize};

use crate::library::CatalogError;

/// Caller-assigned identifier of an item within a catalog.
///
/// Uniqueness is not enforced; lookups return the first match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceNumber(u32);

impl ReferenceNumber {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the raw numeric value
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for ReferenceNumber {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for ReferenceNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of item, without the variant payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Book,
    Disc,
    Video,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Book => write!(f, "Book"),
            Category::Disc => write!(f, "Disc"),
            Category::Video => write!(f, "Video"),
        }
    }
}

impl std::str::FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "book" => Ok(Category::Book),
            "disc" | "cd" => Ok(Category::Disc),
            "video" | "dvd" => Ok(Category::Video),
            _ => anyhow::bail!("Unknown category: {}", s),
        }
    }
}

/// Category-specific part of an item.
///
/// Serialized with an inline `category` discriminant so that a persisted
/// object carries exactly one of `author`, `performer` or `duration`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category")]
pub enum ItemKind {
    Book { author: String },
    Disc { performer: String },
    /// Running time is free-form, e.g. "2h28"
    Video { duration: String },
}

impl ItemKind {
    pub fn category(&self) -> Category {
        match self {
            ItemKind::Book { .. } => Category::Book,
            ItemKind::Disc { .. } => Category::Disc,
            ItemKind::Video { .. } => Category::Video,
        }
    }
}

/// A single entry in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Human-readable title
    pub title: String,

    /// Identifier used by lookup, checkout and return
    pub reference_number: ReferenceNumber,

    /// Copies currently available for loan
    pub available_count: u32,

    /// Category and its specific attribute
    #[serde(flatten)]
    pub kind: ItemKind,
}

impl Item {
    /// Create a new item
    pub fn new(
        title: impl Into<String>,
        reference_number: ReferenceNumber,
        available_count: u32,
        kind: ItemKind,
    ) -> Self {
        Self {
            title: title.into(),
            reference_number,
            available_count,
            kind,
        }
    }

    pub fn book(
        title: impl Into<String>,
        reference_number: u32,
        available_count: u32,
        author: impl Into<String>,
    ) -> Self {
        Self::new(
            title,
            ReferenceNumber::new(reference_number),
            available_count,
            ItemKind::Book {
                author: author.into(),
            },
        )
    }

    pub fn disc(
        title: impl Into<String>,
        reference_number: u32,
        available_count: u32,
        performer: impl Into<String>,
    ) -> Self {
        Self::new(
            title,
            ReferenceNumber::new(reference_number),
            available_count,
            ItemKind::Disc {
                performer: performer.into(),
            },
        )
    }

    pub fn video(
        title: impl Into<String>,
        reference_number: u32,
        available_count: u32,
        duration: impl Into<String>,
    ) -> Self {
        Self::new(
            title,
            ReferenceNumber::new(reference_number),
            available_count,
            ItemKind::Video {
                duration: duration.into(),
            },
        )
    }

    pub fn category(&self) -> Category {
        self.kind.category()
    }

    /// The category-specific attribute as a `(label, value)` pair
    pub fn detail(&self) -> (&'static str, &str) {
        match &self.kind {
            ItemKind::Book { author } => ("Author", author.as_str()),
            ItemKind::Disc { performer } => ("Performer", performer.as_str()),
            ItemKind::Video { duration } => ("Duration", duration.as_str()),
        }
    }

    /// Author of a book, `None` for other categories
    pub fn author(&self) -> Option<&str> {
        match &self.kind {
            ItemKind::Book { author } => Some(author.as_str()),
            _ => None,
        }
    }

    /// Whether the title (or, for books, the author) contains `query`.
    ///
    /// Case-sensitive; an empty query matches every item.
    pub fn matches(&self, query: &str) -> bool {
        self.title.contains(query) || self.author().is_some_and(|a| a.contains(query))
    }

    /// Add copies. Saturates at `u32::MAX`.
    pub fn add_copies(&mut self, count: u32) {
        self.available_count = self.available_count.saturating_add(count);
    }

    /// Remove copies, failing without change if fewer than `count` are available
    pub fn remove_copies(&mut self, count: u32) -> Result<(), CatalogError> {
        match self.available_count.checked_sub(count) {
            Some(remaining) => {
                self.available_count = remaining;
                Ok(())
            }
            None => Err(CatalogError::InsufficientCopies {
                reference_number: self.reference_number,
                requested: u64::from(count),
                available: self.available_count,
            }),
        }
    }

    /// Add (`delta > 0`) or remove (`delta < 0`) copies.
    ///
    /// Returns the new available count.
    pub fn adjust_count(&mut self, delta: i64) -> Result<u32, CatalogError> {
        let magnitude = delta.unsigned_abs();
        if delta >= 0 {
            self.add_copies(u32::try_from(magnitude).unwrap_or(u32::MAX));
        } else {
            let count = u32::try_from(magnitude).map_err(|_| CatalogError::InsufficientCopies {
                reference_number: self.reference_number,
                requested: magnitude,
                available: self.available_count,
            })?;
            self.remove_copies(count)?;
        }
        Ok(self.available_count)
    }
}
