//! Sample scenario exercising the whole catalog API.
//!
//! Seeds three items, lends one, lists everything, then saves the catalog,
//! reloads it from disk and prints the statistics.

use std::path::Path;

use anyhow::{Context, Result};

use super::{describe_item, describe_stats};
use crate::domain::{Item, ReferenceNumber};
use crate::library::Catalog;

/// Items the scenario starts from
pub fn sample_items() -> Vec<Item> {
    vec![
        Item::book("Le Petit Prince", 1, 5, "Antoine de Saint-Exupéry"),
        Item::disc("Thriller", 2, 3, "Michael Jackson"),
        Item::video("Inception", 3, 2, "2h28"),
    ]
}

/// Run the scenario, using `output` as the catalog file
pub async fn run(output: &Path) -> Result<()> {
    let mut catalog = Catalog::new();
    for item in sample_items() {
        catalog.add(item);
    }

    // A refused checkout is reported, not fatal
    if let Err(e) = catalog.checkout(ReferenceNumber::new(1)) {
        println!("{}", e);
    }

    println!("\nItems in the catalog:");
    for item in catalog.search("") {
        println!("{}\n", describe_item(item));
    }

    catalog
        .save(output)
        .await
        .with_context(|| format!("Failed to save catalog: {}", output.display()))?;

    catalog
        .load(output)
        .await
        .with_context(|| format!("Failed to reload catalog: {}", output.display()))?;

    println!("\nCatalog statistics:");
    println!("{}", describe_stats(&catalog.statistics()));

    Ok(())
}
