//! Command-line interface for lendlib.
//!
//! Provides commands for adding and removing items, lending and returning
//! copies, searching the catalog and printing statistics. Every mutating
//! command loads the catalog file, applies the change and saves it back.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use crate::config::{self, paths};
use crate::domain::{Category, Item, ReferenceNumber};
use crate::library::{Catalog, CatalogStats};

pub mod demo;

/// lendlib - Catalog manager for lending items
#[derive(Parser, Debug)]
#[command(name = "lendlib")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Catalog file (defaults to the configured catalog)
    #[arg(long, global = true, env = config::ENV_CATALOG)]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add an item to the catalog
    Add {
        #[command(subcommand)]
        item: NewItem,
    },

    /// Remove an item from the catalog
    Remove {
        /// Reference number
        reference: u32,
    },

    /// Show a single item
    Show {
        /// Reference number
        reference: u32,
    },

    /// List items in the catalog
    List {
        /// Filter by category
        #[arg(short, long, value_enum)]
        category: Option<CategoryArg>,
    },

    /// Lend one copy of an item
    Checkout {
        /// Reference number
        reference: u32,
    },

    /// Take back one copy of an item
    Return {
        /// Reference number
        reference: u32,
    },

    /// Add or remove copies of an item
    Adjust {
        /// Reference number
        reference: u32,

        /// Number of copies to add (negative to remove)
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },

    /// Search titles and book authors (case-sensitive)
    Search {
        /// Search query (empty lists everything)
        #[arg(default_value = "")]
        query: String,
    },

    /// Show catalog statistics
    Stats,

    /// Run the sample scenario against a scratch catalog file
    Demo {
        /// File the sample catalog is saved to and reloaded from
        #[arg(short, long, default_value = "demo-catalog.json")]
        output: PathBuf,
    },

    /// Show resolved configuration (debug)
    Config,
}

/// Item to add, one subcommand per category
#[derive(Subcommand, Debug)]
pub enum NewItem {
    /// Add a book
    Book {
        #[arg(short, long)]
        title: String,

        #[arg(short, long)]
        reference: u32,

        /// Copies available for loan
        #[arg(short, long, default_value = "1")]
        copies: u32,

        #[arg(short, long)]
        author: String,
    },

    /// Add a disc
    Disc {
        #[arg(short, long)]
        title: String,

        #[arg(short, long)]
        reference: u32,

        /// Copies available for loan
        #[arg(short, long, default_value = "1")]
        copies: u32,

        #[arg(short, long)]
        performer: String,
    },

    /// Add a video
    Video {
        #[arg(short, long)]
        title: String,

        #[arg(short, long)]
        reference: u32,

        /// Copies available for loan
        #[arg(short, long, default_value = "1")]
        copies: u32,

        /// Running time, e.g. "2h28"
        #[arg(short, long)]
        duration: String,
    },
}

impl From<NewItem> for Item {
    fn from(new: NewItem) -> Self {
        match new {
            NewItem::Book {
                title,
                reference,
                copies,
                author,
            } => Item::book(title, reference, copies, author),
            NewItem::Disc {
                title,
                reference,
                copies,
                performer,
            } => Item::disc(title, reference, copies, performer),
            NewItem::Video {
                title,
                reference,
                copies,
                duration,
            } => Item::video(title, reference, copies, duration),
        }
    }
}

/// Category for CLI (maps to Category)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CategoryArg {
    Book,
    Disc,
    Video,
}

impl From<CategoryArg> for Category {
    fn from(c: CategoryArg) -> Self {
        match c {
            CategoryArg::Book => Category::Book,
            CategoryArg::Disc => Category::Disc,
            CategoryArg::Video => Category::Video,
        }
    }
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let catalog = self.catalog;

        match self.command {
            Commands::Add { item } => add_item(&paths::catalog_file_or(catalog)?, item.into()).await,
            Commands::Remove { reference } => {
                remove_item(&paths::catalog_file_or(catalog)?, reference.into()).await
            }
            Commands::Show { reference } => {
                show_item(&paths::catalog_file_or(catalog)?, reference.into()).await
            }
            Commands::List { category } => {
                list_items(&paths::catalog_file_or(catalog)?, category.map(Category::from)).await
            }
            Commands::Checkout { reference } => {
                checkout_item(&paths::catalog_file_or(catalog)?, reference.into()).await
            }
            Commands::Return { reference } => {
                return_item(&paths::catalog_file_or(catalog)?, reference.into()).await
            }
            Commands::Adjust { reference, delta } => {
                adjust_item(&paths::catalog_file_or(catalog)?, reference.into(), delta).await
            }
            Commands::Search { query } => {
                search_catalog(&paths::catalog_file_or(catalog)?, &query).await
            }
            Commands::Stats => show_stats(&paths::catalog_file_or(catalog)?).await,
            Commands::Demo { output } => demo::run(&output).await,
            Commands::Config => show_config(catalog),
        }
    }
}

/// Load the catalog file (empty if it does not exist yet)
async fn open_catalog(path: &Path) -> Result<Catalog> {
    Catalog::open(path)
        .await
        .with_context(|| format!("Failed to open catalog: {}", path.display()))
}

async fn save_catalog(catalog: &Catalog, path: &Path) -> Result<()> {
    catalog
        .save(path)
        .await
        .with_context(|| format!("Failed to save catalog: {}", path.display()))
}

/// Render one item as printed by `show`, `list` and `search`
pub fn describe_item(item: &Item) -> String {
    let (label, value) = item.detail();
    format!(
        "Title: {}, Ref: {}, Available: {}\n{}: {}",
        item.title, item.reference_number, item.available_count, label, value
    )
}

/// Render catalog statistics
pub fn describe_stats(stats: &CatalogStats) -> String {
    format!(
        "Total items: {}, Available copies: {}",
        stats.total_items, stats.total_available
    )
}

/// Print items separated by blank lines
fn print_items<'a>(items: impl IntoIterator<Item = &'a Item>) {
    let mut any = false;
    for item in items {
        println!("{}\n", describe_item(item));
        any = true;
    }
    if !any {
        println!("No items found");
    }
}

async fn add_item(path: &Path, item: Item) -> Result<()> {
    let mut catalog = open_catalog(path).await?;

    if catalog.get(item.reference_number).is_some() {
        eprintln!(
            "Warning: reference number {} is already in use",
            item.reference_number
        );
    }

    println!("Added: {} ({})", item.title, item.category());
    catalog.add(item);
    save_catalog(&catalog, path).await
}

async fn remove_item(path: &Path, reference: ReferenceNumber) -> Result<()> {
    let mut catalog = open_catalog(path).await?;

    match catalog.remove_reference(reference) {
        Some(item) => {
            save_catalog(&catalog, path).await?;
            println!("Removed: {}", item.title);
        }
        None => println!("No item with reference number {}", reference),
    }

    Ok(())
}

async fn show_item(path: &Path, reference: ReferenceNumber) -> Result<()> {
    let catalog = open_catalog(path).await?;

    let item = catalog
        .get(reference)
        .with_context(|| format!("No item with reference number {}", reference))?;
    println!("{}", describe_item(item));

    Ok(())
}

async fn list_items(path: &Path, category: Option<Category>) -> Result<()> {
    let catalog = open_catalog(path).await?;

    match category {
        Some(category) => print_items(catalog.filter_by_category(category)),
        None => print_items(&catalog),
    }

    Ok(())
}

async fn checkout_item(path: &Path, reference: ReferenceNumber) -> Result<()> {
    let mut catalog = open_catalog(path).await?;

    let item = catalog.checkout(reference)?;
    println!(
        "Checked out: {} ({} left)",
        item.title, item.available_count
    );

    save_catalog(&catalog, path).await
}

async fn return_item(path: &Path, reference: ReferenceNumber) -> Result<()> {
    let mut catalog = open_catalog(path).await?;

    match catalog.return_item(reference) {
        Some(item) => {
            println!("Returned: {} ({} available)", item.title, item.available_count);
            save_catalog(&catalog, path).await?;
        }
        None => println!("No item with reference number {}, nothing returned", reference),
    }

    Ok(())
}

async fn adjust_item(path: &Path, reference: ReferenceNumber, delta: i64) -> Result<()> {
    let mut catalog = open_catalog(path).await?;

    let count = catalog.adjust_count(reference, delta)?;
    println!("Item {} now has {} available", reference, count);

    save_catalog(&catalog, path).await
}

async fn search_catalog(path: &Path, query: &str) -> Result<()> {
    let catalog = open_catalog(path).await?;
    print_items(catalog.search(query));
    Ok(())
}

async fn show_stats(path: &Path) -> Result<()> {
    let catalog = open_catalog(path).await?;
    println!("{}", describe_stats(&catalog.statistics()));
    Ok(())
}

/// Show resolved configuration
fn show_config(catalog_override: Option<PathBuf>) -> Result<()> {
    let config = config::config()?;

    println!("Home:        {}", paths::home()?.display());
    println!("Catalog:     {}", paths::catalog_file()?.display());
    if let Some(path) = catalog_override {
        println!("  (overridden by --catalog: {})", path.display());
    }
    match &config.config_file {
        Some(path) => println!("Config file: {}", path.display()),
        None => println!("Config file: (none, using defaults)"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_item() {
        let item = Item::book("Le Petit Prince", 1, 4, "Antoine de Saint-Exupéry");
        assert_eq!(
            describe_item(&item),
            "Title: Le Petit Prince, Ref: 1, Available: 4\nAuthor: Antoine de Saint-Exupéry"
        );
    }

    #[test]
    fn test_describe_stats() {
        let stats = CatalogStats {
            total_items: 3,
            total_available: 9,
        };
        assert_eq!(
            describe_stats(&stats),
            "Total items: 3, Available copies: 9"
        );
    }

    #[test]
    fn test_parse_add_video() {
        let cli = Cli::try_parse_from([
            "lendlib", "add", "video", "--title", "Inception", "--reference", "3", "--copies",
            "2", "--duration", "2h28",
        ])
        .unwrap();

        match cli.command {
            Commands::Add { item } => {
                assert_eq!(Item::from(item), Item::video("Inception", 3, 2, "2h28"));
            }
            other => panic!("Expected Add, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_negative_adjust() {
        let cli = Cli::try_parse_from(["lendlib", "adjust", "2", "-3"]).unwrap();

        match cli.command {
            Commands::Adjust { reference, delta } => {
                assert_eq!(reference, 2);
                assert_eq!(delta, -3);
            }
            other => panic!("Expected Adjust, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_search_without_query() {
        let cli = Cli::try_parse_from(["lendlib", "search"]).unwrap();
        assert!(matches!(cli.command, Commands::Search { ref query } if query.is_empty()));
    }

    #[test]
    fn test_parse_global_catalog_flag() {
        let cli = Cli::try_parse_from(["lendlib", "stats", "--catalog", "/tmp/c.json"]).unwrap();
        assert_eq!(cli.catalog, Some(PathBuf::from("/tmp/c.json")));
    }
}
