//! Persistence Integration Tests
//!
//! Tests for the JSON file format, save/load round-trips and the handling
//! of missing or malformed catalog files.

use lendlib::{Catalog, CatalogError, Category, Item, ReferenceNumber};
use tempfile::TempDir;
use tokio::fs;

fn sample_catalog() -> Catalog {
    vec![
        Item::book("Le Petit Prince", 1, 5, "Antoine de Saint-Exupéry"),
        Item::disc("Thriller", 2, 3, "Michael Jackson"),
        Item::video("Inception", 3, 2, "2h28"),
    ]
    .into_iter()
    .collect()
}

#[tokio::test]
async fn test_save_and_load_round_trip() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("catalog.json");

    let mut original = sample_catalog();
    original.checkout(ReferenceNumber::new(1)).unwrap();
    original.save(&path).await.unwrap();

    let mut loaded = Catalog::new();
    loaded.load(&path).await.unwrap();

    assert_eq!(loaded, original);
    assert_eq!(loaded.items()[0].available_count, 4);
}

#[tokio::test]
async fn test_save_creates_parent_directories() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join("dir").join("catalog.json");

    sample_catalog().save(&path).await.unwrap();

    assert!(path.exists());
}

#[tokio::test]
async fn test_load_missing_file_keeps_catalog() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("missing.json");

    let mut empty = Catalog::new();
    empty.load(&path).await.unwrap();
    assert!(empty.is_empty());

    let mut populated = sample_catalog();
    populated.load(&path).await.unwrap();
    assert_eq!(populated, sample_catalog());

    let opened = Catalog::open(&path).await.unwrap();
    assert!(opened.is_empty());
}

#[tokio::test]
async fn test_load_replaces_current_items() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("catalog.json");

    let mut stored = Catalog::new();
    stored.add(Item::video("Alien", 10, 1, "1h57"));
    stored.save(&path).await.unwrap();

    let mut catalog = sample_catalog();
    catalog.load(&path).await.unwrap();

    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.items()[0].title, "Alien");
}

#[tokio::test]
async fn test_file_format() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("catalog.json");

    sample_catalog().save(&path).await.unwrap();

    let content = fs::read_to_string(&path).await.unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    let entries = value.as_array().expect("catalog file is a JSON array");

    assert_eq!(entries.len(), 3);
    assert_eq!(
        entries[0],
        serde_json::json!({
            "category": "Book",
            "title": "Le Petit Prince",
            "referenceNumber": 1,
            "availableCount": 5,
            "author": "Antoine de Saint-Exupéry"
        })
    );
    assert_eq!(entries[1]["category"], "Disc");
    assert_eq!(entries[1]["performer"], "Michael Jackson");
    assert_eq!(entries[2]["category"], "Video");
    assert_eq!(entries[2]["duration"], "2h28");
}

#[test]
fn test_decode_hand_written_json() {
    let json = br#"[
        {"category": "Video", "duration": "2h28", "availableCount": 2,
         "referenceNumber": 3, "title": "Inception"},
        {"title": "Dune", "referenceNumber": 4, "availableCount": 0,
         "category": "Book", "author": "Frank Herbert"}
    ]"#;

    let mut catalog = Catalog::new();
    catalog.replace_from_json(json).unwrap();

    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.items()[0], Item::video("Inception", 3, 2, "2h28"));
    assert_eq!(catalog.items()[1].category(), Category::Book);
    assert_eq!(catalog.items()[1].author(), Some("Frank Herbert"));
}

#[test]
fn test_to_json_round_trip_preserves_order() {
    let mut catalog = sample_catalog();
    catalog.add(Item::book("Dune", 4, 0, "Frank Herbert"));

    let bytes = catalog.to_json().unwrap();
    let mut decoded = Catalog::new();
    decoded.replace_from_json(&bytes).unwrap();

    assert_eq!(decoded, catalog);
}

#[test]
fn test_malformed_data() {
    let cases: &[&[u8]] = &[
        b"not json",
        b"{}",
        // unknown category
        br#"[{"category": "Vinyl", "title": "x", "referenceNumber": 1, "availableCount": 1}]"#,
        // missing category
        br#"[{"title": "x", "referenceNumber": 1, "availableCount": 1, "author": "a"}]"#,
        // missing variant field
        br#"[{"category": "Book", "title": "x", "referenceNumber": 1, "availableCount": 1}]"#,
        // missing common field
        br#"[{"category": "Disc", "title": "x", "availableCount": 1, "performer": "p"}]"#,
        // negative count
        br#"[{"category": "Disc", "title": "x", "referenceNumber": 1, "availableCount": -1, "performer": "p"}]"#,
    ];

    for bytes in cases {
        let mut catalog = sample_catalog();
        let result = catalog.replace_from_json(bytes);

        assert!(
            matches!(result, Err(CatalogError::MalformedData(_))),
            "expected MalformedData for {}",
            String::from_utf8_lossy(bytes)
        );
        assert_eq!(catalog, sample_catalog());
    }
}

#[tokio::test]
async fn test_load_malformed_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("catalog.json");
    fs::write(&path, "[{\"category\": \"Book\"").await.unwrap();

    let mut catalog = sample_catalog();
    let result = catalog.load(&path).await;

    assert!(matches!(result, Err(CatalogError::MalformedData(_))));
    assert_eq!(catalog, sample_catalog());
}

#[tokio::test]
async fn test_load_unreadable_path_is_io_error() {
    let temp = TempDir::new().unwrap();

    // Exists, but is a directory rather than a file
    let mut catalog = sample_catalog();
    let result = catalog.load(temp.path()).await;

    match result {
        Err(CatalogError::Io { path, .. }) => assert_eq!(path, temp.path()),
        other => panic!("Expected Io error, got {:?}", other),
    }
    assert_eq!(catalog, sample_catalog());
}

#[tokio::test]
async fn test_save_under_regular_file_is_io_error() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("blocker");
    fs::write(&blocker, "not a directory").await.unwrap();
    let path = blocker.join("catalog.json");

    let result = sample_catalog().save(&path).await;

    match result {
        Err(CatalogError::Io { path: failed, .. }) => assert_eq!(failed, path),
        other => panic!("Expected Io error, got {:?}", other),
    }
    assert_eq!(
        fs::read_to_string(&blocker).await.unwrap(),
        "not a directory"
    );
}
