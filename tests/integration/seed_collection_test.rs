//! Seeding a single collection against the in-memory store

use assert_matches::assert_matches;
use bson::oid::ObjectId;
use bson::{doc, Bson};
use docseed::parser::SeedFile;
use docseed::seeding::CollectionOutcome;
use docseed::{MemoryStore, SeedConfig, Seeder};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn seed_file(dir: &Path, collection: &str, body: &str) -> SeedFile {
    let path = dir.join(format!("golazodb.{}.json", collection));
    fs::write(&path, body).unwrap();
    SeedFile::from_path(path, "golazodb.").unwrap()
}

#[tokio::test]
async fn test_extended_json_is_unwrapped_before_insert() {
    let dir = tempdir().unwrap();
    let file = seed_file(
        dir.path(),
        "players",
        r#"[
            {
                "_id": {"$oid": "64b7f0c2a1b2c3d4e5f60718"},
                "name": "Hagi",
                "team": {"$oid": "64b7f0c2a1b2c3d4e5f60001"},
                "born": {"$date": "1965-02-05T00:00:00.000Z"},
                "transfers": [{"at": {"$date": {"$numberLong": "0"}}, "fee": 4.3}]
            }
        ]"#,
    );

    let seeder = Seeder::new(MemoryStore::new(), SeedConfig::new(dir.path()));
    let report = seeder.seed_collection(&file).await;

    assert!(report.is_seeded());
    assert_eq!(report.inserted, 1);
    let stored = seeder.store().documents("players");
    assert_eq!(
        stored,
        vec![doc! {
            "_id": ObjectId::parse_str("64b7f0c2a1b2c3d4e5f60718").unwrap(),
            "name": "Hagi",
            "team": "64b7f0c2a1b2c3d4e5f60001",
            "born": bson::DateTime::from_millis(-154_742_400_000),
            "transfers": [{"at": bson::DateTime::from_millis(0), "fee": 4.3}],
        }]
    );
}

#[tokio::test]
async fn test_bad_document_does_not_stop_the_rest() {
    let dir = tempdir().unwrap();
    let file = seed_file(
        dir.path(),
        "matches",
        r#"[
            {"round": 1, "kickoff": {"$date": "2024-08-01T18:00:00Z"}},
            {"round": 2, "kickoff": {"$date": "next friday"}},
            "not a document",
            {"round": 4}
        ]"#,
    );

    let seeder = Seeder::new(MemoryStore::new(), SeedConfig::new(dir.path()));
    let report = seeder.seed_collection(&file).await;

    assert_eq!(report.outcome, CollectionOutcome::Seeded);
    assert_eq!(report.attempted, 4);
    assert_eq!(report.inserted, 2);
    let failed: Vec<_> = report.failures.iter().map(|f| f.index).collect();
    assert_eq!(failed, vec![2, 3]);
    assert!(report.failures[0].message.contains("next friday"));
    assert!(report.failures[1].message.contains("string"));

    let rounds: Vec<_> = seeder
        .store()
        .documents("matches")
        .iter()
        .map(|d| d.get("round").cloned())
        .collect();
    assert_eq!(rounds, vec![Some(Bson::Int32(1)), Some(Bson::Int32(4))]);
}

#[tokio::test]
async fn test_store_rejections_are_recorded() {
    let dir = tempdir().unwrap();
    let file = seed_file(dir.path(), "teams", r#"[{"name": "A"}, {"name": "B", "dup": true}]"#);

    let store = MemoryStore::new().reject_when(|d| d.contains_key("dup"));
    let seeder = Seeder::new(store, SeedConfig::new(dir.path()));
    let report = seeder.seed_collection(&file).await;

    assert_eq!(report.inserted, 1);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].index, 2);
    assert!(report.failures[0].message.contains("insert on 'teams' failed"));
}

#[tokio::test]
async fn test_non_hex_id_fails_only_its_document() {
    let dir = tempdir().unwrap();
    let file = seed_file(
        dir.path(),
        "teams",
        r#"[
            {"_id": {"$oid": "64b7f0c2a1b2c3d4e5f60001"}, "name": "Rapid"},
            {"_id": {"$oid": "t2"}, "name": "CFR"},
            {"name": "Dinamo"}
        ]"#,
    );

    let seeder = Seeder::new(MemoryStore::new(), SeedConfig::new(dir.path()));
    let report = seeder.seed_collection(&file).await;

    assert_eq!(report.inserted, 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].index, 2);
    assert!(report.failures[0].message.contains("\"t2\""));

    let stored = seeder.store().documents("teams");
    assert_eq!(
        stored[0].get("_id"),
        Some(&Bson::ObjectId(
            ObjectId::parse_str("64b7f0c2a1b2c3d4e5f60001").unwrap()
        ))
    );
    assert_eq!(stored[1], doc! {"name": "Dinamo"});
}

#[tokio::test]
async fn test_empty_array_leaves_collection_untouched() {
    let dir = tempdir().unwrap();
    let file = seed_file(dir.path(), "leagues", "[]");

    let store = MemoryStore::new();
    store.seed_existing("leagues", vec![doc! {"name": "Liga 1"}]);
    let seeder = Seeder::new(store, SeedConfig::new(dir.path()));
    let report = seeder.seed_collection(&file).await;

    assert_matches!(report.outcome, CollectionOutcome::Skipped { .. });
    assert_eq!(seeder.store().documents("leagues"), vec![doc! {"name": "Liga 1"}]);
}

#[tokio::test]
async fn test_invalid_json_fails_without_clearing() {
    let dir = tempdir().unwrap();
    let file = seed_file(dir.path(), "leagues", "[{\"name\": }]");

    let store = MemoryStore::new();
    store.seed_existing("leagues", vec![doc! {"name": "Liga 1"}]);
    let seeder = Seeder::new(store, SeedConfig::new(dir.path()));
    let report = seeder.seed_collection(&file).await;

    assert_matches!(
        report.outcome,
        CollectionOutcome::Failed { ref error } if error.contains("Invalid JSON")
    );
    assert_eq!(report.attempted, 0);
    assert_eq!(seeder.store().documents("leagues").len(), 1);
}

#[tokio::test]
async fn test_vanished_file_fails() {
    let dir = tempdir().unwrap();
    let file = seed_file(dir.path(), "ghosts", "[{}]");
    fs::remove_file(&file.path).unwrap();

    let seeder = Seeder::new(MemoryStore::new(), SeedConfig::new(dir.path()));
    let report = seeder.seed_collection(&file).await;

    assert_matches!(report.outcome, CollectionOutcome::Failed { .. });
    assert!(seeder.store().collection_names().is_empty());
}
