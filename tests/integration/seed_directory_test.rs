//! Seeding whole directories against the in-memory store

use assert_matches::assert_matches;
use bson::doc;
use bson::oid::ObjectId;
use docseed::seeding::CollectionOutcome;
use docseed::{seed_and_close, MemoryStore, SeedConfig, SeedError, Seeder};
use std::fs;
use tempfile::{tempdir, TempDir};

fn oid(hex: &str) -> ObjectId {
    ObjectId::parse_str(hex).unwrap()
}

fn fixture() -> TempDir {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("golazodb.teams.json"),
        r#"[
            {"_id": {"$oid": "64b7f0c2a1b2c3d4e5f60001"}, "name": "Rapid"},
            {"_id": {"$oid": "64b7f0c2a1b2c3d4e5f60002"}, "name": "CFR"}
        ]"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("golazodb.matches.json"),
        r#"[
            {"home": {"$oid": "t1"}, "away": {"$oid": "t2"}, "at": {"$date": "2024-03-10T17:30Z"}},
            {"home": {"$oid": "t2"}, "away": {"$oid": "t1"}, "at": {"$date": "someday"}}
        ]"#,
    )
    .unwrap();
    fs::write(dir.path().join("golazodb.empty.json"), "[]").unwrap();
    fs::write(dir.path().join("notes.json"), r#"[{"ignored": true}]"#).unwrap();
    dir
}

#[tokio::test]
async fn test_seed_directory_processes_every_seed_file() {
    let dir = fixture();
    let store = MemoryStore::new();
    store.seed_existing("teams", vec![doc! {"name": "stale"}]);

    let seeder = Seeder::new(store, SeedConfig::new(dir.path()));
    let summary = seeder.seed_directory().await.unwrap();

    let collections: Vec<_> = summary.reports.iter().map(|r| r.collection.as_str()).collect();
    assert_eq!(collections, vec!["empty", "matches", "teams"]);

    assert_matches!(
        summary.report("empty").unwrap().outcome,
        CollectionOutcome::Skipped { .. }
    );
    assert_eq!(summary.report("matches").unwrap().inserted, 1);
    assert_eq!(summary.report("teams").unwrap().deleted, 1);

    let stats = &summary.statistics;
    assert_eq!(stats.files_found, 3);
    assert_eq!(stats.collections_seeded, 2);
    assert_eq!(stats.collections_skipped, 1);
    assert_eq!(stats.documents_inserted, 3);
    assert_eq!(stats.documents_failed, 1);
    assert!(summary.has_failures());

    let store = seeder.into_store();
    assert_eq!(
        store.documents("teams"),
        vec![
            doc! {"_id": oid("64b7f0c2a1b2c3d4e5f60001"), "name": "Rapid"},
            doc! {"_id": oid("64b7f0c2a1b2c3d4e5f60002"), "name": "CFR"}
        ]
    );
    assert!(store.documents("notes").is_empty());
}

#[tokio::test]
async fn test_stop_on_error_aborts_at_first_failure() {
    let dir = fixture();
    let config = SeedConfig::new(dir.path()).with_stop_on_error(true);
    let seeder = Seeder::new(MemoryStore::new(), config);

    let err = seeder.seed_directory().await.unwrap_err();
    assert_matches!(err, SeedError::Aborted { ref collection, .. } if collection == "matches");
    // teams sorts after matches and was never reached
    assert!(seeder.store().documents("teams").is_empty());
}

#[tokio::test]
async fn test_no_seed_files_is_not_an_error() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("other.json"), "[]").unwrap();

    let summary = Seeder::new(MemoryStore::new(), SeedConfig::new(dir.path()))
        .seed_directory()
        .await
        .unwrap();
    assert!(summary.reports.is_empty());
    assert!(!summary.has_failures());
}

#[tokio::test]
async fn test_custom_prefix_and_recursion() {
    let dir = tempdir().unwrap();
    let nested = dir.path().join("fixtures");
    fs::create_dir(&nested).unwrap();
    fs::write(dir.path().join("seed.users.json"), r#"[{"n": 1}]"#).unwrap();
    fs::write(nested.join("seed.roles.json"), r#"[{"n": 2}]"#).unwrap();

    let config = SeedConfig::new(dir.path()).with_prefix("seed.").with_recursive(true);
    let summary = seed_and_close(MemoryStore::new(), config).await.unwrap();
    assert_eq!(summary.statistics.collections_seeded, 2);
    assert!(summary.report("roles").is_some());
}

#[tokio::test]
async fn test_unreadable_directory_is_an_error() {
    let dir = tempdir().unwrap();
    let config = SeedConfig::new(dir.path().join("missing"));
    let err = Seeder::new(MemoryStore::new(), config)
        .seed_directory()
        .await
        .unwrap_err();
    assert_matches!(err, SeedError::Discovery { .. });
}
