//! docseed: MongoDB seeding from extended-JSON files
//!
//! Reads `<prefix><collection>.json` files from a directory, unwraps the
//! extended-JSON `$oid` / `$date` wrappers in them and loads each file into
//! its collection, replacing whatever the collection held before.

pub mod cli;
pub mod error;
pub mod normalize;
pub mod parser;
pub mod seeding;
pub mod store;

// Re-export commonly used types
pub use error::{NormalizeError, ParseError, SeedError, SeedResult, StoreError};
pub use normalize::{normalize, Normalized};
pub use seeding::{SeedConfig, SeedStatistics, SeedSummary, Seeder};
pub use store::{DocumentStore, MemoryStore, MongoStore};

/// Seed `config.seed_dir` into `store`, then close the store.
///
/// The store is closed even when seeding fails.
pub async fn seed_and_close<S: DocumentStore>(
    store: S,
    config: SeedConfig,
) -> SeedResult<SeedSummary> {
    let seeder = Seeder::new(store, config);
    let result = seeder.seed_directory().await;

    let store = seeder.into_store();
    let description = store.describe();
    match store.close().await {
        Ok(()) => tracing::info!(store = %description, "connection closed"),
        Err(e) => {
            tracing::warn!(store = %description, error = %e, "closing the connection failed")
        }
    }

    result
}
