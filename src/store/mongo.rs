use async_trait::async_trait;
use bson::{doc, Document};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::store::DocumentStore;

/// Database used when neither the caller nor the URI names one
pub const DEFAULT_DATABASE: &str = "test";

/// MongoDB-backed store. Collections are untyped: documents go in as they are.
#[derive(Debug, Clone)]
pub struct MongoStore {
    client: Client,
    database: Database,
    hosts: String,
}

impl MongoStore {
    /// Connect and verify the server answers a `ping`. See [`resolve_database`]
    /// for which database is used.
    pub async fn connect(uri: &str, database: Option<&str>) -> StoreResult<Self> {
        let options = ClientOptions::parse(uri)
            .await
            .map_err(|e| StoreError::connection(format!("invalid URI: {}", e)))?;

        let hosts = options
            .hosts
            .iter()
            .map(|host| host.to_string())
            .collect::<Vec<_>>()
            .join(",");
        let name = resolve_database(database, &options);

        let client = Client::with_options(options)?;
        let database = client.database(&name);
        database.run_command(doc! { "ping": 1 }).await?;
        debug!(hosts = %hosts, database = %name, "ping succeeded");

        Ok(Self {
            client,
            database,
            hosts,
        })
    }

    pub fn database_name(&self) -> &str {
        self.database.name()
    }

    fn collection(&self, name: &str) -> Collection<Document> {
        self.database.collection::<Document>(name)
    }
}

/// `explicit` if given, else the database in the URI path, else
/// [`DEFAULT_DATABASE`]
pub fn resolve_database(explicit: Option<&str>, options: &ClientOptions) -> String {
    explicit
        .map(str::to_string)
        .or_else(|| options.default_database.clone())
        .unwrap_or_else(|| DEFAULT_DATABASE.to_string())
}

#[async_trait]
impl DocumentStore for MongoStore {
    fn describe(&self) -> String {
        format!("{}/{}", self.hosts, self.database.name())
    }

    async fn clear(&self, collection: &str) -> StoreResult<u64> {
        let result = self
            .collection(collection)
            .delete_many(doc! {})
            .await
            .map_err(|e| StoreError::operation("delete", collection, e.to_string()))?;
        Ok(result.deleted_count)
    }

    async fn insert(&self, collection: &str, document: Document) -> StoreResult<()> {
        self.collection(collection)
            .insert_one(document)
            .await
            .map_err(|e| StoreError::operation("insert", collection, e.to_string()))?;
        Ok(())
    }

    async fn close(self) -> StoreResult<()> {
        self.client.shutdown().await;
        Ok(())
    }
}
