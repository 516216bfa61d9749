//! Document store seam
//!
//! The loader only needs three things from a database: wipe a collection,
//! insert one document, and shut down. [`MongoStore`] talks to a real server;
//! [`MemoryStore`] keeps everything in process for dry runs and tests.

pub mod memory;
pub mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{Bson, Document};
use serde_json::Number;

use crate::error::{StoreError, StoreResult};
use crate::normalize::Normalized;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Human-readable target, e.g. `localhost:27017/golazo`
    fn describe(&self) -> String;

    /// Delete every document in `collection`, returning how many went
    async fn clear(&self, collection: &str) -> StoreResult<u64>;

    async fn insert(&self, collection: &str, document: Document) -> StoreResult<()>;

    async fn close(self) -> StoreResult<()>
    where
        Self: Sized;
}

/// Primary key field of every document
pub const ID_KEY: &str = "_id";

/// Turn a normalized seed entry into a BSON document.
///
/// Only objects qualify; anything else is [`StoreError::NotADocument`].
/// A string `_id` is stored as an ObjectId and must be 24 hex digits.
pub fn to_document(value: Normalized) -> StoreResult<Document> {
    match value {
        Normalized::Object(fields) => fields
            .into_iter()
            .map(|(key, value)| -> StoreResult<(String, Bson)> {
                let bson = if key == ID_KEY {
                    id_to_bson(value)?
                } else {
                    to_bson(value)
                };
                Ok((key, bson))
            })
            .collect(),
        other => Err(StoreError::NotADocument { kind: other.kind() }),
    }
}

fn id_to_bson(value: Normalized) -> StoreResult<Bson> {
    match value {
        Normalized::String(id) => ObjectId::parse_str(&id)
            .map(Bson::ObjectId)
            .map_err(|_| StoreError::InvalidObjectId { value: id }),
        other => Ok(to_bson(other)),
    }
}

pub fn to_bson(value: Normalized) -> Bson {
    match value {
        Normalized::Null => Bson::Null,
        Normalized::Bool(b) => Bson::Boolean(b),
        Normalized::Number(n) => number_to_bson(&n),
        Normalized::String(s) => Bson::String(s),
        Normalized::DateTime(instant) => {
            Bson::DateTime(bson::DateTime::from_millis(instant.timestamp_millis()))
        }
        Normalized::Array(items) => Bson::Array(items.into_iter().map(to_bson).collect()),
        Normalized::Object(fields) => Bson::Document(
            fields
                .into_iter()
                .map(|(key, value)| (key, to_bson(value)))
                .collect(),
        ),
    }
}

/// Integral values that fit in 32 bits become Int32, everything else Double.
/// This is how JavaScript BSON serializers store plain JS numbers.
fn number_to_bson(number: &Number) -> Bson {
    if let Some(small) = number.as_i64().and_then(|n| i32::try_from(n).ok()) {
        return Bson::Int32(small);
    }

    match number.as_f64() {
        Some(f)
            if f.fract() == 0.0
                && f >= f64::from(i32::MIN)
                && f <= f64::from(i32::MAX)
                && !(f == 0.0 && f.is_sign_negative()) =>
        {
            Bson::Int32(f as i32)
        }
        Some(f) => Bson::Double(f),
        None => Bson::Double(f64::NAN),
    }
}
