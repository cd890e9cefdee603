// src/modules/content/application/ports/outgoing/remote_store.rs

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::content::domain::entities::{ContentCategory, SortOrder};

//
// ──────────────────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteStoreError {
    /// Backend unreachable or the request never completed.
    #[error("Network error: {0}")]
    Network(String),

    /// Backend answered but refused the operation.
    #[error("Remote store rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Response body could not be decoded into the expected shape.
    #[error("Malformed response: {0}")]
    Malformed(String),
}

//
// ──────────────────────────────────────────────────────────
// Port (table-style CRUD against the hosted backend)
// ──────────────────────────────────────────────────────────
//

#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// All rows of a category, optionally ordered.
    async fn select_all(
        &self,
        category: ContentCategory,
        order: Option<SortOrder>,
    ) -> Result<Vec<JsonValue>, RemoteStoreError>;

    /// A single row by identifier. `Ok(None)` when the row is absent.
    async fn select_by_id(
        &self,
        category: ContentCategory,
        id: &str,
    ) -> Result<Option<JsonValue>, RemoteStoreError>;

    /// Insert, or replace the row with the same `id`.
    async fn upsert(
        &self,
        category: ContentCategory,
        record: JsonValue,
    ) -> Result<(), RemoteStoreError>;

    async fn delete(&self, category: ContentCategory, id: &str) -> Result<(), RemoteStoreError>;

    /// Delete every row of a category except the one with `keep_id`.
    async fn delete_except(
        &self,
        category: ContentCategory,
        keep_id: &str,
    ) -> Result<(), RemoteStoreError>;
}
