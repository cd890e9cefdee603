use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use tokio::sync::RwLock;

use crate::content::application::ports::outgoing::remote_store::{RemoteStore, RemoteStoreError};
use crate::content::domain::entities::{ContentCategory, SortOrder};

/// In-process stand-in for the hosted backend.
///
/// Rows keep insertion order; an ordering hint sorts by the named column
/// where present (rows without it go last). `set_offline(true)` makes every
/// call fail with a network error.
#[derive(Debug, Default)]
pub struct InMemoryRemoteStore {
    tables: RwLock<HashMap<ContentCategory, Vec<JsonValue>>>,
    offline: AtomicBool,
    rejecting_writes: AtomicBool,
}

impl InMemoryRemoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Reads keep working; upserts and deletes are refused.
    pub fn set_rejecting_writes(&self, rejecting: bool) {
        self.rejecting_writes.store(rejecting, Ordering::SeqCst);
    }

    pub async fn rows(&self, category: ContentCategory) -> Vec<JsonValue> {
        self.tables
            .read()
            .await
            .get(&category)
            .cloned()
            .unwrap_or_default()
    }

    fn ensure_online(&self) -> Result<(), RemoteStoreError> {
        if self.offline.load(Ordering::SeqCst) {
            Err(RemoteStoreError::Network("backend unreachable".to_string()))
        } else {
            Ok(())
        }
    }

    fn ensure_writable(&self) -> Result<(), RemoteStoreError> {
        self.ensure_online()?;
        if self.rejecting_writes.load(Ordering::SeqCst) {
            Err(RemoteStoreError::Rejected {
                status: 403,
                message: "permission denied".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

fn row_id(row: &JsonValue) -> Option<&str> {
    row.get("id").and_then(JsonValue::as_str)
}

fn sort_key(row: &JsonValue, column: &str) -> Option<String> {
    match row.get(column)? {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[async_trait]
impl RemoteStore for InMemoryRemoteStore {
    async fn select_all(
        &self,
        category: ContentCategory,
        order: Option<SortOrder>,
    ) -> Result<Vec<JsonValue>, RemoteStoreError> {
        self.ensure_online()?;
        let mut rows = self.rows(category).await;

        if let Some(order) = order {
            rows.sort_by(|a, b| {
                let (ka, kb) = (sort_key(a, order.column), sort_key(b, order.column));
                match (ka, kb) {
                    (Some(x), Some(y)) if order.descending => y.cmp(&x),
                    (Some(x), Some(y)) => x.cmp(&y),
                    (Some(_), None) => std::cmp::Ordering::Less,
                    (None, Some(_)) => std::cmp::Ordering::Greater,
                    (None, None) => std::cmp::Ordering::Equal,
                }
            });
        }

        Ok(rows)
    }

    async fn select_by_id(
        &self,
        category: ContentCategory,
        id: &str,
    ) -> Result<Option<JsonValue>, RemoteStoreError> {
        self.ensure_online()?;
        Ok(self
            .tables
            .read()
            .await
            .get(&category)
            .and_then(|rows| rows.iter().find(|r| row_id(r) == Some(id)).cloned()))
    }

    async fn upsert(
        &self,
        category: ContentCategory,
        record: JsonValue,
    ) -> Result<(), RemoteStoreError> {
        self.ensure_writable()?;
        let id = row_id(&record)
            .ok_or_else(|| RemoteStoreError::Rejected {
                status: 400,
                message: "record has no string id".to_string(),
            })?
            .to_string();

        let mut tables = self.tables.write().await;
        let rows = tables.entry(category).or_default();
        match rows.iter_mut().find(|r| row_id(r) == Some(id.as_str())) {
            Some(existing) => *existing = record,
            None => rows.push(record),
        }
        Ok(())
    }

    async fn delete(&self, category: ContentCategory, id: &str) -> Result<(), RemoteStoreError> {
        self.ensure_writable()?;
        if let Some(rows) = self.tables.write().await.get_mut(&category) {
            rows.retain(|r| row_id(r) != Some(id));
        }
        Ok(())
    }

    async fn delete_except(
        &self,
        category: ContentCategory,
        keep_id: &str,
    ) -> Result<(), RemoteStoreError> {
        self.ensure_writable()?;
        if let Some(rows) = self.tables.write().await.get_mut(&category) {
            rows.retain(|r| row_id(r) == Some(keep_id));
        }
        Ok(())
    }
}
