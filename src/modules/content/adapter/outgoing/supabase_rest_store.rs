use async_trait::async_trait;
use reqwest::{Method, Response, Url};
use serde_json::Value as JsonValue;

use crate::content::application::ports::outgoing::remote_store::{RemoteStore, RemoteStoreError};
use crate::content::domain::entities::{ContentCategory, SortOrder};
use crate::shared::supabase::SupabaseClient;

/// PostgREST (`/rest/v1`) implementation of the remote store.
#[derive(Clone)]
pub struct SupabaseRestStore {
    client: SupabaseClient,
}

impl SupabaseRestStore {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    fn table_url(&self, category: ContentCategory) -> Result<Url, RemoteStoreError> {
        self.client
            .endpoint(&format!("rest/v1/{}", category.table_name()))
            .map_err(|e| RemoteStoreError::Network(e.to_string()))
    }

    fn list_url(
        &self,
        category: ContentCategory,
        order: Option<SortOrder>,
    ) -> Result<Url, RemoteStoreError> {
        let mut url = self.table_url(category)?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("select", "*");
            if let Some(order) = order {
                let direction = if order.descending { "desc" } else { "asc" };
                query.append_pair("order", &format!("{}.{}", order.column, direction));
            }
        }
        Ok(url)
    }

    fn row_url(&self, category: ContentCategory, id: &str) -> Result<Url, RemoteStoreError> {
        let mut url = self.table_url(category)?;
        url.query_pairs_mut().append_pair("id", &format!("eq.{id}"));
        Ok(url)
    }

    fn all_but_url(
        &self,
        category: ContentCategory,
        keep_id: &str,
    ) -> Result<Url, RemoteStoreError> {
        let mut url = self.table_url(category)?;
        url.query_pairs_mut().append_pair("id", &format!("neq.{keep_id}"));
        Ok(url)
    }

    async fn send_delete(&self, url: Url) -> Result<(), RemoteStoreError> {
        let response = self
            .client
            .request(Method::DELETE, url)
            .await
            .send()
            .await
            .map_err(network)?;

        check_status(response).await.map(|_| ())
    }
}

async fn check_status(response: Response) -> Result<Response, RemoteStoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .text()
        .await
        .unwrap_or_else(|_| status.canonical_reason().unwrap_or("").to_string());
    Err(RemoteStoreError::Rejected {
        status: status.as_u16(),
        message,
    })
}

fn network(e: reqwest::Error) -> RemoteStoreError {
    RemoteStoreError::Network(e.to_string())
}

#[async_trait]
impl RemoteStore for SupabaseRestStore {
    async fn select_all(
        &self,
        category: ContentCategory,
        order: Option<SortOrder>,
    ) -> Result<Vec<JsonValue>, RemoteStoreError> {
        let url = self.list_url(category, order)?;
        let response = self
            .client
            .request(Method::GET, url)
            .await
            .send()
            .await
            .map_err(network)?;

        check_status(response)
            .await?
            .json::<Vec<JsonValue>>()
            .await
            .map_err(|e| RemoteStoreError::Malformed(e.to_string()))
    }

    async fn select_by_id(
        &self,
        category: ContentCategory,
        id: &str,
    ) -> Result<Option<JsonValue>, RemoteStoreError> {
        let mut url = self.row_url(category, id)?;
        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair("limit", "1");

        let response = self
            .client
            .request(Method::GET, url)
            .await
            .send()
            .await
            .map_err(network)?;

        let rows = check_status(response)
            .await?
            .json::<Vec<JsonValue>>()
            .await
            .map_err(|e| RemoteStoreError::Malformed(e.to_string()))?;
        Ok(rows.into_iter().next())
    }

    async fn upsert(
        &self,
        category: ContentCategory,
        record: JsonValue,
    ) -> Result<(), RemoteStoreError> {
        let mut url = self.table_url(category)?;
        url.query_pairs_mut().append_pair("on_conflict", "id");

        let response = self
            .client
            .request(Method::POST, url)
            .await
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&record)
            .send()
            .await
            .map_err(network)?;

        check_status(response).await.map(|_| ())
    }

    async fn delete(&self, category: ContentCategory, id: &str) -> Result<(), RemoteStoreError> {
        self.send_delete(self.row_url(category, id)?).await
    }

    async fn delete_except(
        &self,
        category: ContentCategory,
        keep_id: &str,
    ) -> Result<(), RemoteStoreError> {
        self.send_delete(self.all_but_url(category, keep_id)?).await
    }
}
