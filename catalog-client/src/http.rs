//! HTTP client for the remote catalog API

use crate::types::{DraftPayload, ListEnvelope};
use crate::{
    AlwaysOnline, CatalogApi, ClientConfig, ClientError, ClientResult, Connectivity,
};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use shared::{Product, ProductDraft, ProductId, RawProduct, normalize};
use std::sync::Arc;

/// Longest slice of an error body carried in a failure detail
const MAX_DETAIL_LEN: usize = 200;

/// Network catalog client
#[derive(Clone)]
pub struct HttpCatalogClient {
    client: Client,
    base_url: String,
    connectivity: Arc<dyn Connectivity>,
}

impl std::fmt::Debug for HttpCatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCatalogClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl HttpCatalogClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| ClientError::network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            connectivity: Arc::new(AlwaysOnline),
        })
    }

    /// Use the host's connectivity probe for failure classification
    pub fn with_connectivity(mut self, connectivity: Arc<dyn Connectivity>) -> Self {
        self.connectivity = connectivity;
        self
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ClientError::network(format!("invalid API URL {}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::network(format!("invalid API URL {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn product_url(&self, id: &ProductId) -> ClientResult<Url> {
        let id = id.to_string();
        self.endpoint(&["products", id.as_str()])
    }

    async fn send(&self, request: RequestBuilder) -> ClientResult<reqwest::Response> {
        let response = request
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        tracing::warn!(status = status.as_u16(), "Catalog API returned failure status");
        Err(ClientError::server_status(
            status.as_u16(),
            failure_detail(status, &text),
        ))
    }

    async fn read_json<T: DeserializeOwned>(&self, response: reqwest::Response) -> ClientResult<T> {
        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn read_product(&self, response: reqwest::Response) -> ClientResult<Product> {
        let raw: RawProduct = self.read_json(response).await?;
        Ok(normalize(&raw)?)
    }

    fn transport_error(&self, err: reqwest::Error) -> ClientError {
        let err = ClientError::from_transport(err, self.connectivity.is_online());
        tracing::warn!(kind = %err.kind, "Catalog request failed: {}", err.detail);
        err
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogClient {
    async fn list(&self, page_size: u32) -> ClientResult<Vec<Product>> {
        let mut url = self.endpoint(&["products"])?;
        url.query_pairs_mut()
            .append_pair("limit", &page_size.to_string());
        tracing::debug!(%url, "GET products");

        let response = self.send(self.client.get(url)).await?;
        let envelope: ListEnvelope = self.read_json(response).await?;

        envelope
            .into_records()
            .into_iter()
            .enumerate()
            .map(|(index, raw)| {
                normalize(&raw).map_err(|e| {
                    ClientError::malformed(format!("product at index {}: {}", index, e))
                })
            })
            .collect()
    }

    async fn get(&self, id: &ProductId) -> ClientResult<Product> {
        let url = self.product_url(id)?;
        tracing::debug!(%url, "GET product");
        let response = self.send(self.client.get(url)).await?;
        self.read_product(response).await
    }

    async fn create(&self, draft: &ProductDraft) -> ClientResult<Product> {
        let url = self.endpoint(&["products", "add"])?;
        tracing::debug!(%url, "POST product");
        let response = self
            .send(self.client.post(url).json(&DraftPayload::new(draft)))
            .await?;
        self.read_product(response).await
    }

    async fn update(&self, id: &ProductId, draft: &ProductDraft) -> ClientResult<Product> {
        let url = self.product_url(id)?;
        tracing::debug!(%url, "PUT product");
        let response = self
            .send(self.client.put(url).json(&DraftPayload::new(draft)))
            .await?;
        let mut product = self.read_product(response).await?;

        if !product.id.same_record(id) {
            return Err(ClientError::malformed(format!(
                "update of {} answered with record {}",
                id, product.id
            )));
        }
        // Keep the id form the caller already holds
        product.id = id.clone();
        Ok(product)
    }

    async fn delete(&self, id: &ProductId) -> ClientResult<()> {
        let url = self.product_url(id)?;
        tracing::debug!(%url, "DELETE product");
        let response = self.send(self.client.delete(url)).await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ClientError::server_status(
                status.as_u16(),
                format!("delete was not acknowledged ({})", status),
            ));
        }

        let ack: serde_json::Value = self.read_json(response).await?;
        let Some(body) = ack.as_object() else {
            return Err(ClientError::malformed("delete acknowledgment is not an object"));
        };
        match body.get("isDeleted") {
            None | Some(serde_json::Value::Bool(true)) => Ok(()),
            Some(other) => Err(ClientError::malformed(format!(
                "delete acknowledgment reports isDeleted = {}",
                other
            ))),
        }
    }
}

fn failure_detail(status: StatusCode, body: &str) -> String {
    let reason = status.canonical_reason().unwrap_or("Unknown status");
    let body = body.trim();
    if body.is_empty() {
        return reason.to_string();
    }
    let snippet: String = body.chars().take(MAX_DETAIL_LEN).collect();
    format!("{}: {}", reason, snippet)
}
