//! Remote catalog operations

use crate::ClientResult;
use async_trait::async_trait;
use shared::{Product, ProductDraft, ProductId};

/// Remote CRUD surface of the product catalog
///
/// Every call is exactly one round trip and never retries on its own.
/// Records come back already normalized.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn list(&self, page_size: u32) -> ClientResult<Vec<Product>>;
    async fn get(&self, id: &ProductId) -> ClientResult<Product>;
    async fn create(&self, draft: &ProductDraft) -> ClientResult<Product>;
    async fn update(&self, id: &ProductId, draft: &ProductDraft) -> ClientResult<Product>;
    /// Succeeds only on an explicit `200 OK` acknowledgment
    async fn delete(&self, id: &ProductId) -> ClientResult<()>;
}
