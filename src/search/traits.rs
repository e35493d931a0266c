use super::query::SearchRequest;
use crate::error::Result;
use crate::models::RentableListing;
use async_trait::async_trait;

/// Read side of the hosted search index
#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// Run a search and return the hit documents in index order
    async fn search(&self, request: &SearchRequest) -> Result<Vec<RentableListing>>;

    /// Remove one document by id
    async fn delete_document(&self, id: &str) -> Result<()>;
}

/// Anything that can upsert a listing into the index
#[async_trait]
pub trait IndexWriter: Send + Sync {
    async fn upsert(&self, listing: &RentableListing) -> Result<()>;

    /// Name used in logs
    fn writer_name(&self) -> &'static str;
}
