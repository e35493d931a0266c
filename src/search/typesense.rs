use super::query::SearchRequest;
use super::traits::{IndexWriter, SearchIndex};
use crate::error::{AdminError, Result};
use crate::graphql::{documents, GraphqlRequest, GraphqlTransport};
use crate::models::RentableListing;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

const API_KEY_HEADER: &str = "X-TYPESENSE-API-KEY";

#[derive(Debug, Deserialize)]
struct Hit {
    document: RentableListing,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    found: u64,
    #[serde(default)]
    hits: Vec<Hit>,
}

/// Unwrap hit documents from a raw search response body
fn unwrap_hits(body: serde_json::Value) -> Result<Vec<RentableListing>> {
    let response: SearchResponse = serde_json::from_value(body)?;
    debug!("Index reported {} matching documents", response.found);
    Ok(response.hits.into_iter().map(|hit| hit.document).collect())
}

/// HTTP client for a Typesense collection
pub struct TypesenseClient {
    client: Client,
    base_url: Url,
    api_key: String,
    collection: String,
}

impl TypesenseClient {
    pub fn new(base_url: Url, api_key: impl Into<String>, collection: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(2))
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            base_url,
            api_key: api_key.into(),
            collection: collection.into(),
        })
    }

    fn documents_url(&self, suffix: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AdminError::Config(format!("invalid search base url: {}", self.base_url)))?
            .pop_if_empty()
            .extend(["collections", self.collection.as_str(), "documents"])
            .extend(suffix);
        Ok(url)
    }

    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        warn!("Search index returned status {}: {}", status, body);
        Err(AdminError::Backend(format!("search index returned {status}: {body}")))
    }
}

#[async_trait]
impl SearchIndex for TypesenseClient {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<RentableListing>> {
        let url = self.documents_url(&["search"])?;
        let response = self
            .client
            .get(url)
            .header(API_KEY_HEADER, &self.api_key)
            .query(request)
            .send()
            .await?;

        let body = Self::ensure_success(response).await?.json().await?;
        unwrap_hits(body)
    }

    async fn delete_document(&self, id: &str) -> Result<()> {
        let url = self.documents_url(&[id])?;
        let response = self
            .client
            .delete(url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!("Document {} already absent from index", id);
            return Ok(());
        }
        Self::ensure_success(response).await?;
        Ok(())
    }
}

#[async_trait]
impl IndexWriter for TypesenseClient {
    async fn upsert(&self, listing: &RentableListing) -> Result<()> {
        let mut url = self.documents_url(&[])?;
        url.query_pairs_mut().append_pair("action", "upsert");

        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(listing)
            .send()
            .await?;

        Self::ensure_success(response).await?;
        Ok(())
    }

    fn writer_name(&self) -> &'static str {
        "typesense"
    }
}

/// Upserts through the backend's passthrough mutation
pub struct GraphqlIndexWriter {
    transport: Arc<dyn GraphqlTransport>,
}

impl GraphqlIndexWriter {
    pub fn new(transport: Arc<dyn GraphqlTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl IndexWriter for GraphqlIndexWriter {
    async fn upsert(&self, listing: &RentableListing) -> Result<()> {
        let request = GraphqlRequest::new(documents::ADD_CAR_TO_TYPESENSE, json!({ "car": listing }));
        self.transport.execute(request).await?;
        Ok(())
    }

    fn writer_name(&self) -> &'static str {
        "graphql"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphql::fake::FakeTransport;

    #[test]
    fn hits_are_unwrapped_in_order() {
        let body = json!({
            "found": 2,
            "hits": [
                { "document": { "id": "b", "pricePerDay": 20.0, "availableQuantity": 1,
                    "car": { "name": "Fiesta", "manufacturer": { "name": "Ford" } } },
                  "highlights": [] },
                { "document": { "id": "a", "pricePerDay": 35.0, "availableQuantity": 4,
                    "car": { "name": "Golf", "manufacturer": { "name": "Volkswagen" } } },
                  "text_match": 100 }
            ]
        });

        let listings = unwrap_hits(body).unwrap();
        let ids: Vec<_> = listings.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(listings[1].car.manufacturer.name, "Volkswagen");
    }

    #[test]
    fn hits_with_text_seats_still_decode() {
        let body = json!({
            "found": 1,
            "hits": [
                { "document": { "id": "c", "pricePerDay": 55.0, "availableQuantity": 2,
                    "car": { "name": "Sharan", "numberOfSeats": "7", "year": "2019",
                        "manufacturer": { "name": "Volkswagen" } } } }
            ]
        });

        let listings = unwrap_hits(body).unwrap();
        assert_eq!(listings[0].car.number_of_seats, 7);
        assert_eq!(listings[0].car.year, Some(2019));
    }

    #[test]
    fn missing_hits_means_no_results() {
        assert!(unwrap_hits(json!({ "found": 0 })).unwrap().is_empty());
    }

    #[test]
    fn documents_url_targets_collection() {
        let client =
            TypesenseClient::new(Url::parse("https://search.example.com/").unwrap(), "key", "cars")
                .unwrap();
        assert_eq!(
            client.documents_url(&["search"]).unwrap().as_str(),
            "https://search.example.com/collections/cars/documents/search"
        );
        assert_eq!(
            client.documents_url(&["r/1"]).unwrap().as_str(),
            "https://search.example.com/collections/cars/documents/r%2F1"
        );
    }

    #[tokio::test]
    async fn graphql_writer_sends_listing_as_car_variable() {
        let transport = Arc::new(FakeTransport::default().respond(json!({ "addCarToTypesense": true })));
        let writer = GraphqlIndexWriter::new(transport.clone());
        let listing: RentableListing = serde_json::from_value(json!({
            "id": "r1", "pricePerDay": 10.0, "availableQuantity": 1,
            "car": { "name": "Polo", "manufacturer": { "name": "Volkswagen" } }
        }))
        .unwrap();

        writer.upsert(&listing).await.unwrap();

        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].query, documents::ADD_CAR_TO_TYPESENSE);
        assert_eq!(sent[0].variables["car"]["id"], "r1");
        assert_eq!(sent[0].variables["car"]["car"]["name"], "Polo");
    }
}
