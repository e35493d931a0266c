pub mod documents;
mod upload;

pub use upload::UploadFile;

use crate::error::{AdminError, Result};
use crate::session::Session;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// One query or mutation with its variables
#[derive(Debug, Clone, PartialEq)]
pub struct GraphqlRequest {
    pub query: &'static str,
    pub variables: Value,
    pub bearer: Option<String>,
}

impl GraphqlRequest {
    pub fn new(query: &'static str, variables: Value) -> Self {
        Self {
            query,
            variables,
            bearer: None,
        }
    }

    /// Attach the session token; fails before anything is sent if it expired
    pub fn authorized(mut self, session: &Session) -> Result<Self> {
        self.bearer = Some(session.bearer()?.to_string());
        Ok(self)
    }
}

/// The GraphQL API as seen by the services
#[async_trait]
pub trait GraphqlTransport: Send + Sync {
    /// Run a request and return its `data` object
    async fn execute(&self, request: GraphqlRequest) -> Result<Value>;

    /// Run a request whose variables include file uploads
    async fn upload(&self, request: GraphqlRequest, files: Vec<UploadFile>) -> Result<Value>;
}

/// Business result wrapper used by booking endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusEnvelope<T> {
    pub status: bool,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

impl<T> StatusEnvelope<T> {
    /// A successful envelope may still carry no data
    pub fn into_result(self) -> Result<Option<T>> {
        if self.status {
            Ok(self.data)
        } else {
            Err(AdminError::Backend(self.message))
        }
    }
}

/// Pull `data.<field>` out of a response and decode it
pub fn decode_field<T: DeserializeOwned>(mut data: Value, field: &str) -> Result<T> {
    let value = data
        .get_mut(field)
        .map(Value::take)
        .ok_or_else(|| AdminError::Decode(format!("missing field `{field}` in response")))?;
    Ok(serde_json::from_value(value)?)
}

/// Split a raw GraphQL response into its data or its first errors
pub fn parse_response(mut body: Value) -> Result<Value> {
    if let Some(errors) = body.get("errors").and_then(Value::as_array) {
        if !errors.is_empty() {
            let messages: Vec<&str> = errors
                .iter()
                .filter_map(|e| e.get("message").and_then(Value::as_str))
                .collect();
            let message = if messages.is_empty() {
                "unknown error".to_string()
            } else {
                messages.join("; ")
            };
            return Err(AdminError::Graphql(message));
        }
    }

    match body.get_mut("data").map(Value::take) {
        Some(data) if !data.is_null() => Ok(data),
        _ => Err(AdminError::Decode("response has no data".to_string())),
    }
}

/// HTTP implementation of [`GraphqlTransport`]
pub struct GraphqlClient {
    client: Client,
    endpoint: Url,
}

impl GraphqlClient {
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("rental-admin/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, endpoint })
    }

    fn post(&self, bearer: Option<&str>) -> reqwest::RequestBuilder {
        let builder = self.client.post(self.endpoint.clone());
        match bearer {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn read(response: reqwest::Response) -> Result<Value> {
        let status = response.status();
        let body: Value = response.json().await?;
        if !status.is_success() {
            warn!("GraphQL endpoint returned status: {}", status);
        }
        parse_response(body)
    }
}

#[async_trait]
impl GraphqlTransport for GraphqlClient {
    async fn execute(&self, request: GraphqlRequest) -> Result<Value> {
        debug!("GraphQL request: {}", first_line(request.query));

        let response = self
            .post(request.bearer.as_deref())
            .json(&serde_json::json!({
                "query": request.query,
                "variables": request.variables,
            }))
            .send()
            .await?;

        Self::read(response).await
    }

    async fn upload(&self, request: GraphqlRequest, files: Vec<UploadFile>) -> Result<Value> {
        debug!(
            "GraphQL upload with {} file(s): {}",
            files.len(),
            first_line(request.query)
        );

        let form = upload::multipart_form(&request, files)?;
        let response = self
            .post(request.bearer.as_deref())
            .header("apollo-require-preflight", "true")
            .multipart(form)
            .send()
            .await?;

        Self::read(response).await
    }
}

fn first_line(query: &str) -> &str {
    query
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("")
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration as ChronoDuration, Utc};
    use serde_json::json;

    #[test]
    fn errors_array_wins_over_data() {
        let body = json!({
            "data": null,
            "errors": [{ "message": "Unauthorized" }, { "message": "Try again" }]
        });
        match parse_response(body) {
            Err(AdminError::Graphql(msg)) => assert_eq!(msg, "Unauthorized; Try again"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn empty_errors_array_is_ignored() {
        let body = json!({ "data": { "ok": true }, "errors": [] });
        assert_eq!(parse_response(body).unwrap(), json!({ "ok": true }));
    }

    #[test]
    fn null_data_is_a_decode_error() {
        assert!(matches!(
            parse_response(json!({ "data": null })),
            Err(AdminError::Decode(_))
        ));
    }

    #[test]
    fn failed_envelope_carries_backend_message() {
        let envelope: StatusEnvelope<Value> =
            serde_json::from_value(json!({ "status": false, "message": "Booking not found" }))
                .unwrap();
        match envelope.into_result() {
            Err(AdminError::Backend(msg)) => assert_eq!(msg, "Booking not found"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn decode_field_reports_missing_field() {
        let result: Result<u32> = decode_field(json!({ "other": 1 }), "count");
        assert!(matches!(result, Err(AdminError::Decode(_))));
    }

    #[test]
    fn expired_session_blocks_authorization() {
        let session = Session::new("tok", None, Utc::now() - ChronoDuration::hours(3));
        let request = GraphqlRequest::new(documents::FETCH_ALL_BOOKINGS, Value::Null);
        assert!(matches!(
            request.authorized(&session),
            Err(AdminError::SessionExpired)
        ));
    }

    #[test]
    fn first_line_skips_blank_lines() {
        assert_eq!(first_line("\n   query GetCars {\n  x\n}"), "query GetCars {");
    }
}
