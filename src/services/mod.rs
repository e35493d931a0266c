pub mod auth;
pub mod bookings;
pub mod cars;
pub mod manufacturers;
pub mod rentable;
pub mod types;

pub use types::{
    BookingFilters, ExportFormat, ManufacturerUpdate, NewCar, NewManufacturer, NewRentable,
    Pagination, RentableUpdate,
};

use crate::error::{AdminError, Result};
use crate::graphql::{GraphqlRequest, GraphqlTransport};
use serde_json::Value;
use std::sync::Arc;

/// Typed access to the rental backend's GraphQL API
#[derive(Clone)]
pub struct AdminApi {
    transport: Arc<dyn GraphqlTransport>,
}

impl AdminApi {
    pub fn new(transport: Arc<dyn GraphqlTransport>) -> Self {
        Self { transport }
    }

    async fn execute(&self, query: &'static str, variables: Value) -> Result<Value> {
        self.transport.execute(GraphqlRequest::new(query, variables)).await
    }
}

/// Delete mutations answer with a bare boolean
fn expect_deleted(data: Value, field: &str, what: &str) -> Result<()> {
    match data.get(field) {
        Some(Value::Bool(true)) => Ok(()),
        Some(Value::Bool(false)) => Err(AdminError::Backend(format!("Failed to delete {what}"))),
        _ => Err(AdminError::Decode(format!("missing field `{field}` in response"))),
    }
}
