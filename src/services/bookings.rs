use super::types::{BookingFilters, ExportFormat, Pagination};
use super::AdminApi;
use crate::error::{AdminError, Result};
use crate::graphql::{decode_field, documents, GraphqlRequest, StatusEnvelope};
use crate::models::{Booking, BookingPage, DeliveredBooking, ExportedFile};
use crate::session::Session;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeliveryResponse {
    status: bool,
    #[serde(default)]
    message: String,
    updated_booking: Option<DeliveredBooking>,
}

impl AdminApi {
    async fn execute_as(&self, session: &Session, query: &'static str, variables: Value) -> Result<Value> {
        let request = GraphqlRequest::new(query, variables).authorized(session)?;
        self.transport.execute(request).await
    }

    pub async fn list_bookings(&self, session: &Session, filters: &BookingFilters) -> Result<Vec<Booking>> {
        let variables = if filters.is_empty() {
            json!({})
        } else {
            json!({ "filters": filters })
        };
        let data = self
            .execute_as(session, documents::FETCH_ALL_BOOKINGS, variables)
            .await?;
        let envelope: StatusEnvelope<Vec<Booking>> = decode_field(data, "fetchAllBookings")?;
        Ok(envelope.into_result()?.unwrap_or_default())
    }

    pub async fn bookings_page(&self, session: &Session, page: Pagination) -> Result<BookingPage> {
        let data = self
            .execute_as(session, documents::FETCH_BOOKINGS_PAGE, page.to_variables())
            .await?;
        let envelope: StatusEnvelope<BookingPage> = decode_field(data, "fetchBookingsPage")?;
        envelope.into_result()?.ok_or_else(|| AdminError::Decode("bookings page missing".to_string()))
    }

    pub async fn mark_delivered(&self, session: &Session, booking_id: &str) -> Result<DeliveredBooking> {
        let data = self
            .execute_as(session, documents::BOOKING_DELIVERY, json!({ "id": booking_id }))
            .await?;
        let response: DeliveryResponse = decode_field(data, "bookingDelivery")?;
        if !response.status {
            warn!("Booking delivery failed: {}", response.message);
            return Err(AdminError::Backend(response.message));
        }

        let booking = response
            .updated_booking
            .ok_or_else(|| AdminError::Decode("updated booking missing".to_string()))?;
        info!("Booking {} marked as {}", booking.id, booking.status);
        Ok(booking)
    }

    pub async fn export_bookings(&self, session: &Session, format: ExportFormat) -> Result<ExportedFile> {
        let (query, field) = match format {
            ExportFormat::Excel => (documents::EXPORT_BOOKINGS_EXCEL, "exportBookingsExcel"),
            ExportFormat::Pdf => (documents::EXPORT_BOOKINGS_PDF, "exportBookingsPDF"),
        };
        let data = self.execute_as(session, query, json!({})).await?;
        let envelope: StatusEnvelope<ExportedFile> = decode_field(data, field)?;
        envelope
            .into_result()?
            .ok_or_else(|| AdminError::Decode("export file missing".to_string()))
    }
}

/// Decode an exported report and write it into `dir`
pub async fn save_export(file: &ExportedFile, dir: &Path) -> Result<PathBuf> {
    let bytes = STANDARD
        .decode(file.buffer.trim())
        .map_err(|e| AdminError::Decode(format!("export buffer is not base64: {e}")))?;

    let name = Path::new(&file.filename)
        .file_name()
        .ok_or_else(|| AdminError::Decode(format!("invalid export filename: {}", file.filename)))?;
    let path = dir.join(name);

    tokio::fs::create_dir_all(dir).await?;
    tokio::fs::write(&path, bytes).await?;
    info!("Saved export to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphql::fake::FakeTransport;
    use chrono::{Duration, Utc};
    use std::sync::Arc;

    fn session() -> Session {
        Session::new("admin-token", None, Utc::now())
    }

    #[tokio::test]
    async fn bookings_are_fetched_with_bearer_token() {
        let transport = Arc::new(FakeTransport::default().respond(json!({
            "fetchAllBookings": {
                "status": true,
                "message": "ok",
                "data": [{
                    "id": "b1", "pickUpDate": "2024-05-01", "dropOffDate": "2024-05-04",
                    "totalPrice": 180.0, "status": "pending",
                    "rentable": { "id": "r1", "pricePerDay": 60.0, "availableQuantity": 2,
                                  "car": { "name": "Corolla", "manufacturer": { "name": "Toyota" } } },
                    "user": { "id": "u1" }
                }]
            }
        })));
        let api = AdminApi::new(transport.clone());

        let bookings = api
            .list_bookings(&session(), &BookingFilters::default())
            .await
            .unwrap();

        assert_eq!(bookings.len(), 1);
        assert_eq!(bookings[0].rentable.as_ref().unwrap().car.manufacturer.name, "Toyota");
        let sent = transport.sent();
        assert_eq!(sent[0].bearer.as_deref(), Some("admin-token"));
        assert_eq!(sent[0].variables, json!({}));
    }

    #[tokio::test]
    async fn filters_are_sent_when_present() {
        let transport = Arc::new(FakeTransport::default().respond(json!({
            "fetchAllBookings": { "status": true, "message": "ok", "data": [] }
        })));
        let api = AdminApi::new(transport.clone());
        let filters = BookingFilters {
            status: Some("delivered".to_string()),
            ..BookingFilters::default()
        };

        api.list_bookings(&session(), &filters).await.unwrap();
        assert_eq!(
            transport.sent()[0].variables,
            json!({ "filters": { "status": "delivered" } })
        );
    }

    #[tokio::test]
    async fn failed_status_surfaces_backend_message() {
        let transport = Arc::new(FakeTransport::default().respond(json!({
            "fetchAllBookings": { "status": false, "message": "Not authorized" }
        })));
        let api = AdminApi::new(transport);

        match api.list_bookings(&session(), &BookingFilters::default()).await {
            Err(AdminError::Backend(msg)) => assert_eq!(msg, "Not authorized"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn expired_session_never_reaches_the_backend() {
        let transport = Arc::new(FakeTransport::default());
        let api = AdminApi::new(transport.clone());
        let stale = Session::new("old", None, Utc::now() - Duration::hours(2));

        assert!(matches!(
            api.mark_delivered(&stale, "b1").await,
            Err(AdminError::SessionExpired)
        ));
        assert!(transport.sent().is_empty());
    }

    #[tokio::test]
    async fn delivery_returns_updated_booking() {
        let transport = Arc::new(FakeTransport::default().respond(json!({
            "bookingDelivery": {
                "status": true,
                "message": "Delivered",
                "updatedBooking": { "id": "b1", "status": "delivered", "deliveryDate": "2024-05-02" }
            }
        })));
        let api = AdminApi::new(transport);

        let booking = api.mark_delivered(&session(), "b1").await.unwrap();
        assert_eq!(booking.status, "delivered");
        assert_eq!(booking.delivery_date.as_deref(), Some("2024-05-02"));
    }

    #[tokio::test]
    async fn pdf_export_uses_pdf_mutation() {
        let transport = Arc::new(FakeTransport::default().respond(json!({
            "exportBookingsPDF": {
                "status": true, "message": "ok",
                "data": { "buffer": "JVBERi0=", "filename": "bookings.pdf" }
            }
        })));
        let api = AdminApi::new(transport.clone());

        let file = api.export_bookings(&session(), ExportFormat::Pdf).await.unwrap();
        assert_eq!(file.filename, "bookings.pdf");
        assert_eq!(transport.sent()[0].query, documents::EXPORT_BOOKINGS_PDF);
    }

    #[tokio::test]
    async fn save_export_decodes_buffer_and_strips_directories() {
        let dir = tempfile::tempdir().unwrap();
        let file = ExportedFile {
            buffer: STANDARD.encode(b"id,total\nb1,180\n"),
            filename: "../../bookings.xlsx".to_string(),
        };

        let path = save_export(&file, dir.path()).await.unwrap();

        assert_eq!(path, dir.path().join("bookings.xlsx"));
        assert_eq!(tokio::fs::read(&path).await.unwrap(), b"id,total\nb1,180\n");
    }

    #[tokio::test]
    async fn save_export_rejects_bad_base64() {
        let dir = tempfile::tempdir().unwrap();
        let file = ExportedFile {
            buffer: "not base64!!".to_string(),
            filename: "x.pdf".to_string(),
        };
        assert!(matches!(
            save_export(&file, dir.path()).await,
            Err(AdminError::Decode(_))
        ));
    }
}
