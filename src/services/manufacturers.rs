use super::types::{ManufacturerUpdate, NewManufacturer, Pagination};
use super::{expect_deleted, AdminApi};
use crate::error::Result;
use crate::graphql::{decode_field, documents};
use crate::models::{Manufacturer, ManufacturerPage};
use serde_json::json;
use tracing::info;

impl AdminApi {
    pub async fn list_manufacturers(&self, page: Pagination) -> Result<ManufacturerPage> {
        let data = self
            .execute(documents::GET_MANUFACTURERS, page.to_variables())
            .await?;
        decode_field(data, "getManufacturers")
    }

    pub async fn add_manufacturer(&self, input: &NewManufacturer) -> Result<Manufacturer> {
        input.validate()?;
        let data = self
            .execute(documents::ADD_MANUFACTURER, serde_json::to_value(input)?)
            .await?;
        let created: Manufacturer = decode_field(data, "addManufacturer")?;
        info!("Manufacturer {} added", created.name);
        Ok(created)
    }

    pub async fn edit_manufacturer(&self, update: &ManufacturerUpdate) -> Result<Manufacturer> {
        update.validate()?;
        let data = self
            .execute(documents::EDIT_MANUFACTURER, serde_json::to_value(update)?)
            .await?;
        decode_field(data, "editManufacturer")
    }

    pub async fn delete_manufacturer(&self, id: &str) -> Result<()> {
        let data = self
            .execute(documents::DELETE_MANUFACTURER, json!({ "id": id }))
            .await?;
        expect_deleted(data, "deleteManufacturer", "manufacturer")?;
        info!("Manufacturer {} deleted", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AdminError;
    use crate::graphql::fake::FakeTransport;
    use std::sync::Arc;

    #[tokio::test]
    async fn list_passes_pagination_and_decodes_page() {
        let transport = Arc::new(FakeTransport::default().respond(json!({
            "getManufacturers": {
                "manufacturers": [
                    { "id": "m1", "name": "Toyota", "country": "Japan" },
                    { "id": "m2", "name": "Volvo", "country": "Sweden" }
                ],
                "totalCount": 12
            }
        })));
        let api = AdminApi::new(transport.clone());

        let page = api.list_manufacturers(Pagination::new(0, 2)).await.unwrap();

        assert_eq!(page.total_count, 12);
        assert_eq!(page.manufacturers[1].name, "Volvo");
        assert_eq!(transport.sent()[0].variables, json!({ "offset": 0, "limit": 2 }));
    }

    #[tokio::test]
    async fn edit_omits_unchanged_fields() {
        let transport = Arc::new(FakeTransport::default().respond(json!({
            "editManufacturer": { "id": "m1", "name": "Toyota Motor", "country": "Japan" }
        })));
        let api = AdminApi::new(transport.clone());

        let update = ManufacturerUpdate {
            id: "m1".to_string(),
            name: Some("Toyota Motor".to_string()),
            country: None,
        };
        api.edit_manufacturer(&update).await.unwrap();

        assert_eq!(
            transport.sent()[0].variables,
            json!({ "id": "m1", "name": "Toyota Motor" })
        );
    }

    #[tokio::test]
    async fn delete_reporting_false_is_a_backend_error() {
        let transport =
            Arc::new(FakeTransport::default().respond(json!({ "deleteManufacturer": false })));
        let api = AdminApi::new(transport);

        assert!(matches!(
            api.delete_manufacturer("m1").await,
            Err(AdminError::Backend(_))
        ));
    }
}
