use super::types::{NewCar, Pagination};
use super::{expect_deleted, AdminApi};
use crate::error::{AdminError, Result};
use crate::graphql::{decode_field, documents, GraphqlRequest, UploadFile};
use crate::models::{Car, CarPage};
use serde_json::json;
use std::path::Path;
use tracing::info;

impl AdminApi {
    pub async fn list_cars(&self, page: Pagination) -> Result<CarPage> {
        let data = self.execute(documents::GET_CARS, page.to_variables()).await?;
        decode_field(data, "getCars")
    }

    pub async fn get_car(&self, id: &str) -> Result<Car> {
        let data = self
            .execute(documents::GET_CAR_BY_ID, json!({ "id": id }))
            .await?;
        decode_field(data, "getCarById")
    }

    /// Create a car, uploading its primary and secondary images
    pub async fn add_car(&self, input: &NewCar) -> Result<Car> {
        input.validate()?;

        let mut files = Vec::with_capacity(1 + input.secondary_images.len());
        if let Some(primary) = &input.primary_image {
            files.push(UploadFile::from_path(primary, "variables.primaryImage").await?);
        }
        for (index, path) in input.secondary_images.iter().enumerate() {
            files.push(UploadFile::from_path(path, format!("variables.secondaryImages.{index}")).await?);
        }

        let request = GraphqlRequest::new(documents::ADD_CAR, input.to_variables());
        let data = self.transport.upload(request, files).await?;
        let car: Car = decode_field(data, "addCar")?;
        info!("Car {} has been added successfully", car.name);
        Ok(car)
    }

    /// Bulk-create cars from a spreadsheet
    pub async fn import_cars(&self, spreadsheet: &Path) -> Result<Vec<Car>> {
        if !spreadsheet.is_file() {
            return Err(AdminError::Validation(format!(
                "Please select an Excel file to upload ({} not found)",
                spreadsheet.display()
            )));
        }

        let file = UploadFile::from_path(spreadsheet, "variables.excelFile").await?;
        let request = GraphqlRequest::new(documents::ADD_CAR_BY_EXCEL, json!({}));
        let data = self.transport.upload(request, vec![file]).await?;
        let cars: Vec<Car> = decode_field(data, "addCarByExcel")?;
        info!("Imported {} cars from {}", cars.len(), spreadsheet.display());
        Ok(cars)
    }

    pub async fn delete_car(&self, id: &str) -> Result<()> {
        let data = self.execute(documents::DELETE_CAR, json!({ "id": id })).await?;
        expect_deleted(data, "deleteCar", "car")?;
        info!("Car {} deleted", id);
        Ok(())
    }
}
