use crate::error::{AdminError, Result};
use clap::ValueEnum;
use serde::Serialize;
use serde_json::{json, Value};
use std::path::PathBuf;

/// Most secondary images a car may carry
pub const MAX_SECONDARY_IMAGES: usize = 3;

/// Offset/limit window for list queries
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pagination {
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

impl Pagination {
    pub fn new(offset: u32, limit: u32) -> Self {
        Self {
            offset: Some(offset),
            limit: Some(limit),
        }
    }

    pub fn to_variables(self) -> Value {
        json!({ "offset": self.offset, "limit": self.limit })
    }
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AdminError::Validation(format!("{field} is required")));
    }
    Ok(())
}

/// Input for creating a manufacturer
#[derive(Debug, Clone, Serialize)]
pub struct NewManufacturer {
    pub name: String,
    pub country: String,
}

impl NewManufacturer {
    pub fn validate(&self) -> Result<()> {
        require("Manufacturer name", &self.name)?;
        if self.country.trim().is_empty() {
            return Err(AdminError::Validation("Please select a country.".to_string()));
        }
        Ok(())
    }
}

/// Partial update of a manufacturer
#[derive(Debug, Clone, Serialize)]
pub struct ManufacturerUpdate {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl ManufacturerUpdate {
    pub fn validate(&self) -> Result<()> {
        require("Manufacturer id", &self.id)?;
        let has_change = [&self.name, &self.country]
            .iter()
            .any(|v| v.as_deref().is_some_and(|s| !s.trim().is_empty()));
        if !has_change {
            return Err(AdminError::Validation(
                "Provide a new name or country for the manufacturer.".to_string(),
            ));
        }
        Ok(())
    }
}

/// Input for creating a catalog car with its images
#[derive(Debug, Clone)]
pub struct NewCar {
    pub name: String,
    pub car_type: String,
    pub number_of_seats: u32,
    pub fuel_type: String,
    pub transmission_type: String,
    pub description: String,
    pub quantity: u32,
    pub manufacturer_id: String,
    pub primary_image: Option<PathBuf>,
    pub secondary_images: Vec<PathBuf>,
}

impl NewCar {
    pub fn validate(&self) -> Result<()> {
        require("Manufacturer", &self.manufacturer_id)?;
        require("Name", &self.name)?;
        require("Type", &self.car_type)?;
        require("Fuel type", &self.fuel_type)?;
        require("Transmission type", &self.transmission_type)?;
        require("Description", &self.description)?;
        if self.number_of_seats == 0 {
            return Err(AdminError::Validation("Number of seats must be positive".to_string()));
        }
        if self.quantity == 0 {
            return Err(AdminError::Validation("Quantity must be positive".to_string()));
        }
        if self.primary_image.is_none() || self.secondary_images.is_empty() {
            return Err(AdminError::Validation(
                "Please upload a primary image and at least one secondary image.".to_string(),
            ));
        }
        if self.secondary_images.len() > MAX_SECONDARY_IMAGES {
            return Err(AdminError::Validation(format!(
                "You can only upload up to {MAX_SECONDARY_IMAGES} secondary images."
            )));
        }
        Ok(())
    }

    /// Variables without the image uploads
    pub fn to_variables(&self) -> Value {
        json!({
            "name": self.name,
            "type": self.car_type,
            "numberOfSeats": self.number_of_seats,
            "fuelType": self.fuel_type,
            "transmissionType": self.transmission_type,
            "description": self.description,
            "quantity": self.quantity,
            "manufacturerId": self.manufacturer_id,
        })
    }
}

/// Input for making a catalog car rentable
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRentable {
    pub car_id: String,
    pub price_per_day: f64,
    pub available_quantity: u32,
}

impl NewRentable {
    pub fn validate(&self) -> Result<()> {
        require("Car id", &self.car_id)?;
        validate_price_and_quantity(self.price_per_day, self.available_quantity)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentableUpdate {
    pub price_per_day: f64,
    pub available_quantity: u32,
}

impl RentableUpdate {
    pub fn validate(&self) -> Result<()> {
        validate_price_and_quantity(self.price_per_day, self.available_quantity)
    }
}

fn validate_price_and_quantity(price_per_day: f64, available_quantity: u32) -> Result<()> {
    if !(price_per_day.is_finite() && price_per_day > 0.0) || available_quantity == 0 {
        return Err(AdminError::Validation(
            "Please provide both price per day and available quantity.".to_string(),
        ));
    }
    Ok(())
}

/// Optional filters for the bookings list
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl BookingFilters {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.start_date.is_none() && self.end_date.is_none()
    }
}

/// Report format for booking exports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Excel,
    Pdf,
}
