use super::{null_as_default, optional_number, string_or_number, RentableCar};
use serde::{Deserialize, Serialize};

/// Manufacturer fields carried into the search index
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListingManufacturer {
    pub name: String,
}

/// Car fields carried into the search index
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListingCar {
    pub name: String,
    #[serde(default, rename = "type", deserialize_with = "null_as_default")]
    pub car_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub transmission_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fuel_type: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub number_of_seats: u32,
    #[serde(default, deserialize_with = "optional_number")]
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub primary_image_url: Option<String>,
    pub manufacturer: ListingManufacturer,
}

/// Search index document for one rentable car.
///
/// Keyed by the rentable car id, so repeated upserts of the same record
/// overwrite each other.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RentableListing {
    pub id: String,
    pub price_per_day: f64,
    #[serde(default)]
    pub available_quantity: u32,
    pub car: ListingCar,
}

impl From<&RentableCar> for RentableListing {
    fn from(rentable: &RentableCar) -> Self {
        let car = &rentable.car;
        Self {
            id: rentable.id.clone(),
            price_per_day: rentable.price_per_day,
            available_quantity: rentable.available_quantity,
            car: ListingCar {
                name: car.name.clone(),
                car_type: car.car_type.clone(),
                transmission_type: car.transmission_type.clone(),
                fuel_type: car.fuel_type.clone(),
                number_of_seats: car.number_of_seats,
                year: car.year,
                description: car.description.clone(),
                primary_image_url: car.primary_image_url.clone(),
                manufacturer: ListingManufacturer {
                    name: car
                        .manufacturer
                        .as_ref()
                        .map(|m| m.name.clone())
                        .unwrap_or_default(),
                },
            },
        }
    }
}
