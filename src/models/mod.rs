mod listing;

pub use listing::{ListingCar, ListingManufacturer, RentableListing};

use serde::{de, Deserialize, Deserializer, Serialize};
use std::{fmt::Display, str::FromStr};

/// GraphQL sends `null` for unset fields; treat it like a missing one
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText<T> {
    Number(T),
    Text(String),
}

/// Form inputs reach the backend as text, so seats and year may arrive as
/// `5` or `"5"`; blank text counts as unset
fn optional_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Deserialize<'de>,
    T::Err: Display,
{
    match Option::<NumberOrText<T>>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Number(n)) => Ok(Some(n)),
        Some(NumberOrText::Text(text)) => match text.trim() {
            "" => Ok(None),
            trimmed => trimmed.parse().map(Some).map_err(de::Error::custom),
        },
    }
}

fn string_or_number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + FromStr + Deserialize<'de>,
    T::Err: Display,
{
    Ok(optional_number(deserializer)?.unwrap_or_default())
}

/// Car manufacturer as stored by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Manufacturer {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
}

/// Catalog entry for a car model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, rename = "type", deserialize_with = "null_as_default")]
    pub car_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub transmission_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fuel_type: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub number_of_seats: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub quantity: u32,
    #[serde(default)]
    pub primary_image_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub secondary_images_urls: Vec<String>,
    #[serde(default, deserialize_with = "optional_number")]
    pub year: Option<i32>,
    #[serde(default)]
    pub manufacturer: Option<Manufacturer>,
}

/// A car made available for booking at a price and quantity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RentableCar {
    pub id: String,
    #[serde(default)]
    pub car_id: Option<String>,
    pub price_per_day: f64,
    pub available_quantity: u32,
    pub car: Car,
}

/// Rentable record as returned by add/update mutations, without the nested car
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RentableSummary {
    pub id: String,
    #[serde(default)]
    pub car_id: Option<String>,
    pub price_per_day: f64,
    pub available_quantity: u32,
}

/// Booking status; anything the backend does not call `delivered` is pending
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    Delivered,
    Pending,
}

impl BookingStatus {
    pub fn from_raw(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("delivered") {
            BookingStatus::Delivered
        } else {
            BookingStatus::Pending
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BookingStatus::Delivered => "Delivered",
            BookingStatus::Pending => "Pending",
        }
    }
}

/// Manufacturer name only, as nested in booking payloads
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ManufacturerName {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookedCar {
    pub name: String,
    pub manufacturer: ManufacturerName,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookedRentable {
    pub id: String,
    pub price_per_day: f64,
    pub available_quantity: u32,
    pub car: BookedCar,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingUser {
    pub id: String,
}

/// Customer booking of a rentable car
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    #[serde(default)]
    pub car_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    pub pick_up_date: String,
    #[serde(default)]
    pub pick_up_time: Option<String>,
    pub drop_off_date: String,
    #[serde(default)]
    pub drop_off_time: Option<String>,
    #[serde(default)]
    pub pick_up_location: Option<String>,
    #[serde(default)]
    pub drop_off_location: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    pub total_price: f64,
    pub status: String,
    #[serde(default)]
    pub rentable: Option<BookedRentable>,
    #[serde(default)]
    pub user: Option<BookingUser>,
}

impl Booking {
    pub fn status(&self) -> BookingStatus {
        BookingStatus::from_raw(&self.status)
    }
}

/// Booking after a delivery update
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeliveredBooking {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub delivery_date: Option<String>,
}

/// One page of the car catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CarPage {
    pub cars: Vec<Car>,
    pub total: u64,
    pub has_more: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ManufacturerPage {
    pub manufacturers: Vec<Manufacturer>,
    pub total_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RentablePage {
    pub rentable_cars: Vec<RentableCar>,
    pub total_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingPage {
    pub bookings: Vec<Booking>,
    pub total_count: u64,
}

/// Exported report as returned by the backend (base64 payload)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportedFile {
    pub buffer: String,
    pub filename: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Admin {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub email: String,
}
