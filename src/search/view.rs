use crate::models::{RentableCar, RentableListing, RentablePage};

/// One display row, whichever source it came from
#[derive(Debug, Clone, PartialEq)]
pub struct ListingRow {
    pub id: String,
    pub name: String,
    pub manufacturer: String,
    pub price_per_day: f64,
    pub available_quantity: u32,
    pub image_url: Option<String>,
}

impl From<&RentableCar> for ListingRow {
    fn from(rentable: &RentableCar) -> Self {
        Self {
            id: rentable.id.clone(),
            name: rentable.car.name.clone(),
            manufacturer: rentable
                .car
                .manufacturer
                .as_ref()
                .map(|m| m.name.clone())
                .unwrap_or_default(),
            price_per_day: rentable.price_per_day,
            available_quantity: rentable.available_quantity,
            image_url: rentable.car.primary_image_url.clone(),
        }
    }
}

impl From<&RentableListing> for ListingRow {
    fn from(listing: &RentableListing) -> Self {
        Self {
            id: listing.id.clone(),
            name: listing.car.name.clone(),
            manufacturer: listing.car.manufacturer.name.clone(),
            price_per_day: listing.price_per_day,
            available_quantity: listing.available_quantity,
            image_url: listing.car.primary_image_url.clone(),
        }
    }
}

/// What the rentable list shows: the browse page or the last search's hits
#[derive(Debug, Clone, PartialEq)]
pub enum ListingView {
    Browsing(RentablePage),
    Searching(Vec<RentableListing>),
}

impl ListingView {
    /// Search hits override the browse page only when there is at least one
    pub fn select(page: RentablePage, last_search: Option<Vec<RentableListing>>) -> Self {
        match last_search {
            Some(hits) if !hits.is_empty() => ListingView::Searching(hits),
            _ => ListingView::Browsing(page),
        }
    }

    pub fn is_searching(&self) -> bool {
        matches!(self, ListingView::Searching(_))
    }

    pub fn rows(&self) -> Vec<ListingRow> {
        match self {
            ListingView::Browsing(page) => page.rentable_cars.iter().map(ListingRow::from).collect(),
            ListingView::Searching(hits) => hits.iter().map(ListingRow::from).collect(),
        }
    }
}
