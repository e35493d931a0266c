use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Price sort order for search results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Search parameters for rentable listings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchCriteria {
    /// Free text, matched against name, manufacturer, transmission, fuel and type
    pub query: String,
    /// Body type, e.g. "SUV"
    pub car_type: Option<String>,
    pub transmission_type: Option<String>,
    pub fuel_type: Option<String>,
    pub number_of_seats: Option<String>,
    /// Lower price bound per day
    pub min_price: Option<f64>,
    /// Upper price bound per day
    pub max_price: Option<f64>,
    pub sort: SortDirection,
}

impl SearchCriteria {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }
}
