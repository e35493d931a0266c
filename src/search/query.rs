use super::types::SearchCriteria;
use crate::error::{AdminError, Result};
use serde::Serialize;

/// Bounds of the price guard applied to every search
pub const GUARD_MIN_PRICE: f64 = 1.0;
pub const GUARD_MAX_PRICE: f64 = 2000.0;

/// Fields the free-text query is matched against
pub const QUERY_BY: &str =
    "car.name,car.manufacturer.name,car.transmissionType,car.fuelType,car.type";

const PRICE_FIELD: &str = "pricePerDay";

/// A search request in the index's query-parameter form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRequest {
    pub q: String,
    pub query_by: String,
    pub filter_by: String,
    pub sort_by: String,
}

impl SearchRequest {
    pub fn from_criteria(criteria: &SearchCriteria) -> Result<Self> {
        let q = match criteria.query.trim() {
            "" => "*".to_string(),
            text => text.to_string(),
        };

        Ok(Self {
            q,
            query_by: QUERY_BY.to_string(),
            filter_by: filter_expression(criteria)?,
            sort_by: format!("{}:{}", PRICE_FIELD, criteria.sort.as_str()),
        })
    }
}

pub fn guard_predicate() -> String {
    price_range(GUARD_MIN_PRICE, GUARD_MAX_PRICE)
}

/// Conjunction of the guard with every active filter
pub fn filter_expression(criteria: &SearchCriteria) -> Result<String> {
    let mut filters = vec![guard_predicate()];

    let exact = [
        ("car.type", &criteria.car_type),
        ("car.transmissionType", &criteria.transmission_type),
        ("car.fuelType", &criteria.fuel_type),
        ("car.numberOfSeats", &criteria.number_of_seats),
    ];
    for (field, value) in exact {
        if let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            filters.push(format!("{}:={}", field, filter_value(value)));
        }
    }

    if criteria.min_price.is_some() || criteria.max_price.is_some() {
        let min = criteria.min_price.unwrap_or(GUARD_MIN_PRICE);
        let max = criteria.max_price.unwrap_or(GUARD_MAX_PRICE);
        if !min.is_finite() || !max.is_finite() {
            return Err(AdminError::Validation("price range must be a number".to_string()));
        }
        if min > max {
            return Err(AdminError::Validation(format!(
                "minimum price {min} is above maximum price {max}"
            )));
        }
        filters.push(price_range(min, max));
    }

    Ok(filters.join(" && "))
}

fn price_range(min: f64, max: f64) -> String {
    format!("{}:[{}..{}]", PRICE_FIELD, min, max)
}

// Values containing filter syntax must be backtick-quoted
fn filter_value(value: &str) -> String {
    let needs_quoting = value
        .chars()
        .any(|c| matches!(c, ',' | '(' | ')' | '[' | ']' | '&' | '|' | ':' | '`'));
    if needs_quoting {
        format!("`{}`", value.replace('`', ""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::types::SortDirection;

    #[test]
    fn no_filters_yields_guard_alone() {
        let expr = filter_expression(&SearchCriteria::default()).unwrap();
        assert_eq!(expr, "pricePerDay:[1..2000]");
        assert_eq!(expr, guard_predicate());
    }

    #[test]
    fn toyota_automatic_descending() {
        let criteria = SearchCriteria {
            query: "Toyota".to_string(),
            transmission_type: Some("Automatic".to_string()),
            sort: SortDirection::Desc,
            ..SearchCriteria::default()
        };

        let request = SearchRequest::from_criteria(&criteria).unwrap();

        assert_eq!(request.q, "Toyota");
        assert_eq!(
            request.filter_by,
            "pricePerDay:[1..2000] && car.transmissionType:=Automatic"
        );
        assert_eq!(request.sort_by, "pricePerDay:desc");
        assert_eq!(
            request.query_by.split(',').collect::<Vec<_>>(),
            vec![
                "car.name",
                "car.manufacturer.name",
                "car.transmissionType",
                "car.fuelType",
                "car.type"
            ]
        );
    }

    #[test]
    fn guard_is_present_for_every_filter_combination() {
        let options = [None, Some("x".to_string()), Some(String::new())];
        for car_type in &options {
            for transmission in &options {
                for fuel in &options {
                    for seats in &options {
                        for range in [None, Some((50.0, 300.0))] {
                            let criteria = SearchCriteria {
                                car_type: car_type.clone(),
                                transmission_type: transmission.clone(),
                                fuel_type: fuel.clone(),
                                number_of_seats: seats.clone(),
                                min_price: range.map(|r| r.0),
                                max_price: range.map(|r| r.1),
                                ..SearchCriteria::default()
                            };
                            let expr = filter_expression(&criteria).unwrap();
                            assert!(expr.starts_with("pricePerDay:[1..2000]"));
                            assert!(!expr.contains("||"));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn all_filters_are_conjoined_in_order() {
        let criteria = SearchCriteria {
            car_type: Some("SUV".to_string()),
            transmission_type: Some("Manual".to_string()),
            fuel_type: Some("Diesel".to_string()),
            number_of_seats: Some("7".to_string()),
            ..SearchCriteria::default()
        };
        assert_eq!(
            filter_expression(&criteria).unwrap(),
            "pricePerDay:[1..2000] && car.type:=SUV && car.transmissionType:=Manual \
             && car.fuelType:=Diesel && car.numberOfSeats:=7"
        );
    }

    #[test]
    fn blank_filters_are_skipped() {
        let criteria = SearchCriteria {
            fuel_type: Some("   ".to_string()),
            ..SearchCriteria::default()
        };
        assert_eq!(filter_expression(&criteria).unwrap(), guard_predicate());
    }

    #[test]
    fn user_range_is_added_next_to_guard() {
        let criteria = SearchCriteria {
            min_price: Some(40.0),
            ..SearchCriteria::default()
        };
        assert_eq!(
            filter_expression(&criteria).unwrap(),
            "pricePerDay:[1..2000] && pricePerDay:[40..2000]"
        );
    }

    #[test]
    fn inverted_range_is_rejected() {
        let criteria = SearchCriteria {
            min_price: Some(500.0),
            max_price: Some(100.0),
            ..SearchCriteria::default()
        };
        assert!(matches!(
            filter_expression(&criteria),
            Err(AdminError::Validation(_))
        ));
    }

    #[test]
    fn non_finite_bounds_are_rejected() {
        for (min, max) in [
            (Some(f64::NAN), None),
            (None, Some(f64::NAN)),
            (Some(10.0), Some(f64::INFINITY)),
        ] {
            let criteria = SearchCriteria {
                min_price: min,
                max_price: max,
                ..SearchCriteria::default()
            };
            assert!(matches!(
                filter_expression(&criteria),
                Err(AdminError::Validation(_))
            ));
        }
    }

    #[test]
    fn values_with_filter_syntax_are_quoted() {
        let criteria = SearchCriteria {
            car_type: Some("Coupe, 2-door".to_string()),
            ..SearchCriteria::default()
        };
        assert!(filter_expression(&criteria)
            .unwrap()
            .ends_with("car.type:=`Coupe, 2-door`"));
    }

    #[test]
    fn empty_query_becomes_wildcard_and_sort_defaults_ascending() {
        let request = SearchRequest::from_criteria(&SearchCriteria::new("  ")).unwrap();
        assert_eq!(request.q, "*");
        assert_eq!(request.sort_by, "pricePerDay:asc");
    }
}
