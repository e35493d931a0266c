use crate::models::{Car, Manufacturer};
use std::collections::BTreeMap;

/// A labelled total with its per-bucket counts
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardCard {
    pub title: &'static str,
    pub total: usize,
    pub buckets: BTreeMap<String, usize>,
}

/// Fleet overview built from the catalog and manufacturer lists
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub cards: Vec<DashboardCard>,
}

impl Dashboard {
    pub fn build(manufacturers: &[Manufacturer], cars: &[Car]) -> Self {
        let per_manufacturer = manufacturers
            .iter()
            .map(|m| {
                let count = cars
                    .iter()
                    .filter(|c| c.manufacturer.as_ref().is_some_and(|cm| cm.name == m.name))
                    .count();
                (m.name.clone(), count)
            })
            .collect();

        let booked: Vec<&Car> = cars.iter().filter(|c| c.quantity > 0).collect();

        Self {
            cards: vec![
                DashboardCard {
                    title: "Available Car Manufacturers",
                    total: manufacturers.len(),
                    buckets: per_manufacturer,
                },
                DashboardCard {
                    title: "Available Car Types",
                    total: cars.len(),
                    buckets: count_by(cars.iter(), |c| &c.car_type),
                },
                DashboardCard {
                    title: "Fuel Types",
                    total: cars.len(),
                    buckets: count_by(cars.iter(), |c| &c.fuel_type),
                },
                DashboardCard {
                    title: "Booked Cars",
                    total: booked.len(),
                    buckets: count_by(booked.into_iter(), |c| &c.car_type),
                },
            ],
        }
    }
}

fn count_by<'a, I, F>(cars: I, key: F) -> BTreeMap<String, usize>
where
    I: Iterator<Item = &'a Car>,
    F: Fn(&'a Car) -> &'a String,
{
    let mut buckets = BTreeMap::new();
    for car in cars {
        *buckets.entry(key(car).clone()).or_insert(0) += 1;
    }
    buckets
}
