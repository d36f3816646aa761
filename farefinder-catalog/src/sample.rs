//! Deterministic seed data for the reference server.

use chrono::{Days, Duration, NaiveDate, TimeZone, Utc};

use farefinder_core::{Airport, AirportRef, FlightResult};

use crate::catalog::FlightCatalog;

const AIRPORTS: [(&str, &str, &str, &str); 8] = [
    ("JFK", "John F. Kennedy International Airport", "New York", "USA"),
    ("LAX", "Los Angeles International Airport", "Los Angeles", "USA"),
    ("ORD", "O'Hare International Airport", "Chicago", "USA"),
    ("LHR", "Heathrow Airport", "London", "UK"),
    ("CDG", "Charles de Gaulle Airport", "Paris", "France"),
    ("DXB", "Dubai International Airport", "Dubai", "UAE"),
    ("SIN", "Singapore Changi Airport", "Singapore", "Singapore"),
    ("BKK", "Suvarnabhumi Airport", "Bangkok", "Thailand"),
];

// (from, to, block hours, fare)
const ROUTES: [(&str, &str, i64, f64); 8] = [
    ("JFK", "LAX", 6, 299.99),
    ("JFK", "LHR", 7, 599.99),
    ("LAX", "DXB", 15, 899.99),
    ("ORD", "CDG", 8, 699.99),
    ("LHR", "SIN", 13, 799.99),
    ("CDG", "BKK", 11, 749.99),
    ("JFK", "ORD", 2, 199.99),
    ("LAX", "ORD", 4, 349.99),
];

const AIRLINES: [&str; 5] = [
    "American Airlines",
    "Delta Air Lines",
    "United Airlines",
    "Emirates",
    "Singapore Airlines",
];

pub const SCHEDULE_DAYS: u64 = 30;
pub const DAY_STEP: usize = 2;

/// Catalog with every route flown every other day for [`SCHEDULE_DAYS`]
/// days from `base_date`. Output depends only on `base_date`.
pub fn sample_catalog(base_date: NaiveDate) -> FlightCatalog {
    let mut catalog = FlightCatalog::new();
    for (code, name, city, country) in AIRPORTS {
        catalog.add_airport(Airport::new(code, name, city, country));
    }

    let mut id = 0;
    for day in (0..SCHEDULE_DAYS).step_by(DAY_STEP) {
        let Some(date) = base_date.checked_add_days(Days::new(day)) else {
            break;
        };
        let day = day as usize;

        for (i, (from, to, hours, price)) in ROUTES.iter().enumerate() {
            let (Some(from), Some(to)) = (catalog.airport(from).cloned(), catalog.airport(to).cloned()) else {
                continue;
            };
            let hour = 6 + ((i * 5 + day * 3) % 17) as u32;
            let Some(departs) = date.and_hms_opt(hour, 0, 0) else {
                continue;
            };
            let departure_time = Utc.from_utc_datetime(&departs).fixed_offset();

            id += 1;
            catalog.add_flight(FlightResult {
                id,
                airline: AIRLINES[(i + day / 2) % AIRLINES.len()].to_string(),
                flight_number: format!("{}{}{:02}", from.code, to.code, day),
                departure_airport: AirportRef { code: from.code, city: from.city },
                arrival_airport: AirportRef { code: to.code, city: to.city },
                departure_time,
                arrival_time: departure_time + Duration::hours(*hours),
                duration: (*hours as u64) * 3_600,
                price: *price,
                available_seats: 50 + ((i * 37 + day * 11) % 131) as u32,
            });
        }
    }
    catalog
}
