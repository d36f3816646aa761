use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use farefinder_core::{Airport, FlightResult, ListingPage};

/// Validated flight search parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightQuery {
    pub departure: String,
    pub arrival: String,
    pub date: NaiveDate,
    pub passengers: u32,
}

impl FlightQuery {
    /// Build a query from raw request parameters. `passengers` defaults to 1.
    pub fn parse(
        departure: Option<&str>,
        arrival: Option<&str>,
        date: Option<&str>,
        passengers: Option<u32>,
    ) -> Result<Self, CatalogError> {
        fn present(value: Option<&str>) -> Option<&str> {
            value.map(str::trim).filter(|v| !v.is_empty())
        }

        let (Some(departure), Some(arrival), Some(date)) =
            (present(departure), present(arrival), present(date))
        else {
            return Err(CatalogError::MissingCriteria);
        };

        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| CatalogError::InvalidDate(date.to_string()))?;

        Ok(Self {
            departure: departure.to_string(),
            arrival: arrival.to_string(),
            date,
            passengers: passengers.unwrap_or(1),
        })
    }
}

/// In-memory airports and flights backing the reference endpoints.
pub struct FlightCatalog {
    airports: Vec<Airport>,
    flights: Vec<FlightResult>,
}

impl FlightCatalog {
    pub fn new() -> Self {
        Self {
            airports: Vec::new(),
            flights: Vec::new(),
        }
    }

    /// Add an airport, replacing any existing one with the same code.
    pub fn add_airport(&mut self, airport: Airport) {
        self.airports.retain(|a| a.code != airport.code);
        self.airports.push(airport);
        self.airports.sort_by(|a, b| a.city.cmp(&b.city));
    }

    pub fn airport(&self, code: &str) -> Option<&Airport> {
        self.airports.iter().find(|a| a.code.eq_ignore_ascii_case(code))
    }

    pub fn add_flight(&mut self, flight: FlightResult) {
        let at = self
            .flights
            .partition_point(|f| f.departure_time <= flight.departure_time);
        self.flights.insert(at, flight);
    }

    pub fn flight(&self, id: i64) -> Option<&FlightResult> {
        self.flights.iter().find(|f| f.id == id)
    }

    pub fn flight_count(&self) -> usize {
        self.flights.len()
    }

    /// Airports whose city, name, or code contains `query`, ignoring case.
    /// A blank query matches nothing.
    pub fn search_airports(&self, query: &str, limit: usize) -> Vec<Airport> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.airports
            .iter()
            .filter(|a| {
                contains(&a.city, &needle) || contains(&a.name, &needle) || contains(&a.code, &needle)
            })
            .take(limit)
            .cloned()
            .collect()
    }

    /// Flights on `query.date` between airports matching the departure and
    /// arrival text (city or code) with enough free seats, by departure time.
    pub fn search_flights(&self, query: &FlightQuery) -> Vec<FlightResult> {
        let departure = query.departure.to_lowercase();
        let arrival = query.arrival.to_lowercase();
        self.flights
            .iter()
            .filter(|f| {
                (contains(&f.departure_airport.city, &departure) || contains(&f.departure_airport.code, &departure))
                    && (contains(&f.arrival_airport.city, &arrival) || contains(&f.arrival_airport.code, &arrival))
                    && f.departure_time.date_naive() == query.date
                    && f.available_seats >= query.passengers
            })
            .cloned()
            .collect()
    }

    /// One page (1-based) of all flights.
    pub fn list_flights(&self, page: usize, page_size: usize) -> Result<ListingPage<FlightResult>, CatalogError> {
        let page_size = page_size.max(1);
        let count = self.flights.len();
        let last_page = count.div_ceil(page_size).max(1);
        if page == 0 || page > last_page {
            return Err(CatalogError::InvalidPage(page));
        }

        let results = self
            .flights
            .iter()
            .skip((page - 1) * page_size)
            .take(page_size)
            .cloned()
            .collect();

        Ok(ListingPage {
            count,
            next: (page < last_page).then(|| format!("?page={}", page + 1)),
            previous: (page > 1).then(|| format!("?page={}", page - 1)),
            results,
        })
    }
}

impl Default for FlightCatalog {
    fn default() -> Self {
        Self::new()
    }
}

fn contains(haystack: &str, lowered_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowered_needle)
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Departure, arrival, and date are required")]
    MissingCriteria,

    #[error("Invalid date format. Use YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid page: {0}")]
    InvalidPage(usize),
}
