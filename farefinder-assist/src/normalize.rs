//! Turns the two result schemas into [`DisplayModel`] rows.
//!
//! Primary and sample flights are normalized separately. A sample flight
//! only carries display labels and nothing is derived for it.

use chrono::{DateTime, FixedOffset, Local};

use farefinder_core::{
    Banner, DisplayModel, DisplayRow, EmptyState, FlightResult, ResultSource, RowAction,
};

use crate::fallback::{FallbackFlight, SAMPLE_FLIGHTS};

pub const SAMPLE_BANNER: &str =
    "Showing sample flights. Search for specific routes to see real results.";
pub const NO_RESULTS_MESSAGE: &str = "No flights found matching your criteria.";
pub const VIEW_SAMPLES_LABEL: &str = "View Sample Flights";

const TIME_OF_DAY: &str = "%I:%M %p";

/// Time zone used to render departure and arrival times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayZone {
    Local,
    Fixed(FixedOffset),
}

impl DisplayZone {
    /// `None` or an out-of-range offset selects the host's local zone.
    pub fn from_offset_minutes(minutes: Option<i32>) -> Self {
        minutes
            .and_then(|m| FixedOffset::east_opt(m * 60))
            .map(DisplayZone::Fixed)
            .unwrap_or(DisplayZone::Local)
    }

    pub fn time_of_day(&self, at: &DateTime<FixedOffset>) -> String {
        match self {
            DisplayZone::Local => at.with_timezone(&Local).format(TIME_OF_DAY).to_string(),
            DisplayZone::Fixed(offset) => at.with_timezone(offset).format(TIME_OF_DAY).to_string(),
        }
    }
}

/// `21600` -> `"6h 0m"`.
pub fn format_duration(seconds: u64) -> String {
    format!("{}h {}m", seconds / 3_600, (seconds % 3_600) / 60)
}

pub fn format_price(amount: f64) -> String {
    format!("${:.2}", amount)
}

pub fn primary_row(flight: &FlightResult, zone: DisplayZone) -> DisplayRow {
    DisplayRow {
        route: format!("{} → {}", flight.departure_airport.city, flight.arrival_airport.city),
        carrier: format!("{} • {}", flight.airline, flight.flight_number),
        departure_time: zone.time_of_day(&flight.departure_time),
        departure_code: flight.departure_airport.code.clone(),
        duration: format_duration(flight.duration),
        arrival_time: zone.time_of_day(&flight.arrival_time),
        arrival_code: flight.arrival_airport.code.clone(),
        price: format_price(flight.price),
        seats: flight.available_seats.to_string(),
        action: RowAction::Book { flight_id: flight.id },
    }
}

pub fn fallback_row(flight: &FallbackFlight) -> DisplayRow {
    DisplayRow {
        route: flight.route.to_string(),
        carrier: format!("{} • {}", flight.airline, flight.number),
        departure_time: flight.departure.to_string(),
        departure_code: flight.from_code.to_string(),
        duration: flight.duration.to_string(),
        arrival_time: flight.arrival.to_string(),
        arrival_code: flight.to_code.to_string(),
        price: format!("${}", flight.price),
        seats: flight.seats.to_string(),
        action: RowAction::SampleOnly,
    }
}

/// Rows for a successful search. No rows yields the explicit empty state,
/// never sample data.
pub fn primary_model(flights: &[FlightResult], zone: DisplayZone) -> DisplayModel {
    let empty_state = flights.is_empty().then(|| EmptyState {
        message: NO_RESULTS_MESSAGE.to_string(),
        action_label: VIEW_SAMPLES_LABEL.to_string(),
    });

    DisplayModel {
        source: ResultSource::Primary,
        banner: None,
        rows: flights.iter().map(|flight| primary_row(flight, zone)).collect(),
        empty_state,
    }
}

pub fn fallback_model() -> DisplayModel {
    DisplayModel {
        source: ResultSource::Fallback,
        banner: Some(Banner {
            message: SAMPLE_BANNER.to_string(),
        }),
        rows: SAMPLE_FLIGHTS.iter().map(fallback_row).collect(),
        empty_state: None,
    }
}
