use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use chrono::{DateTime, Days, FixedOffset, NaiveDate};

use crate::transport::TransportError;
use crate::{AssistError, AssistResult};

pub const DEFAULT_PASSENGERS: u32 = 1;

/// Values typed into the flight search form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    #[serde(default)]
    pub departure: String,
    #[serde(default)]
    pub arrival: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub passengers: Option<u32>,
}

impl SearchCriteria {
    pub fn new(
        departure: impl Into<String>,
        arrival: impl Into<String>,
        date: impl Into<String>,
        passengers: Option<u32>,
    ) -> Self {
        Self {
            departure: departure.into(),
            arrival: arrival.into(),
            date: date.into(),
            passengers,
        }
    }

    pub fn passenger_count(&self) -> u32 {
        self.passengers.unwrap_or(DEFAULT_PASSENGERS).max(1)
    }

    /// Required fields left blank, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("departure", &self.departure),
            ("arrival", &self.arrival),
            ("date", &self.date),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    pub fn validate(&self) -> AssistResult<()> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(AssistError::Validation(format!("missing {}", missing.join(", "))))
        }
    }

    /// Initial and earliest selectable travel date: the day after `today`.
    pub fn default_date(today: NaiveDate) -> NaiveDate {
        today.checked_add_days(Days::new(1)).unwrap_or(today)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirportRef {
    pub code: String,
    pub city: String,
}

/// A flight as returned by the primary search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightResult {
    pub id: i64,
    pub airline: String,
    pub flight_number: String,
    pub departure_airport: AirportRef,
    pub arrival_airport: AirportRef,
    pub departure_time: DateTime<FixedOffset>,
    pub arrival_time: DateTime<FixedOffset>,
    /// Seconds.
    #[serde(deserialize_with = "deserialize_duration")]
    pub duration: u64,
    #[serde(deserialize_with = "deserialize_price")]
    pub price: f64,
    pub available_seats: u32,
}

/// Paginated listing envelope (`GET /api/flights/`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingPage<T> {
    pub count: usize,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// Parse a search payload: either a bare array or an envelope with `results`.
pub fn parse_flight_payload(payload: Value) -> Result<Vec<FlightResult>, TransportError> {
    let rows = match payload {
        Value::Object(mut envelope) => match envelope.remove("results") {
            Some(results) => results,
            None => Value::Object(envelope),
        },
        other => other,
    };
    serde_json::from_value(rows).map_err(TransportError::decode)
}

// Durations arrive either as seconds or as a "[D ]HH:MM:SS" clock string.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireDuration {
    Seconds(f64),
    Clock(String),
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match WireDuration::deserialize(deserializer)? {
        WireDuration::Seconds(secs) if secs >= 0.0 => Ok(secs as u64),
        WireDuration::Seconds(secs) => Err(serde::de::Error::custom(format!("negative duration {}", secs))),
        WireDuration::Clock(text) => parse_clock(&text)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid duration {:?}", text))),
    }
}

fn parse_clock(text: &str) -> Option<u64> {
    let text = text.trim();
    let (days, clock) = match text.split_once(' ') {
        Some((days, clock)) => (days.parse::<u64>().ok()?, clock),
        None => (0, text),
    };
    let parts: Vec<&str> = clock.split(':').collect();
    match parts.as_slice() {
        [h, m, s] => {
            let hours: u64 = h.parse().ok()?;
            let minutes: u64 = m.parse().ok()?;
            let seconds = s.parse::<f64>().ok()? as u64;
            days.checked_mul(86_400)?
                .checked_add(hours.checked_mul(3_600)?)?
                .checked_add(minutes.checked_mul(60)?)?
                .checked_add(seconds)
        }
        [secs] if days == 0 => secs.parse().ok(),
        _ => None,
    }
}

// Decimal prices are serialized as strings by some backends.
#[derive(Deserialize)]
#[serde(untagged)]
enum WirePrice {
    Number(f64),
    Text(String),
}

fn deserialize_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match WirePrice::deserialize(deserializer)? {
        WirePrice::Number(price) => Ok(price),
        WirePrice::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid price {:?}", text))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn flight_json(id: i64) -> Value {
        json!({
            "id": id,
            "airline": "American Airlines",
            "flight_number": "AA123",
            "departure_airport": { "code": "JFK", "city": "New York", "name": "John F. Kennedy International Airport" },
            "arrival_airport": { "code": "LAX", "city": "Los Angeles" },
            "departure_time": "2025-01-01T08:00:00Z",
            "arrival_time": "2025-01-01T14:00:00Z",
            "duration": 21600,
            "price": 299.99,
            "available_seats": 45
        })
    }

    #[test]
    fn test_criteria_deserialization() {
        let json = r#"
            {
                "departure": "JFK",
                "arrival": "LAX",
                "date": "2025-01-01"
            }
        "#;
        let criteria: SearchCriteria = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(criteria.departure, "JFK");
        assert_eq!(criteria.passenger_count(), 1);
        assert!(criteria.validate().is_ok());
    }

    #[test]
    fn test_missing_fields_are_reported_in_order() {
        let criteria = SearchCriteria::new("JFK", "  ", "", Some(2));
        assert_eq!(criteria.missing_fields(), vec!["arrival", "date"]);
        assert!(matches!(criteria.validate(), Err(AssistError::Validation(_))));
    }

    #[test]
    fn test_default_date_is_tomorrow() {
        let today = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(SearchCriteria::default_date(today), NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    }

    #[test]
    fn test_parse_bare_array() {
        let flights = parse_flight_payload(json!([flight_json(1), flight_json(2)])).unwrap();
        assert_eq!(flights.len(), 2);
        assert_eq!(flights[0].duration, 21600);
        assert_eq!(flights[1].id, 2);
    }

    #[test]
    fn test_parse_pagination_envelope() {
        let payload = json!({ "count": 1, "next": null, "previous": null, "results": [flight_json(7)] });
        let flights = parse_flight_payload(payload).unwrap();
        assert_eq!(flights.len(), 1);
        assert_eq!(flights[0].departure_airport.city, "New York");
    }

    #[test]
    fn test_parse_string_price_and_clock_duration() {
        let mut flight = flight_json(3);
        flight["price"] = json!("599.99");
        flight["duration"] = json!("07:30:00");
        let flights = parse_flight_payload(json!([flight])).unwrap();
        assert_eq!(flights[0].duration, 27000);
        assert!((flights[0].price - 599.99).abs() < f64::EPSILON);

        let mut long_haul = flight_json(4);
        long_haul["duration"] = json!("1 02:00:00");
        let flights = parse_flight_payload(json!([long_haul])).unwrap();
        assert_eq!(flights[0].duration, 93600);
    }

    #[test]
    fn test_overflowing_clock_duration_is_decode_error() {
        let mut flight = flight_json(5);
        flight["duration"] = json!("999999999999999 00:00:00");
        let err = parse_flight_payload(json!([flight])).unwrap_err();
        assert!(matches!(err, TransportError::Decode(_)));

        let mut flight = flight_json(6);
        flight["duration"] = json!(format!("00:{}:00", u64::MAX));
        assert!(parse_flight_payload(json!([flight])).is_err());
    }

    #[test]
    fn test_malformed_payload_is_decode_error() {
        let err = parse_flight_payload(json!({ "error": "Departure, arrival, and date are required" })).unwrap_err();
        assert!(matches!(err, TransportError::Decode(_)));

        let err = parse_flight_payload(json!([{ "id": 1 }])).unwrap_err();
        assert!(matches!(err, TransportError::Decode(_)));
    }
}
