use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use farefinder_core::{
    Airport, AirportLookup, FlightSearchClient, SearchCriteria, SuggestionItem, TransportError,
};

use crate::app_config::ClientConfig;

pub const AIRPORT_SEARCH_PATH: &str = "/api/airports/search/";
pub const FLIGHT_SEARCH_PATH: &str = "/api/flights/search/";
pub const FLIGHT_LIST_PATH: &str = "/api/flights/";

/// JSON-over-HTTP binding of the typeahead and flight search endpoints.
#[derive(Clone)]
pub struct HttpFlightApi {
    client: Client,
    base_url: String,
}

impl HttpFlightApi {
    pub fn new(config: &ClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;
        Ok(Self::with_client(client, &config.base_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json(&self, path: &str, params: &[(&str, String)]) -> Result<Value, TransportError> {
        let url = self.url(path);
        debug!("GET {} {:?}", url, params);

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(TransportError::Status {
                status: response.status().as_u16(),
                url,
            });
        }

        response.json::<Value>().await.map_err(TransportError::decode)
    }
}

/// Airport records to typeahead entries, keeping the server's order.
pub fn airports_to_suggestions(payload: Value) -> Result<Vec<SuggestionItem>, TransportError> {
    let airports: Vec<Airport> = serde_json::from_value(payload).map_err(TransportError::decode)?;
    Ok(airports.iter().map(Airport::suggestion).collect())
}

pub fn search_params(criteria: &SearchCriteria) -> Vec<(&'static str, String)> {
    vec![
        ("departure", criteria.departure.trim().to_string()),
        ("arrival", criteria.arrival.trim().to_string()),
        ("date", criteria.date.trim().to_string()),
        ("passengers", criteria.passenger_count().to_string()),
    ]
}

#[async_trait]
impl AirportLookup for HttpFlightApi {
    async fn lookup(&self, fragment: &str) -> Result<Vec<SuggestionItem>, TransportError> {
        let payload = self
            .get_json(AIRPORT_SEARCH_PATH, &[("q", fragment.to_string())])
            .await?;
        airports_to_suggestions(payload)
    }
}

#[async_trait]
impl FlightSearchClient for HttpFlightApi {
    async fn search_flights(&self, criteria: &SearchCriteria) -> Result<Value, TransportError> {
        self.get_json(FLIGHT_SEARCH_PATH, &search_params(criteria)).await
    }

    async fn list_flights(&self) -> Result<Value, TransportError> {
        self.get_json(FLIGHT_LIST_PATH, &[]).await
    }
}
