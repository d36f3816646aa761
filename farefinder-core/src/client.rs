use async_trait::async_trait;
use serde_json::Value;

use crate::search::SearchCriteria;
use crate::suggestion::SuggestionItem;
use crate::transport::TransportError;

/// Typeahead endpoint.
#[async_trait]
pub trait AirportLookup: Send + Sync {
    async fn lookup(&self, fragment: &str) -> Result<Vec<SuggestionItem>, TransportError>;
}

/// Primary flight search endpoint. Payloads are returned raw so callers can
/// tell a malformed body apart from a legitimately empty one.
#[async_trait]
pub trait FlightSearchClient: Send + Sync {
    async fn search_flights(&self, criteria: &SearchCriteria) -> Result<Value, TransportError>;

    /// Unfiltered listing, usually wrapped in a pagination envelope.
    async fn list_flights(&self) -> Result<Value, TransportError>;
}
