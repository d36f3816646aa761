pub mod airport;
pub mod client;
pub mod display;
pub mod identity;
pub mod search;
pub mod settings;
pub mod suggestion;
pub mod surface;
pub mod transport;

pub use airport::Airport;
pub use client::{AirportLookup, FlightSearchClient};
pub use display::{Banner, DisplayModel, DisplayRow, EmptyState, Notice, NoticeLevel, ResultSource, RowAction};
pub use identity::{AuthPredicate, SessionCookieAuth, StaticAuth};
pub use search::{AirportRef, FlightResult, ListingPage, SearchCriteria};
pub use settings::{AssistSettings, RouteSettings};
pub use suggestion::{FieldId, Query, SuggestionItem};
pub use surface::{NavigationSink, ResultRenderer, SuggestionView};
pub use transport::TransportError;

#[derive(Debug, thiserror::Error)]
pub enum AssistError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Transport failed: {0}")]
    Transport(#[from] TransportError),
    #[error("Stale response: sequence {sequence} is older than {latest}")]
    StaleResponse { sequence: u64, latest: u64 },
    #[error("Authorization required: {0}")]
    AuthorizationRequired(String),
}

pub type AssistResult<T> = Result<T, AssistError>;
