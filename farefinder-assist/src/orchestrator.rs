use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

use farefinder_core::search::parse_flight_payload;
use farefinder_core::{
    AssistError, AssistResult, AssistSettings, DisplayModel, FlightSearchClient, Notice, NoticeLevel,
    ResultRenderer, SearchCriteria,
};

use crate::normalize::{self, DisplayZone};

pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all fields";

/// Runs flight searches and hands normalized results to the renderer.
///
/// Search is a convenience feature: a backend failure degrades to the
/// sample flights with a banner instead of an error. Every search, browse
/// or sample request takes a token; only the most recent one may render.
pub struct SearchOrchestrator {
    client: Arc<dyn FlightSearchClient>,
    renderer: Arc<dyn ResultRenderer>,
    zone: DisplayZone,
    notice_ttl: Duration,
    latest: AtomicU64,
}

impl SearchOrchestrator {
    pub fn new(
        client: Arc<dyn FlightSearchClient>,
        renderer: Arc<dyn ResultRenderer>,
        settings: &AssistSettings,
    ) -> Self {
        Self {
            client,
            renderer,
            zone: DisplayZone::from_offset_minutes(settings.display_utc_offset_minutes),
            notice_ttl: settings.notice_ttl(),
            latest: AtomicU64::new(0),
        }
    }

    /// Form submit. Incomplete criteria are reported inline and never reach
    /// the network.
    pub async fn search(&self, criteria: &SearchCriteria) -> AssistResult<DisplayModel> {
        if let Err(err) = criteria.validate() {
            self.renderer.notify(&Notice::new(NoticeLevel::Danger, MISSING_FIELDS_MESSAGE, self.notice_ttl));
            return Err(err);
        }

        let token = self.next_token();
        let search_id = Uuid::new_v4();
        info!(
            "Search {} [{} -> {} on {}, {} passenger(s)]",
            search_id,
            criteria.departure,
            criteria.arrival,
            criteria.date,
            criteria.passenger_count()
        );

        let outcome = self.client.search_flights(criteria).await.and_then(parse_flight_payload);
        let model = match outcome {
            Ok(flights) => {
                info!("Search {} returned {} flight(s)", search_id, flights.len());
                normalize::primary_model(&flights, self.zone)
            }
            Err(err) => {
                warn!("Search {} failed, showing sample flights: {}", search_id, err);
                normalize::fallback_model()
            }
        };

        self.present(token, model)
    }

    /// Page-load listing of all flights, with the same degrade-to-samples
    /// policy as [`search`](Self::search).
    pub async fn browse(&self) -> AssistResult<DisplayModel> {
        let token = self.next_token();
        let model = match self.client.list_flights().await.and_then(parse_flight_payload) {
            Ok(flights) => normalize::primary_model(&flights, self.zone),
            Err(err) => {
                warn!("Flight listing failed, showing sample flights: {}", err);
                normalize::fallback_model()
            }
        };
        self.present(token, model)
    }

    /// "View Sample Flights" from the empty state.
    pub fn show_fallback(&self) -> DisplayModel {
        self.next_token();
        let model = normalize::fallback_model();
        self.renderer.show(&model);
        model
    }

    fn next_token(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn present(&self, token: u64, model: DisplayModel) -> AssistResult<DisplayModel> {
        let latest = self.latest.load(Ordering::SeqCst);
        if token < latest {
            debug!("Dropping results of search #{}, #{} is newer", token, latest);
            return Err(AssistError::StaleResponse { sequence: token, latest });
        }
        self.renderer.show(&model);
        Ok(model)
    }
}
