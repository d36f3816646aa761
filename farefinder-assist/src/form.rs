use std::sync::Arc;

use farefinder_core::{
    AirportLookup, AssistResult, AssistSettings, AuthPredicate, DisplayModel, FieldId, FlightSearchClient,
    NavigationSink, ResultRenderer, RouteSettings, RowAction, SearchCriteria,
    SuggestionView,
};

use crate::booking::{BookingGate, BookingOutcome};
use crate::clicks::{ClickHub, PointerEvent};
use crate::debounce::DebounceScheduler;
use crate::orchestrator::SearchOrchestrator;
use crate::session::SuggestionSession;

/// Everything the search form talks to outside this crate.
pub struct FormCollaborators {
    pub lookup: Arc<dyn AirportLookup>,
    pub search: Arc<dyn FlightSearchClient>,
    pub renderer: Arc<dyn ResultRenderer>,
    pub view: Arc<dyn SuggestionView>,
    pub navigation: Arc<dyn NavigationSink>,
    pub auth: Arc<dyn AuthPredicate>,
}

/// The flight search form: two autocomplete fields sharing one scheduler
/// and one document click hub, the orchestrator, and the booking gate.
pub struct SearchForm {
    departure: SuggestionSession,
    arrival: SuggestionSession,
    orchestrator: SearchOrchestrator,
    booking: BookingGate,
    scheduler: DebounceScheduler,
    clicks: ClickHub,
}

impl SearchForm {
    pub const DEPARTURE: &'static str = "departure";
    pub const ARRIVAL: &'static str = "arrival";

    pub fn new(collaborators: FormCollaborators, settings: &AssistSettings, routes: RouteSettings) -> Self {
        let scheduler = DebounceScheduler::new();
        let clicks = ClickHub::new();

        let session = |name: &str| {
            SuggestionSession::new(
                FieldId::new(name),
                collaborators.lookup.clone(),
                collaborators.view.clone(),
                scheduler.clone(),
                clicks.clone(),
                settings,
            )
        };
        let departure = session(Self::DEPARTURE);
        let arrival = session(Self::ARRIVAL);

        let orchestrator = SearchOrchestrator::new(
            collaborators.search.clone(),
            collaborators.renderer.clone(),
            settings,
        );
        let booking = BookingGate::new(
            collaborators.auth.clone(),
            collaborators.navigation.clone(),
            collaborators.renderer.clone(),
            routes,
            settings,
        );

        Self {
            departure,
            arrival,
            orchestrator,
            booking,
            scheduler,
            clicks,
        }
    }

    pub fn departure(&self) -> &SuggestionSession {
        &self.departure
    }

    pub fn arrival(&self) -> &SuggestionSession {
        &self.arrival
    }

    pub fn session(&self, field: &FieldId) -> Option<&SuggestionSession> {
        [&self.departure, &self.arrival]
            .into_iter()
            .find(|session| session.field() == field)
    }

    /// Route a keystroke. Returns `false` for fields without autocomplete.
    pub fn input(&self, field: &FieldId, text: &str) -> bool {
        match self.session(field) {
            Some(session) => {
                session.on_input(text);
                true
            }
            None => false,
        }
    }

    pub fn pointer(&self, event: &PointerEvent) -> usize {
        self.clicks.dispatch(event)
    }

    pub async fn submit(&self, criteria: &SearchCriteria) -> AssistResult<DisplayModel> {
        self.orchestrator.search(criteria).await
    }

    /// Initial listing shown when the results page opens.
    pub async fn load(&self) -> AssistResult<DisplayModel> {
        self.orchestrator.browse().await
    }

    pub fn view_samples(&self) -> DisplayModel {
        self.orchestrator.show_fallback()
    }

    pub fn book(&self, action: &RowAction) -> BookingOutcome {
        self.booking.book(action)
    }

    pub fn teardown(&self) {
        self.departure.close();
        self.arrival.close();
        self.scheduler.cancel_all();
    }
}
