//! Scripted collaborators shared by the unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use serde_json::Value;

use farefinder_core::{
    AirportLookup, AirportRef, DisplayModel, FieldId, FlightResult, FlightSearchClient,
    NavigationSink, Notice, ResultRenderer, SearchCriteria, SuggestionItem, SuggestionView,
    TransportError,
};

pub fn flight(id: i64, price: f64, duration: u64) -> FlightResult {
    FlightResult {
        id,
        airline: "American Airlines".to_string(),
        flight_number: "AA123".to_string(),
        departure_airport: AirportRef { code: "JFK".to_string(), city: "New York".to_string() },
        arrival_airport: AirportRef { code: "LAX".to_string(), city: "Los Angeles".to_string() },
        departure_time: DateTime::parse_from_rfc3339("2025-01-01T08:00:00Z").unwrap(),
        arrival_time: DateTime::parse_from_rfc3339("2025-01-01T14:00:00Z").unwrap(),
        duration,
        price,
        available_seats: 45,
    }
}

pub fn items(labels: &[&str]) -> Vec<SuggestionItem> {
    labels.iter().map(|label| SuggestionItem::new(*label, *label)).collect()
}

type ScriptedReply = (Duration, Result<Vec<SuggestionItem>, TransportError>);

/// Lookup whose latency and answer are scripted per query text.
#[derive(Default)]
pub struct ScriptedLookup {
    script: Mutex<HashMap<String, ScriptedReply>>,
    pub calls: Mutex<Vec<String>>,
}

impl ScriptedLookup {
    pub fn reply(&self, text: &str, after: Duration, items: Vec<SuggestionItem>) {
        self.script.lock().unwrap().insert(text.to_string(), (after, Ok(items)));
    }

    pub fn fail(&self, text: &str) {
        self.script.lock().unwrap().insert(
            text.to_string(),
            (Duration::ZERO, Err(TransportError::Request("connection refused".to_string()))),
        );
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AirportLookup for ScriptedLookup {
    async fn lookup(&self, fragment: &str) -> Result<Vec<SuggestionItem>, TransportError> {
        self.calls.lock().unwrap().push(fragment.to_string());
        let (delay, reply) = self
            .script
            .lock()
            .unwrap()
            .get(fragment)
            .cloned()
            .unwrap_or((Duration::ZERO, Ok(Vec::new())));
        tokio::time::sleep(delay).await;
        reply
    }
}

/// Search backend answering every request with the same payload.
pub struct ScriptedSearch {
    reply: Mutex<Result<Value, TransportError>>,
    delays: Mutex<Vec<Duration>>,
    pub search_calls: AtomicUsize,
    pub list_calls: AtomicUsize,
}

impl ScriptedSearch {
    pub fn answering(reply: Result<Value, TransportError>) -> Self {
        Self {
            reply: Mutex::new(reply),
            delays: Mutex::new(Vec::new()),
            search_calls: AtomicUsize::new(0),
            list_calls: AtomicUsize::new(0),
        }
    }

    /// Latencies applied to successive search calls.
    pub fn with_delays(self, delays: Vec<Duration>) -> Self {
        *self.delays.lock().unwrap() = delays;
        self
    }

    pub fn set_reply(&self, reply: Result<Value, TransportError>) {
        *self.reply.lock().unwrap() = reply;
    }

    pub fn searches(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FlightSearchClient for ScriptedSearch {
    async fn search_flights(&self, _criteria: &SearchCriteria) -> Result<Value, TransportError> {
        let call = self.search_calls.fetch_add(1, Ordering::SeqCst);
        let delay = self.delays.lock().unwrap().get(call).copied().unwrap_or(Duration::ZERO);
        tokio::time::sleep(delay).await;
        self.reply.lock().unwrap().clone()
    }

    async fn list_flights(&self) -> Result<Value, TransportError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.reply.lock().unwrap().clone()
    }
}

#[derive(Default)]
pub struct RecordingRenderer {
    pub shown: Mutex<Vec<DisplayModel>>,
    pub notices: Mutex<Vec<Notice>>,
}

impl RecordingRenderer {
    pub fn last_shown(&self) -> Option<DisplayModel> {
        self.shown.lock().unwrap().last().cloned()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }
}

impl ResultRenderer for RecordingRenderer {
    fn show(&self, model: &DisplayModel) {
        self.shown.lock().unwrap().push(model.clone());
    }

    fn notify(&self, notice: &Notice) {
        self.notices.lock().unwrap().push(notice.clone());
    }
}

#[derive(Default)]
pub struct RecordingNavigation {
    pub visited: Mutex<Vec<String>>,
}

impl RecordingNavigation {
    pub fn visited(&self) -> Vec<String> {
        self.visited.lock().unwrap().clone()
    }
}

impl NavigationSink for RecordingNavigation {
    fn navigate(&self, location: &str) {
        self.visited.lock().unwrap().push(location.to_string());
    }
}

/// In-memory stand-in for the form's DOM.
#[derive(Default)]
pub struct RecordingView {
    mounted: Mutex<HashMap<FieldId, Vec<SuggestionItem>>>,
    values: Mutex<HashMap<FieldId, String>>,
    pub mounts: AtomicUsize,
    pub unmounts: AtomicUsize,
}

impl RecordingView {
    pub fn mounted(&self, field: &FieldId) -> Option<Vec<SuggestionItem>> {
        self.mounted.lock().unwrap().get(field).cloned()
    }

    pub fn value(&self, field: &FieldId) -> Option<String> {
        self.values.lock().unwrap().get(field).cloned()
    }

    pub fn unmount_count(&self) -> usize {
        self.unmounts.load(Ordering::SeqCst)
    }
}

impl SuggestionView for RecordingView {
    fn mount(&self, field: &FieldId, items: &[SuggestionItem]) {
        let previous = self.mounted.lock().unwrap().insert(field.clone(), items.to_vec());
        assert!(previous.is_none(), "second list mounted on {}", field);
        self.mounts.fetch_add(1, Ordering::SeqCst);
    }

    fn unmount(&self, field: &FieldId) {
        self.mounted.lock().unwrap().remove(field);
        self.unmounts.fetch_add(1, Ordering::SeqCst);
    }

    fn fill(&self, field: &FieldId, value: &str) {
        self.values.lock().unwrap().insert(field.clone(), value.to_string());
    }
}
