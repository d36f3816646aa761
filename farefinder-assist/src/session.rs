use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, warn};

use farefinder_core::{
    AirportLookup, AssistError, AssistResult, AssistSettings, FieldId, Query, SuggestionItem, SuggestionView,
};

use crate::clicks::{ClickHub, ClickSubscription};
use crate::debounce::DebounceScheduler;
use crate::lock;

// View calls queued under the state lock and applied after it is released.
enum ViewEffect {
    Mount(Vec<SuggestionItem>),
    Unmount,
    Fill(String),
}

#[derive(Default)]
struct SessionState {
    next_sequence: u64,
    last_dispatched: u64,
    last_rendered: u64,
    mounted: Option<Vec<SuggestionItem>>,
    outside_click: Option<ClickSubscription>,
    closed: bool,
    effects: VecDeque<ViewEffect>,
    flushing: bool,
}

struct SessionInner {
    field: FieldId,
    lookup: Arc<dyn AirportLookup>,
    view: Arc<dyn SuggestionView>,
    scheduler: DebounceScheduler,
    clicks: ClickHub,
    debounce: Duration,
    min_query_chars: usize,
    state: Mutex<SessionState>,
}

/// Suggestion list lifecycle for one autocomplete field.
///
/// Replies are applied in sequence order, not arrival order: a reply older
/// than the list on screen is dropped. In-flight lookups are never aborted.
/// While a list is mounted the session owns exactly one outside-click
/// subscription, released whenever the list goes away.
#[derive(Clone)]
pub struct SuggestionSession {
    inner: Arc<SessionInner>,
}

impl SuggestionSession {
    pub fn new(
        field: FieldId,
        lookup: Arc<dyn AirportLookup>,
        view: Arc<dyn SuggestionView>,
        scheduler: DebounceScheduler,
        clicks: ClickHub,
        settings: &AssistSettings,
    ) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                field,
                lookup,
                view,
                scheduler,
                clicks,
                debounce: settings.debounce(),
                min_query_chars: settings.min_query_chars,
                state: Mutex::new(SessionState::default()),
            }),
        }
    }

    pub fn field(&self) -> &FieldId {
        &self.inner.field
    }

    /// Keystroke handler. Short fragments are ignored; anything else
    /// replaces the pending lookup for this field.
    pub fn on_input(&self, raw_text: &str) {
        if raw_text.chars().count() < self.inner.min_query_chars {
            return;
        }

        let query = {
            let mut state = lock(&self.inner.state);
            if state.closed {
                return;
            }
            state.next_sequence += 1;
            Query {
                field: self.inner.field.clone(),
                text: raw_text.to_string(),
                sequence: state.next_sequence,
            }
        };

        let session = self.clone();
        self.inner.scheduler.schedule(self.inner.field.as_str(), self.inner.debounce, async move {
            session.dispatch(query).await;
        });
    }

    /// Run the lookup for `query` and render the reply. Failures are logged
    /// and leave the current list alone.
    pub async fn dispatch(&self, query: Query) {
        {
            let mut state = lock(&self.inner.state);
            state.last_dispatched = state.last_dispatched.max(query.sequence);
        }

        match self.inner.lookup.lookup(&query.text).await {
            Ok(items) => {
                if let Err(err) = self.render(query.sequence, items) {
                    debug!("Suggestions [{}] discarded: {}", self.inner.field, err);
                }
            }
            Err(err) => {
                warn!(
                    "Airport lookup for [{}] {:?} failed, keeping current suggestions: {}",
                    self.inner.field, query.text, err
                );
            }
        }
    }

    /// Replace the mounted list with `items`, unless a newer reply is
    /// already on screen.
    pub fn render(&self, sequence: u64, items: Vec<SuggestionItem>) -> AssistResult<()> {
        {
            let mut state = lock(&self.inner.state);
            if state.closed {
                return Ok(());
            }
            if sequence < state.last_rendered {
                return Err(AssistError::StaleResponse {
                    sequence,
                    latest: state.last_rendered,
                });
            }

            self.unmount_locked(&mut state);
            if !items.is_empty() {
                state.effects.push_back(ViewEffect::Mount(items.clone()));
                state.mounted = Some(items);
                state.outside_click = Some(self.watch_outside_clicks());
            }
            state.last_rendered = sequence;
        }
        self.flush_view();
        Ok(())
    }

    /// Fill the field with the item at `position` and close the list.
    pub fn select(&self, position: usize) -> Option<String> {
        let value = {
            let mut state = lock(&self.inner.state);
            let value = state.mounted.as_ref()?.get(position)?.value.clone();
            state.effects.push_back(ViewEffect::Fill(value.clone()));
            self.unmount_locked(&mut state);
            value
        };
        self.flush_view();
        Some(value)
    }

    /// Close the list if one is open. Returns whether anything was closed.
    pub fn dismiss(&self) -> bool {
        let was_mounted = {
            let mut state = lock(&self.inner.state);
            let was_mounted = state.mounted.is_some();
            self.unmount_locked(&mut state);
            was_mounted
        };
        self.flush_view();
        was_mounted
    }

    /// Teardown: drops the pending lookup, the list and the click listener.
    /// Replies still in flight are ignored afterwards.
    pub fn close(&self) {
        self.inner.scheduler.cancel(self.inner.field.as_str());
        {
            let mut state = lock(&self.inner.state);
            self.unmount_locked(&mut state);
            state.closed = true;
        }
        self.flush_view();
    }

    pub fn mounted_items(&self) -> Option<Vec<SuggestionItem>> {
        lock(&self.inner.state).mounted.clone()
    }

    pub fn last_dispatched(&self) -> u64 {
        lock(&self.inner.state).last_dispatched
    }

    pub fn last_rendered(&self) -> u64 {
        lock(&self.inner.state).last_rendered
    }

    pub fn has_pending_lookup(&self) -> bool {
        self.inner.scheduler.is_pending(self.inner.field.as_str())
    }

    pub fn is_listening_for_outside_clicks(&self) -> bool {
        lock(&self.inner.state)
            .outside_click
            .as_ref()
            .is_some_and(ClickSubscription::is_attached)
    }

    fn unmount_locked(&self, state: &mut SessionState) {
        if state.mounted.take().is_some() {
            state.effects.push_back(ViewEffect::Unmount);
        }
        if let Some(mut subscription) = state.outside_click.take() {
            subscription.detach();
        }
    }

    /// Apply queued view calls in order, without holding the state lock.
    /// A view that calls back into the session only queues more effects;
    /// the flush already running on the stack applies them.
    fn flush_view(&self) {
        {
            let mut state = lock(&self.inner.state);
            if state.flushing {
                return;
            }
            state.flushing = true;
        }

        loop {
            let effect = {
                let mut state = lock(&self.inner.state);
                match state.effects.pop_front() {
                    Some(effect) => effect,
                    None => {
                        state.flushing = false;
                        return;
                    }
                }
            };
            let (view, field) = (&self.inner.view, &self.inner.field);
            match effect {
                ViewEffect::Mount(items) => view.mount(field, &items),
                ViewEffect::Unmount => view.unmount(field),
                ViewEffect::Fill(value) => view.fill(field, &value),
            }
        }
    }

    fn watch_outside_clicks(&self) -> ClickSubscription {
        // Weak: the hub must not keep a torn-down session alive.
        let session = Arc::downgrade(&self.inner);
        let field = self.inner.field.clone();
        self.inner.clicks.subscribe(move |event| {
            if event.is_within(&field) {
                return;
            }
            if let Some(inner) = session.upgrade() {
                if (SuggestionSession { inner }).dismiss() {
                    debug!("Suggestions [{}] dismissed by outside click", field);
                }
            }
        })
    }
}
