pub mod booking;
pub mod clicks;
pub mod debounce;
pub mod fallback;
pub mod form;
pub mod normalize;
pub mod orchestrator;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use booking::{BookingGate, BookingOutcome};
pub use clicks::{ClickHub, ClickSubscription, PointerEvent};
pub use debounce::DebounceScheduler;
pub use fallback::{FallbackFlight, SAMPLE_FLIGHTS};
pub use form::{FormCollaborators, SearchForm};
pub use normalize::DisplayZone;
pub use orchestrator::SearchOrchestrator;
pub use session::SuggestionSession;

use std::sync::{Mutex, MutexGuard, PoisonError};

// Poisoning is ignored: guarded state is only ever swapped out whole.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
