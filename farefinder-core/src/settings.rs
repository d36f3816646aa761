use serde::Deserialize;
use std::time::Duration;

/// Tunables for the autocomplete sessions and the result presenter.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AssistSettings {
    pub debounce_ms: u64,
    pub min_query_chars: usize,
    /// Offset used for time-of-day rendering; the host's local zone when unset.
    pub display_utc_offset_minutes: Option<i32>,
    pub notice_ttl_ms: u64,
}

impl Default for AssistSettings {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            min_query_chars: 2,
            display_utc_offset_minutes: None,
            notice_ttl_ms: 5_000,
        }
    }
}

impl AssistSettings {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn notice_ttl(&self) -> Duration {
        Duration::from_millis(self.notice_ttl_ms)
    }
}

/// Navigation targets used by the booking gate.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RouteSettings {
    pub booking_path: String,
    pub login_path: String,
    /// Page the login screen sends the visitor back to.
    pub return_path: String,
}

impl Default for RouteSettings {
    fn default() -> Self {
        Self {
            booking_path: "/booking/".to_string(),
            login_path: "/admin/login/".to_string(),
            return_path: "/flights/".to_string(),
        }
    }
}

impl RouteSettings {
    pub fn booking_location(&self, flight_id: i64) -> String {
        format!("{}?flight={}", self.booking_path, flight_id)
    }

    pub fn login_location(&self) -> String {
        format!("{}?next={}", self.login_path, self.return_path)
    }
}
