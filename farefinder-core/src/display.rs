use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Where the rows of a [`DisplayModel`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultSource {
    Primary,
    Fallback,
}

/// What the "Book Now" button of a row does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowAction {
    /// Real flight; booking still goes through the authentication gate.
    Book { flight_id: i64 },
    /// Illustrative row with no real identifier behind it.
    SampleOnly,
}

impl RowAction {
    pub fn is_bookable(&self) -> bool {
        matches!(self, RowAction::Book { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRow {
    pub route: String,
    pub carrier: String,
    pub departure_time: String,
    pub departure_code: String,
    pub duration: String,
    pub arrival_time: String,
    pub arrival_code: String,
    pub price: String,
    pub seats: String,
    pub action: RowAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banner {
    pub message: String,
}

/// Shown instead of rows when a search legitimately matched nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyState {
    pub message: String,
    pub action_label: String,
}

/// Renderer-agnostic search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayModel {
    pub source: ResultSource,
    pub banner: Option<Banner>,
    pub rows: Vec<DisplayRow>,
    pub empty_state: Option<EmptyState>,
}

impl DisplayModel {
    pub fn bookable_rows(&self) -> usize {
        self.rows.iter().filter(|row| row.action.is_bookable()).count()
    }

    pub fn is_empty_state(&self) -> bool {
        self.empty_state.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
    Danger,
}

/// Transient message shown above the form, removed after `ttl`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub ttl: Duration,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>, ttl: Duration) -> Self {
        Self {
            level,
            message: message.into(),
            ttl,
        }
    }
}
