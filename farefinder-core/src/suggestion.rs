use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of an autocomplete-enabled input field (e.g. `departure`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldId(String);

impl FieldId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// A typeahead request. The sequence number is per field and only grows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub field: FieldId,
    pub text: String,
    pub sequence: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionItem {
    pub label: String,
    pub value: String,
}

impl SuggestionItem {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}
