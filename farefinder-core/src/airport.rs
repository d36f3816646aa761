use serde::{Deserialize, Serialize};
use crate::suggestion::SuggestionItem;

/// Airport record as served by the lookup endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airport {
    pub code: String,
    pub name: String,
    pub city: String,
    #[serde(default)]
    pub country: String,
}

impl Airport {
    pub fn new(code: &str, name: &str, city: &str, country: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            city: city.to_string(),
            country: country.to_string(),
        }
    }

    /// Typeahead entry: shows `City (CODE) - Name`, fills the city.
    pub fn suggestion(&self) -> SuggestionItem {
        SuggestionItem::new(
            format!("{} ({}) - {}", self.city, self.code, self.name),
            self.city.clone(),
        )
    }
}
