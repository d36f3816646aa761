//! Page-side collaborators. Implementations live with whatever hosts the form.

use crate::display::{DisplayModel, Notice};
use crate::suggestion::{FieldId, SuggestionItem};

/// Presents search results and transient notices.
pub trait ResultRenderer: Send + Sync {
    fn show(&self, model: &DisplayModel);
    fn notify(&self, notice: &Notice);
}

/// Performs a full navigation to `location`.
pub trait NavigationSink: Send + Sync {
    fn navigate(&self, location: &str);
}

/// The DOM side of an autocomplete field.
pub trait SuggestionView: Send + Sync {
    fn mount(&self, field: &FieldId, items: &[SuggestionItem]);
    fn unmount(&self, field: &FieldId);
    fn fill(&self, field: &FieldId, value: &str);
}
