use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use farefinder_core::{
    AssistError, AssistResult, AssistSettings, AuthPredicate, NavigationSink, Notice, NoticeLevel,
    ResultRenderer, RouteSettings, RowAction,
};

pub const LOGIN_REQUIRED_MESSAGE: &str = "Please log in to book flights.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingOutcome {
    /// Sent on to the booking page.
    Redirected { location: String },
    /// Sent to the login page, which returns to the results afterwards.
    LoginRequired { location: String },
    /// Sample row; nothing to book.
    SampleOnly,
}

/// Handles the "Book Now" action of a result row.
pub struct BookingGate {
    auth: Arc<dyn AuthPredicate>,
    navigation: Arc<dyn NavigationSink>,
    renderer: Arc<dyn ResultRenderer>,
    routes: RouteSettings,
    notice_ttl: Duration,
}

impl BookingGate {
    pub fn new(
        auth: Arc<dyn AuthPredicate>,
        navigation: Arc<dyn NavigationSink>,
        renderer: Arc<dyn ResultRenderer>,
        routes: RouteSettings,
        settings: &AssistSettings,
    ) -> Self {
        Self {
            auth,
            navigation,
            renderer,
            routes,
            notice_ttl: settings.notice_ttl(),
        }
    }

    /// Booking location for `flight_id`, or `AuthorizationRequired`
    /// carrying the login location.
    pub fn authorize(&self, flight_id: i64) -> AssistResult<String> {
        if self.auth.is_authenticated() {
            Ok(self.routes.booking_location(flight_id))
        } else {
            Err(AssistError::AuthorizationRequired(self.routes.login_location()))
        }
    }

    pub fn book(&self, action: &RowAction) -> BookingOutcome {
        let flight_id = match action {
            RowAction::Book { flight_id } => *flight_id,
            RowAction::SampleOnly => {
                self.notify(NoticeLevel::Info);
                return BookingOutcome::SampleOnly;
            }
        };

        match self.authorize(flight_id) {
            Ok(location) => {
                info!("Booking flight {}", flight_id);
                self.navigation.navigate(&location);
                BookingOutcome::Redirected { location }
            }
            Err(err) => {
                info!("Booking flight {} refused: {}", flight_id, err);
                let location = self.routes.login_location();
                self.notify(NoticeLevel::Warning);
                self.navigation.navigate(&location);
                BookingOutcome::LoginRequired { location }
            }
        }
    }

    fn notify(&self, level: NoticeLevel) {
        self.renderer.notify(&Notice::new(level, LOGIN_REQUIRED_MESSAGE, self.notice_ttl));
    }
}
