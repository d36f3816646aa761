/// Whether the current visitor may proceed to booking.
pub trait AuthPredicate: Send + Sync {
    fn is_authenticated(&self) -> bool;
}

/// Treats the visitor as logged in when the `Cookie` header carries a
/// `sessionid` pair.
#[derive(Debug, Clone, Default)]
pub struct SessionCookieAuth {
    cookie_header: String,
}

impl SessionCookieAuth {
    pub const SESSION_COOKIE: &'static str = "sessionid";

    pub fn new(cookie_header: impl Into<String>) -> Self {
        Self {
            cookie_header: cookie_header.into(),
        }
    }
}

impl AuthPredicate for SessionCookieAuth {
    fn is_authenticated(&self) -> bool {
        self.cookie_header
            .split(';')
            .filter_map(|pair| pair.split_once('='))
            .any(|(name, value)| name.trim() == Self::SESSION_COOKIE && !value.trim().is_empty())
    }
}

/// Fixed answer, for tests and kiosk pages.
#[derive(Debug, Clone, Copy)]
pub struct StaticAuth(pub bool);

impl AuthPredicate for StaticAuth {
    fn is_authenticated(&self) -> bool {
        self.0
    }
}
