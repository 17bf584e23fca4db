//! Protocol constants for endpoint paths and well-known client names.

/// Known backend endpoint paths.
pub struct Endpoints;

impl Endpoints {
    /// Current user's identity and login history.
    pub const USERS: &'static str = "/users";
}

/// Well-known `clientName` values in login-history records.
pub struct ClientNames;

impl ClientNames {
    /// Logins made through the browser UI. Every other client name is a
    /// personal access token.
    pub const WEB_UI: &'static str = "web-ui";
}
