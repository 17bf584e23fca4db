//! # Profile View Model
//!
//! Typed, display-ready form of the `/users` document.
//!
//! [`normalize`] turns one raw login-client record into a
//! [`NormalizedLoginClient`]: the client name is copied verbatim and the
//! textual `lastLogin` is parsed into a UTC instant. A timestamp that is
//! missing, blank or unparsable becomes `None`; it never fails the load.
//!
//! Client order is the backend's order. Nothing here sorts.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;

use crate::protocol::constants::ClientNames;
use crate::protocol::users::{RawLoginClient, RawUserData};

/// Shown in place of a timestamp when a client has no usable last login.
pub const NO_LAST_LOGIN: &str = "No last login date";

/// Layout used to render timestamps (always UTC).
const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Naive date-time layouts accepted after RFC 3339, interpreted as UTC.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// A successfully loaded profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserProfile {
    /// Identifier of the authenticated principal.
    pub login_id: Option<String>,

    /// Raw timestamp of the last browser login, carried through unparsed.
    pub web_last_login: Option<String>,

    /// Raw timestamp of the last REST API login, carried through unparsed.
    pub rest_api_last_login: Option<String>,

    /// Login clients in backend order.
    pub clients: Vec<NormalizedLoginClient>,
}

impl UserProfile {
    /// Build the view model from the raw `userData` object. A missing client
    /// list becomes an empty one.
    #[must_use]
    pub fn from_raw(raw: RawUserData) -> Self {
        let clients = raw
            .clients
            .unwrap_or_default()
            .into_iter()
            .map(normalize)
            .collect();

        Self {
            login_id: raw.login_id,
            web_last_login: raw.web_last_login,
            rest_api_last_login: raw.rest_api_last_login,
            clients,
        }
    }

    /// `web_last_login` parsed with the same rules as client timestamps.
    #[must_use]
    pub fn web_last_login_at(&self) -> Option<DateTime<Utc>> {
        self.web_last_login.as_deref().and_then(parse_timestamp)
    }

    /// `rest_api_last_login` parsed with the same rules as client timestamps.
    #[must_use]
    pub fn rest_api_last_login_at(&self) -> Option<DateTime<Utc>> {
        self.rest_api_last_login.as_deref().and_then(parse_timestamp)
    }
}

/// How a login client authenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoginClientKind {
    /// Interactive login through the web UI.
    BrowserSession,

    /// Programmatic login with a personal access token.
    PersonalAccessToken,
}

impl LoginClientKind {
    /// Classify a client name. Only the exact web UI name is a browser
    /// session.
    #[must_use]
    pub fn classify(client_name: &str) -> Self {
        if client_name == ClientNames::WEB_UI {
            LoginClientKind::BrowserSession
        } else {
            LoginClientKind::PersonalAccessToken
        }
    }

    /// Heading shown above the client's last-login time.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            LoginClientKind::BrowserSession => "Last logged in to this web application (UTC):",
            LoginClientKind::PersonalAccessToken => {
                "Last logged in using a Galasa personal access token (UTC):"
            }
        }
    }
}

/// A login client ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedLoginClient {
    /// Client name, verbatim.
    pub client_name: String,

    /// Parsed last-login instant.
    pub last_login: Option<DateTime<Utc>>,
}

impl NormalizedLoginClient {
    #[must_use]
    pub fn kind(&self) -> LoginClientKind {
        LoginClientKind::classify(&self.client_name)
    }

    /// Last login as `YYYY-MM-DD HH:MM:SS` (UTC), or [`NO_LAST_LOGIN`].
    #[must_use]
    pub fn last_login_display(&self) -> String {
        self.last_login.map_or_else(
            || NO_LAST_LOGIN.to_string(),
            |at| at.format(DISPLAY_FORMAT).to_string(),
        )
    }
}

/// Normalize one raw login-client record.
#[must_use]
pub fn normalize(raw: RawLoginClient) -> NormalizedLoginClient {
    let last_login = raw.last_login.as_deref().and_then(parse_timestamp);
    if last_login.is_none() {
        if let Some(text) = raw.last_login.as_deref().filter(|t| !t.trim().is_empty()) {
            tracing::debug!(
                client = %raw.client_name,
                last_login = text,
                "Unparsable lastLogin, treating as absent"
            );
        }
    }

    NormalizedLoginClient {
        client_name: raw.client_name,
        last_login,
    }
}

/// Parse a backend timestamp. Accepts RFC 3339, naive date-times (as UTC)
/// and plain dates (midnight UTC). Blank or unrecognized text is `None`.
#[must_use]
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(at) = DateTime::parse_from_rfc3339(text) {
        return Some(at.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn raw(name: &str, last_login: Option<&str>) -> RawLoginClient {
        RawLoginClient {
            client_name: name.to_string(),
            last_login: last_login.map(str::to_string),
            ..RawLoginClient::default()
        }
    }

    #[test]
    fn test_parse_rfc3339() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2024-01-01T10:00:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-01T12:00:00+02:00"), Some(expected));
        assert_eq!(
            parse_timestamp("2024-01-01T10:00:00.250Z").map(|t| t.timestamp_millis()),
            Some(expected.timestamp_millis() + 250)
        );
    }

    #[test]
    fn test_parse_naive_and_date_only_as_utc() {
        assert_eq!(
            parse_timestamp("2024-03-05T08:30:00"),
            Some(Utc.with_ymd_and_hms(2024, 3, 5, 8, 30, 0).unwrap())
        );
        assert_eq!(
            parse_timestamp("2024-03-05 08:30:00.5").map(|t| t.timestamp_millis()),
            Some(
                Utc.with_ymd_and_hms(2024, 3, 5, 8, 30, 0)
                    .unwrap()
                    .timestamp_millis()
                    + 500
            )
        );
        assert_eq!(
            parse_timestamp("2024-03-05"),
            Some(Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for text in ["", "   ", "yesterday", "2024-13-01T00:00:00Z", "1704103200"] {
            assert_eq!(parse_timestamp(text), None, "{text:?} should not parse");
        }
    }

    #[test]
    fn test_normalize_web_ui_with_timestamp() {
        let client = normalize(raw("web-ui", Some("2024-01-01T10:00:00Z")));
        assert_eq!(client.client_name, "web-ui");
        assert_eq!(
            client.last_login,
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap())
        );
        assert_eq!(client.kind(), LoginClientKind::BrowserSession);
    }

    #[test]
    fn test_normalize_token_client_without_timestamp() {
        let client = normalize(raw("pat-123", None));
        assert_eq!(
            client,
            NormalizedLoginClient {
                client_name: "pat-123".into(),
                last_login: None,
            }
        );
        assert_eq!(client.kind(), LoginClientKind::PersonalAccessToken);
    }

    #[test]
    fn test_normalize_unparsable_and_empty_timestamps_are_absent() {
        assert!(normalize(raw("web-ui", Some("not a date"))).last_login.is_none());
        assert!(normalize(raw("web-ui", Some(""))).last_login.is_none());
    }

    #[test]
    fn test_classify_only_exact_web_ui_is_browser_session() {
        assert_eq!(
            LoginClientKind::classify("web-ui"),
            LoginClientKind::BrowserSession
        );
        for name in ["Web-UI", "web-ui ", "rest-api", "pat-123", ""] {
            assert_eq!(
                LoginClientKind::classify(name),
                LoginClientKind::PersonalAccessToken,
                "{name:?}"
            );
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(
            LoginClientKind::BrowserSession.label(),
            "Last logged in to this web application (UTC):"
        );
        assert_eq!(
            LoginClientKind::PersonalAccessToken.label(),
            "Last logged in using a Galasa personal access token (UTC):"
        );
    }

    #[test]
    fn test_last_login_display() {
        let client = normalize(raw("web-ui", Some("2024-01-01T10:00:00Z")));
        assert_eq!(client.last_login_display(), "2024-01-01 10:00:00");
        assert_eq!(normalize(raw("pat", None)).last_login_display(), NO_LAST_LOGIN);
    }

    #[test]
    fn test_from_raw_preserves_order_and_length() {
        let names = ["pat-b", "web-ui", "pat-a", "pat-b"];
        let user = RawUserData {
            login_id: Some("alice".into()),
            clients: Some(
                names
                    .iter()
                    .map(|n| raw(n, Some("garbage")))
                    .collect(),
            ),
            ..RawUserData::default()
        };

        let profile = UserProfile::from_raw(user);
        let got: Vec<&str> = profile
            .clients
            .iter()
            .map(|c| c.client_name.as_str())
            .collect();
        assert_eq!(got, names);
        assert!(profile.clients.iter().all(|c| c.last_login.is_none()));
    }

    #[test]
    fn test_from_raw_without_clients_is_empty() {
        let profile = UserProfile::from_raw(RawUserData {
            login_id: Some("bob".into()),
            ..RawUserData::default()
        });
        assert_eq!(profile.login_id.as_deref(), Some("bob"));
        assert!(profile.clients.is_empty());
    }

    #[test]
    fn test_top_level_timestamps_carried_raw_and_parsed_on_demand() {
        let profile = UserProfile::from_raw(RawUserData {
            web_last_login: Some("2024-02-02T09:15:00Z".into()),
            rest_api_last_login: Some("whenever".into()),
            ..RawUserData::default()
        });
        assert_eq!(
            profile.web_last_login.as_deref(),
            Some("2024-02-02T09:15:00Z")
        );
        assert_eq!(
            profile.web_last_login_at(),
            Some(Utc.with_ymd_and_hms(2024, 2, 2, 9, 15, 0).unwrap())
        );
        assert_eq!(profile.rest_api_last_login.as_deref(), Some("whenever"));
        assert!(profile.rest_api_last_login_at().is_none());
    }
}
