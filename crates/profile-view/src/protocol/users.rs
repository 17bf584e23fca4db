//! `/users` response document.
//!
//! The backend payload is loosely typed. Only the envelope is strict: the body
//! must be a JSON object with a `userData` object inside. Every field below
//! `userData` is optional and degrades to "absent" when it has the wrong type,
//! so one odd field never rejects the whole profile.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{ProfileError, ProfileResult};

/// Envelope key holding the profile object.
const USER_DATA: &str = "userData";

/// The `userData` object as received.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawUserData {
    /// Identifier of the authenticated principal.
    #[serde(default, rename = "loginId", deserialize_with = "lenient_string")]
    pub login_id: Option<String>,

    /// Raw timestamp of the last browser login.
    #[serde(default, rename = "webLastLogin", deserialize_with = "lenient_string")]
    pub web_last_login: Option<String>,

    /// Raw timestamp of the last REST API login.
    #[serde(
        default,
        rename = "restApiLastLogin",
        deserialize_with = "lenient_string"
    )]
    pub rest_api_last_login: Option<String>,

    /// Login clients in backend order. `None` when the key is absent or is
    /// not an array.
    #[serde(default, deserialize_with = "lenient_clients")]
    pub clients: Option<Vec<RawLoginClient>>,
}

/// One login-client record as received.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawLoginClient {
    /// Client identifier. Missing or non-text values become the empty string.
    #[serde(default, rename = "clientName", deserialize_with = "lenient_name")]
    pub client_name: String,

    /// Raw last-login timestamp.
    #[serde(default, rename = "lastLogin", deserialize_with = "lenient_string")]
    pub last_login: Option<String>,

    /// Forward-compatible storage for additional fields.
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl RawLoginClient {
    /// Build a record from an arbitrary array element. Non-object elements
    /// still yield a (blank) record so the client list keeps its length.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }
}

/// Parse a `/users` response body into its `userData` object.
///
/// Fails with [`ProfileError::MalformedBody`] when the body is not JSON,
/// is not an object, or lacks a `userData` object. The envelope is checked
/// on the JSON value because derived struct deserializers also accept arrays.
pub fn parse_users_body(body: &[u8]) -> ProfileResult<RawUserData> {
    let mut document: Value =
        serde_json::from_slice(body).map_err(|e| malformed(e.to_string()))?;

    let user_data = document
        .as_object_mut()
        .ok_or_else(|| malformed("response body is not a JSON object"))?
        .remove(USER_DATA)
        .ok_or_else(|| malformed("missing field `userData`"))?;

    if !user_data.is_object() {
        return Err(malformed("`userData` is not a JSON object"));
    }

    serde_json::from_value(user_data).map_err(|e| malformed(e.to_string()))
}

fn malformed(reason: impl Into<String>) -> ProfileError {
    ProfileError::MalformedBody {
        reason: reason.into(),
    }
}

// ─── Lenient field deserializers ────────────────────────────────────────

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

fn lenient_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_string(deserializer)?.unwrap_or_default())
}

fn lenient_clients<'de, D>(deserializer: D) -> Result<Option<Vec<RawLoginClient>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => Some(
            items
                .into_iter()
                .map(RawLoginClient::from_value)
                .collect(),
        ),
        _ => None,
    })
}
