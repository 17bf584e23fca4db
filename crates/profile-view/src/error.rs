//! # Error Types
//!
//! Semantic error types for loading the user profile. Every variant carries
//! enough context to diagnose the problem without digging through logs.
//!
//! ## Failure Kinds
//!
//! The view state only exposes a boolean "error" flag to renderers, but the
//! cause is kept as a [`FailureKind`]. [`ProfileError::kind`] collapses the
//! load-time variants onto the three kinds a load can end in.

use thiserror::Error;

/// Convenient Result alias for profile operations.
pub type ProfileResult<T> = std::result::Result<T, ProfileError>;

/// Why a profile load ended in failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The request could not be sent, or the response body could not be read.
    Network,

    /// The endpoint answered with a non-2xx status.
    HttpStatus,

    /// The body was not JSON, or did not have the expected shape.
    MalformedBody,
}

/// All errors that can occur while configuring or loading a profile.
#[derive(Error, Debug)]
pub enum ProfileError {
    // ─── Transport ──────────────────────────────────────────────────
    /// The request never produced a response (DNS, connect, TLS, reset).
    #[error("Failed to reach profile endpoint at {url}: {reason}")]
    Network { url: String, reason: String },

    /// The opt-in request timeout elapsed.
    #[error("Profile request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    // ─── Response ───────────────────────────────────────────────────
    /// The endpoint answered with a non-success HTTP status.
    #[error("Profile endpoint returned HTTP {status}")]
    HttpStatus { status: u16 },

    /// The response body was not the expected `{ "userData": { ... } }` document.
    #[error("Malformed profile response: {reason}")]
    MalformedBody { reason: String },

    // ─── Config ─────────────────────────────────────────────────────
    /// Configuration file error (missing, malformed, or invalid values).
    #[error("Configuration error: {reason}")]
    ConfigError { reason: String },
}

impl ProfileError {
    /// The failure kind a load ends in for this error, or `None` for
    /// configuration-time errors that never reach the view state.
    #[must_use]
    pub fn kind(&self) -> Option<FailureKind> {
        match self {
            ProfileError::Network { .. } | ProfileError::Timeout { .. } => {
                Some(FailureKind::Network)
            }
            ProfileError::HttpStatus { .. } => Some(FailureKind::HttpStatus),
            ProfileError::MalformedBody { .. } => Some(FailureKind::MalformedBody),
            ProfileError::ConfigError { .. } => None,
        }
    }

    /// Build the error for a failed `reqwest` call against `url`.
    pub(crate) fn from_transport(url: &str, err: &reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return ProfileError::HttpStatus {
                status: status.as_u16(),
            };
        }
        ProfileError::Network {
            url: url.to_string(),
            reason: err.to_string(),
        }
    }
}

// ─── From impls for external error types ────────────────────────────────

#[cfg(feature = "config-toml")]
impl From<toml::de::Error> for ProfileError {
    fn from(err: toml::de::Error) -> Self {
        ProfileError::ConfigError {
            reason: err.to_string(),
        }
    }
}
