//! # Configuration
//!
//! [`ProfileConfig`] holds everything needed to reach the profile endpoint.
//!
//! ## Loading Priority
//!
//! Configuration is loaded from the first source that provides a value:
//!
//! 1. Explicit struct fields (programmatic construction)
//! 2. Environment variables (`PROFILE_VIEW_URL`, `PROFILE_VIEW_TOKEN`)
//! 3. TOML config file at an explicit path
//! 4. `./profile-view.toml` in the current directory
//! 5. `~/.config/profile-view/profile-view.toml`
//!
//! Individual fields can always be overridden by environment variables,
//! even when loading from a file.

use reqwest::Url;
use serde::{Deserialize, Serialize};
#[cfg(feature = "config-toml")]
use std::path::{Path, PathBuf};

use crate::error::{ProfileError, ProfileResult};
use crate::protocol::constants::Endpoints;

/// Default backend origin.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Default connection-establishment timeout in seconds.
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Environment variable naming the backend origin.
pub const ENV_URL: &str = "PROFILE_VIEW_URL";

/// Environment variable carrying the bearer token.
pub const ENV_TOKEN: &str = "PROFILE_VIEW_TOKEN";

/// Environment variable pointing at a config file.
#[cfg(feature = "config-toml")]
pub const ENV_CONFIG: &str = "PROFILE_VIEW_CONFIG";

#[cfg(feature = "config-toml")]
const CONFIG_FILE_NAME: &str = "profile-view.toml";

/// Configuration for reaching the profile endpoint.
///
/// # Examples
///
/// ```
/// use profile_view::config::ProfileConfig;
///
/// let config = ProfileConfig::new("https://backend.example.com");
/// assert_eq!(config.users_path, "/users");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Backend origin the users path is resolved against.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the profile endpoint. Resolved like a browser resolves an
    /// absolute path, so any path on `base_url` is replaced.
    #[serde(default = "default_users_path")]
    pub users_path: String,

    /// Bearer token sent as the request's credentials.
    #[serde(default)]
    pub auth_token: Option<String>,

    /// Allow invalid TLS certificates for non-localhost hosts.
    /// Only enable this for development/testing.
    #[serde(default)]
    pub allow_insecure_tls: bool,

    /// Timeout configuration.
    #[serde(default)]
    pub timeouts: TimeoutConfig,
}

/// Timeout settings for the profile request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    /// Timeout for establishing the connection, in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Timeout for the whole request, in seconds. Unset means the load
    /// waits for as long as the backend takes.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

// ─── Defaults ───────────────────────────────────────────────────────────

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_users_path() -> String {
    Endpoints::USERS.to_string()
}

fn default_connect_timeout() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            request_timeout_secs: None,
        }
    }
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

// ─── ProfileConfig impl ────────────────────────────────────────────────

impl ProfileConfig {
    /// Create a config for a backend origin (all other fields use defaults).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            users_path: default_users_path(),
            auth_token: None,
            allow_insecure_tls: false,
            timeouts: TimeoutConfig::default(),
        }
    }

    /// Load config from environment variables.
    ///
    /// Required: `PROFILE_VIEW_URL`
    ///
    /// Optional: `PROFILE_VIEW_TOKEN`
    pub fn from_env() -> ProfileResult<Self> {
        let base_url = std::env::var(ENV_URL).map_err(|_| ProfileError::ConfigError {
            reason: format!("{ENV_URL} environment variable not set"),
        })?;

        let mut config = Self::new(base_url);
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load config from a TOML file, with environment variable overrides.
    ///
    /// Environment variables take precedence over file values for
    /// `base_url` and `auth_token`.
    #[cfg(feature = "config-toml")]
    pub fn from_file(path: impl AsRef<Path>) -> ProfileResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| ProfileError::ConfigError {
            reason: format!("Failed to read config file '{}': {}", path.display(), e),
        })?;
        let mut config: Self = toml::from_str(&contents)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Discover and load config from the standard search path:
    ///
    /// 1. Explicit path (if `Some`)
    /// 2. `PROFILE_VIEW_CONFIG` environment variable
    /// 3. `./profile-view.toml`
    /// 4. `~/.config/profile-view/profile-view.toml`
    ///
    /// Falls back to environment-variable-only config if no file is found.
    #[cfg(feature = "config-toml")]
    pub fn discover(explicit_path: Option<&Path>) -> ProfileResult<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        if let Ok(path) = std::env::var(ENV_CONFIG) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        let local_path = PathBuf::from(CONFIG_FILE_NAME);
        if local_path.exists() {
            return Self::from_file(&local_path);
        }

        if let Some(config_path) = dirs_config_path() {
            if config_path.exists() {
                return Self::from_file(&config_path);
            }
        }

        Self::from_env()
    }

    /// Returns `true` if invalid TLS certificates should be accepted.
    ///
    /// Always allowed for `localhost`, `127.0.0.1` and `[::1]` (local
    /// backends commonly run with self-signed certs). For other hosts,
    /// `allow_insecure_tls` must be explicitly set.
    #[must_use]
    pub fn should_accept_invalid_certs(&self) -> bool {
        if is_localhost(&self.base_url) {
            return true;
        }
        self.allow_insecure_tls
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(ENV_URL) {
            self.base_url = url;
        }
        if let Ok(token) = std::env::var(ENV_TOKEN) {
            self.auth_token = Some(token);
        }
    }
}

// ─── Helpers ────────────────────────────────────────────────────────────

/// Check if a URL's host is a loopback name. Unparsable URLs are not local.
fn is_localhost(url: &str) -> bool {
    Url::parse(url).is_ok_and(|parsed| {
        matches!(
            parsed.host_str(),
            Some("localhost" | "127.0.0.1" | "[::1]")
        )
    })
}

/// Platform-appropriate config file path.
#[cfg(feature = "config-toml")]
fn dirs_config_path() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var("APPDATA")
            .ok()
            .map(|dir| PathBuf::from(dir).join("profile-view").join(CONFIG_FILE_NAME))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME").ok().map(|dir| {
            PathBuf::from(dir)
                .join(".config")
                .join("profile-view")
                .join(CONFIG_FILE_NAME)
        })
    }
}
