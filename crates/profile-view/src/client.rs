//! # Profile HTTP Client
//!
//! Low-level transport for the profile endpoint: one `GET /users` per call,
//! status check, body parse. Nothing is cached or retried.
//!
//! The endpoint path is resolved against the configured base URL the way a
//! browser resolves an absolute path, so `https://host/app/` + `/users`
//! requests `https://host/users`.
//!
//! [`ProfileSource`] is the seam the
//! [`ProfileDataController`](crate::controller::ProfileDataController) fetches
//! through; [`ProfileClient`] is its HTTP implementation.

use std::future::Future;
use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderValue};
use reqwest::{Client, Url};

use crate::config::ProfileConfig;
use crate::error::{ProfileError, ProfileResult};
use crate::protocol::users::{RawUserData, parse_users_body};

/// Anything that can produce the raw `userData` object for the current user.
pub trait ProfileSource: Send + Sync {
    /// Fetch and parse the current user's `userData`.
    fn fetch_user_data(&self) -> impl Future<Output = ProfileResult<RawUserData>> + Send;
}

/// HTTP client for the `/users` endpoint.
#[derive(Debug, Clone)]
pub struct ProfileClient {
    http: Client,
    users_url: Url,
    auth_token: Option<String>,
    request_timeout: Option<Duration>,
}

impl ProfileClient {
    /// Build a client from config. Fails if the base URL or users path is
    /// not a valid URL, or the HTTP client cannot be constructed.
    pub fn new(config: &ProfileConfig) -> ProfileResult<Self> {
        let users_url = resolve_users_url(&config.base_url, &config.users_path)?;

        let builder = Client::builder()
            .connect_timeout(Duration::from_secs(config.timeouts.connect_timeout_secs));
        #[cfg(any(feature = "rustls-tls", feature = "native-tls"))]
        let builder = builder.danger_accept_invalid_certs(config.should_accept_invalid_certs());

        let http = builder.build().map_err(|e| ProfileError::ConfigError {
            reason: format!("HTTP client configuration failed: {e}"),
        })?;

        Ok(Self {
            http,
            users_url,
            auth_token: config.auth_token.clone(),
            request_timeout: config.timeouts.request_timeout_secs.map(Duration::from_secs),
        })
    }

    /// The fully resolved endpoint URL.
    #[must_use]
    pub fn users_url(&self) -> &Url {
        &self.users_url
    }

    /// Issue one `GET` to the users endpoint and parse the body.
    ///
    /// # Errors
    ///
    /// - [`ProfileError::Network`] if no response arrives or the body cannot be read.
    /// - [`ProfileError::Timeout`] if the opt-in request timeout elapses.
    /// - [`ProfileError::HttpStatus`] for any non-2xx status.
    /// - [`ProfileError::MalformedBody`] if the body is not a `userData` document.
    pub async fn fetch_user_data(&self) -> ProfileResult<RawUserData> {
        let url = self.users_url.as_str();

        let mut request = self
            .http
            .get(self.users_url.clone())
            .header(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let exchange = async {
            let response = request
                .send()
                .await
                .map_err(|e| ProfileError::from_transport(url, &e))?;

            let status = response.status();
            if !status.is_success() {
                return Err(ProfileError::HttpStatus {
                    status: status.as_u16(),
                });
            }

            response
                .bytes()
                .await
                .map_err(|e| ProfileError::from_transport(url, &e))
        };

        let body = match self.request_timeout {
            Some(limit) => tokio::time::timeout(limit, exchange)
                .await
                .map_err(|_| ProfileError::Timeout {
                    seconds: limit.as_secs(),
                })??,
            None => exchange.await?,
        };

        tracing::debug!(url, bytes = body.len(), "Received profile response");
        parse_users_body(&body)
    }
}

impl ProfileSource for ProfileClient {
    fn fetch_user_data(&self) -> impl Future<Output = ProfileResult<RawUserData>> + Send {
        ProfileClient::fetch_user_data(self)
    }
}

/// Resolve `users_path` against `base_url` with absolute-path semantics.
fn resolve_users_url(base_url: &str, users_path: &str) -> ProfileResult<Url> {
    let base = Url::parse(base_url).map_err(|e| ProfileError::ConfigError {
        reason: format!("Invalid base URL '{base_url}': {e}"),
    })?;

    let path = if users_path.starts_with('/') {
        users_path.to_string()
    } else {
        format!("/{users_path}")
    };

    base.join(&path).map_err(|e| ProfileError::ConfigError {
        reason: format!("Invalid users path '{users_path}': {e}"),
    })
}
