//! # Profile Data Controller
//!
//! Owns the profile view state and drives one load per view activation:
//!
//! ```text
//! load():  Idle/Success/Failure ──► Loading ──┬─► Success(profile)
//!                                             └─► Failure(kind)
//! ```
//!
//! ## State publication
//!
//! The state lives in a `tokio::sync::watch` channel and every transition
//! replaces the whole [`ProfileViewState`] under the channel lock, so an
//! observer never sees a half-applied update (e.g. a new profile while the
//! status still says `Loading`).
//!
//! ## Overlapping loads
//!
//! Each `load()` takes the next generation number when it enters `Loading`.
//! A load may only publish its outcome if no newer load has started since;
//! otherwise its response is dropped. The generation check and the publish
//! happen under the same lock. The newest load always settles the state,
//! so `Loading` is never left set once it completes.

use serde::Serialize;
use tokio::sync::watch;

use crate::client::ProfileSource;
use crate::error::FailureKind;
use crate::profile::UserProfile;

/// Lifecycle position of the profile view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
    /// No load has settled yet (or an error was acknowledged).
    Idle,

    /// A load is in flight. No profile is published meanwhile.
    Loading,

    /// The last load published a profile.
    Success,

    /// The last load failed; the profile was discarded.
    Failure(FailureKind),
}

/// Everything a renderer needs, as one immutable snapshot.
///
/// Invariant: a profile is present exactly when the status is `Success`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileViewState {
    pub status: LoadStatus,
    pub profile: Option<UserProfile>,
    /// Number of `load()` calls started on the controller.
    pub generation: u64,
}

impl Default for ProfileViewState {
    fn default() -> Self {
        Self {
            status: LoadStatus::Idle,
            profile: None,
            generation: 0,
        }
    }
}

impl ProfileViewState {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self.status, LoadStatus::Failure(_))
    }

    /// Why the last load failed, if it did.
    #[must_use]
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self.status {
            LoadStatus::Failure(kind) => Some(kind),
            _ => None,
        }
    }
}

/// Loads the current user's profile and publishes it as [`ProfileViewState`].
///
/// The controller never triggers itself; the host calls [`load`](Self::load)
/// once when the view becomes active.
pub struct ProfileDataController<S> {
    source: S,
    state: watch::Sender<ProfileViewState>,
}

impl<S: ProfileSource> ProfileDataController<S> {
    /// Create a controller in the `Idle` state.
    pub fn new(source: S) -> Self {
        let (state, _) = watch::channel(ProfileViewState::default());
        Self { source, state }
    }

    /// Current state snapshot.
    #[must_use]
    pub fn snapshot(&self) -> ProfileViewState {
        self.state.borrow().clone()
    }

    /// Subscribe to state changes. Each received value is a complete state.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ProfileViewState> {
        self.state.subscribe()
    }

    /// Fetch, parse, normalize and publish the profile.
    ///
    /// Returns the state snapshot after this load settles. If a newer load
    /// started meanwhile, this load's outcome is discarded and the returned
    /// snapshot reflects the newer load instead.
    pub async fn load(&self) -> ProfileViewState {
        let mut generation = 0;
        self.state.send_modify(|state| {
            state.generation += 1;
            state.status = LoadStatus::Loading;
            state.profile = None;
            generation = state.generation;
        });
        tracing::debug!(generation, "Loading profile");

        let outcome = self
            .source
            .fetch_user_data()
            .await
            .map(UserProfile::from_raw);

        let published = self.state.send_if_modified(|state| {
            if state.generation != generation {
                return false;
            }
            match &outcome {
                Ok(profile) => {
                    state.profile = Some(profile.clone());
                    state.status = LoadStatus::Success;
                }
                Err(e) => {
                    state.profile = None;
                    state.status =
                        LoadStatus::Failure(e.kind().unwrap_or(FailureKind::Network));
                }
            }
            true
        });

        match (&outcome, published) {
            (_, false) => {
                tracing::debug!(generation, "Discarding superseded profile response");
            }
            (Ok(profile), true) => {
                tracing::info!(
                    generation,
                    login_id = profile.login_id.as_deref().unwrap_or("-"),
                    clients = profile.clients.len(),
                    "Profile loaded"
                );
            }
            (Err(e), true) => {
                tracing::warn!(generation, error = %e, "Failed to load profile");
            }
        }

        self.snapshot()
    }

    /// Dismiss a failure: `Failure` becomes `Idle`. No effect in any other
    /// state.
    pub fn acknowledge_error(&self) {
        self.state.send_if_modified(|state| {
            if !state.is_error() {
                return false;
            }
            state.status = LoadStatus::Idle;
            true
        });
    }
}
