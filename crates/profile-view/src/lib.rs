//! # profile-view
//!
//! Loads the signed-in user's profile and recent login activity from the
//! backend's `/users` endpoint and turns it into a typed view model.
//!
//! ## Quick Start
//!
//! ```ignore
//! use profile_view::{ProfileClient, ProfileConfig, ProfileDataController};
//!
//! #[tokio::main]
//! async fn main() -> profile_view::ProfileResult<()> {
//!     // Load config from environment or profile-view.toml
//!     let config = ProfileConfig::discover(None)?;
//!
//!     let controller = ProfileDataController::new(ProfileClient::new(&config)?);
//!
//!     // Call once when the view becomes active
//!     let state = controller.load().await;
//!     if let Some(profile) = &state.profile {
//!         for client in &profile.clients {
//!             println!("{} {}", client.kind().label(), client.last_login_display());
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Layers
//!
//! | Layer | Type | Role |
//! |-------|------|------|
//! | Transport | [`ProfileClient`] | One `GET /users`, status check, body parse |
//! | View model | [`UserProfile`] | Normalized, order-preserving login clients |
//! | Lifecycle | [`ProfileDataController`] | `Idle → Loading → Success / Failure` state |
//!
//! ## Configuration
//!
//! See [`ProfileConfig`] for the full configuration reference.
//! The simplest setup uses environment variables:
//!
//! ```bash
//! export PROFILE_VIEW_URL="https://backend.example.com"
//! export PROFILE_VIEW_TOKEN="your-access-token"
//! ```
//!
//! Or a `profile-view.toml` file:
//!
//! ```toml
//! base_url = "https://backend.example.com"
//! auth_token = "your-access-token"
//! ```

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod profile;
pub mod protocol;

// ─── Public re-exports ──────────────────────────────────────────────────

pub use client::{ProfileClient, ProfileSource};
pub use config::ProfileConfig;
pub use controller::{LoadStatus, ProfileDataController, ProfileViewState};
pub use error::{FailureKind, ProfileError, ProfileResult};
pub use profile::{LoginClientKind, NormalizedLoginClient, UserProfile, normalize};
