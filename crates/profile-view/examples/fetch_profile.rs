//! Load the current user's profile once and print the login activity.
//!
//! ```bash
//! PROFILE_VIEW_URL=https://backend.example.com PROFILE_VIEW_TOKEN=... \
//!     cargo run --example fetch_profile
//! ```

use profile_view::{ProfileClient, ProfileConfig, ProfileDataController};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = ProfileConfig::discover(None).unwrap_or_else(|_| {
        println!("No config found, using default localhost URL");
        ProfileConfig::default()
    });

    let controller = ProfileDataController::new(ProfileClient::new(&config)?);
    println!("Loading profile from {}...", config.base_url);

    let state = controller.load().await;
    match (&state.profile, state.failure_kind()) {
        (Some(profile), _) => {
            println!("Logged in as {}", profile.login_id.as_deref().unwrap_or("?"));
            for client in &profile.clients {
                println!(
                    "  {:<24} {:?} {}",
                    client.client_name,
                    client.kind(),
                    client.last_login_display()
                );
            }
        }
        (None, kind) => println!("Profile load failed: {kind:?}"),
    }

    Ok(())
}
