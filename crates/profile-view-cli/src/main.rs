//! # profile-view-cli
//!
//! Shows the signed-in user's profile and recent login activity.
//! Loads the profile once from the backend's `/users` endpoint and prints
//! it, or the error notification if the load fails.

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;

mod app;

use app::{print_pretty_json, render_state, state_json};

use profile_view::{ProfileClient, ProfileConfig, ProfileDataController};

/// Show the signed-in user's profile and recent login activity.
#[derive(Parser)]
#[command(name = "profile-view-cli", version, about)]
struct Cli {
    /// Path to profile-view.toml config file
    #[arg(short, long)]
    config: Option<String>,

    /// Backend URL override
    #[arg(long)]
    url: Option<String>,

    /// Bearer token override
    #[arg(long)]
    token: Option<String>,

    /// Print the view state as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Enable verbose logging (set RUST_LOG for fine-grained control)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("profile_view=debug,profile_view_cli=debug")
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("profile_view=warn")
            .with_writer(std::io::stderr)
            .init();
    }

    let mut config = match ProfileConfig::discover(cli.config.as_deref().map(Path::new)) {
        Ok(c) => c,
        Err(e) => {
            if cli.config.is_some() {
                return Err(e.into());
            }
            tracing::debug!(error = %e, "No config found, using defaults");
            ProfileConfig::default()
        }
    };

    if let Some(url) = cli.url {
        config.base_url = url;
    }
    if let Some(token) = cli.token {
        config.auth_token = Some(token);
    }

    let controller = ProfileDataController::new(ProfileClient::new(&config)?);

    // The view is mounted once per run, so load exactly once.
    let state = tokio::select! {
        state = controller.load() => state,
        _ = tokio::signal::ctrl_c() => {
            eprintln!("Interrupted while loading profile.");
            return Ok(ExitCode::from(130));
        }
    };

    if cli.json {
        print_pretty_json(&state_json(&state));
    } else if state.is_error() {
        eprint!("{}", render_state(&state));
    } else {
        print!("{}", render_state(&state));
    }

    Ok(if state.is_error() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
