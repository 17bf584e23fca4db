use std::fmt::Write as _;

use profile_view::{ProfileViewState, UserProfile};

/// Caption of the error notification.
pub const ERROR_TITLE: &str = "Internal Server Error";
pub const ERROR_CAPTION: &str = "Failed to fetch user profile data.";

/// Render a settled view state as the profile page text.
///
/// Loading shows a placeholder, failure shows the error notification, and
/// success shows user details followed by the recent login activity.
pub fn render_state(state: &ProfileViewState) -> String {
    let mut out = String::from("My Profile\n\n");

    if state.is_loading() {
        out.push_str("Loading...\n");
        return out;
    }

    if let Some(profile) = &state.profile {
        render_profile(&mut out, profile);
    }

    if state.is_error() {
        let _ = writeln!(out, "{ERROR_TITLE}: {ERROR_CAPTION}");
    }

    out
}

fn render_profile(out: &mut String, profile: &UserProfile) {
    out.push_str("User Details\n");
    let _ = writeln!(
        out,
        "  Currently logged in as: {}",
        profile.login_id.as_deref().unwrap_or_default()
    );

    out.push_str("\nRecent Login Activity\n");
    for client in &profile.clients {
        let _ = writeln!(
            out,
            "  {} {}",
            client.kind().label(),
            client.last_login_display()
        );
    }
}

/// Machine-readable form of the state: the renderer contract plus the
/// failure kind.
pub fn state_json(state: &ProfileViewState) -> serde_json::Value {
    serde_json::json!({
        "isLoading": state.is_loading(),
        "isError": state.is_error(),
        "failure": state.failure_kind(),
        "profile": state.profile,
    })
}

pub fn print_pretty_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(err) => {
            eprintln!("Failed to format JSON output: {err}");
            println!("{value}");
        }
    }
}
