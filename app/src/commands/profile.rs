//! Identity, session and theme commands

use crate::error::AppResult;
use crate::state::AppState;
use std::io::Write;
use swasth_kadam_shared::{KeyValueStore, ProfileRepository, Theme};
use tracing::info;

pub fn show<S: KeyValueStore, W: Write>(state: &AppState<S>, out: &mut W) -> AppResult<()> {
    let repo = state.repo();
    match repo.load_user() {
        Some(user) => {
            writeln!(out, "[{}] {}", user.initial, user.name)?;
            if let Some(email) = &user.email {
                writeln!(out, "Email:     {}", email)?;
            }
            if let Some(age) = user.age {
                writeln!(out, "Age:       {}", age)?;
            }
        }
        None => writeln!(out, "No profile stored")?,
    }
    writeln!(
        out,
        "Signed in: {}",
        if repo.is_logged_in() { "yes" } else { "no" }
    )?;
    writeln!(out, "Theme:     {}", repo.theme())?;
    Ok(())
}

pub fn sign_out<S: KeyValueStore, W: Write>(state: &mut AppState<S>, out: &mut W) -> AppResult<()> {
    state.repo_mut().sign_out()?;
    info!("User signed out");
    writeln!(out, "Signed out. Your tracked foods are kept on this device.")?;
    Ok(())
}

pub fn show_theme<S: KeyValueStore, W: Write>(state: &AppState<S>, out: &mut W) -> AppResult<()> {
    writeln!(out, "{}", state.repo().theme())?;
    Ok(())
}

pub fn set_theme<S: KeyValueStore, W: Write>(
    state: &mut AppState<S>,
    out: &mut W,
    theme: Theme,
) -> AppResult<()> {
    state.repo_mut().set_theme(theme)?;
    info!(%theme, "Theme updated");
    writeln!(out, "Theme set to {}", theme)?;
    Ok(())
}
