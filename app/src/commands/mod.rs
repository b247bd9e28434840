//! Command handlers
//!
//! Each handler writes user-facing output to the given writer; logs go
//! through `tracing` to stderr.

pub mod backup;
pub mod foods;
pub mod profile;
pub mod register;
pub mod track;

use crate::cli::{
    BackupCommand, Command, ConfigCommand, FoodsCommand, ProfileCommand, ThemeCommand, TrackCommand,
};
use crate::error::AppResult;
use crate::state::AppState;
use chrono::{DateTime, Utc};
use std::io::Write;
use swasth_kadam_shared::KeyValueStore;

/// Execute one parsed command at instant `now`
pub fn run<S: KeyValueStore, W: Write>(
    command: Command,
    state: &mut AppState<S>,
    now: DateTime<Utc>,
    out: &mut W,
) -> AppResult<()> {
    match command {
        Command::Foods { action } => match action {
            FoodsCommand::List { category } => foods::list(out, category),
            FoodsCommand::Search { query } => foods::search(out, &query),
            FoodsCommand::Show { id } => foods::show(out, id),
            FoodsCommand::Popular => foods::popular(out),
        },
        Command::Track { action } => match action {
            TrackCommand::Add { food_id } => track::add(state, out, food_id, now),
            TrackCommand::Remove { food_id, at } => track::remove(state, out, food_id, at),
            TrackCommand::Today => track::today(state, out, now),
            TrackCommand::Details => track::details(state, out, now),
            TrackCommand::Timeline => track::timeline_view(state, out, now),
        },
        Command::Register(args) => register::register(state, out, &args),
        Command::Profile { action } => match action {
            ProfileCommand::Show => profile::show(state, out),
            ProfileCommand::SignOut => profile::sign_out(state, out),
        },
        Command::Theme { action } => match action {
            ThemeCommand::Show => profile::show_theme(state, out),
            ThemeCommand::Set { theme } => profile::set_theme(state, out, theme),
        },
        Command::Backup { action } => match action {
            BackupCommand::Export { format, output } => {
                backup::export(state, out, format, output.as_deref())
            }
            BackupCommand::Import { path } => backup::import(state, out, &path),
        },
        Command::Config { action } => match action {
            ConfigCommand::Show => {
                write!(out, "{}", state.config().to_toml()?)?;
                Ok(())
            }
        },
    }
}
