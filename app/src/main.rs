//! Swasth Kadam command-line host
//!
//! Tracks foods against a static catalog and keeps all data in a single
//! JSON document on this device.
//!
//! ## Architecture
//!
//! - CLI: argument parsing and dispatch
//! - Commands: output formatting per subcommand
//! - Shared crate: catalog, tracking aggregation, registration wizard
//! - File store: key-value document on disk

use anyhow::Result;
use chrono::{SubsecRound, Utc};
use clap::Parser;
use std::io::{self, Write};
use swasth_kadam_app::{cli::Cli, commands, config::AppConfig, state::AppState};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Load configuration
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(data_dir) = &cli.data_dir {
        config.storage.data_dir = data_dir.clone();
    }

    init_tracing(&config, cli.verbose);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if AppConfig::is_production() { "production" } else { "development" },
        "Starting Swasth Kadam"
    );
    debug!(store = %config.store_path().display(), boundary = %config.day_boundary(), "Configuration loaded");

    let mut state = AppState::open(config);

    // Millisecond precision matches timestamps written by the browser shell
    let now = Utc::now().trunc_subsecs(3);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    commands::run(cli.command, &mut state, now, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Initialize tracing/logging on stderr
fn init_tracing(config: &AppConfig, verbose: bool) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            "swasth_kadam_app=debug,swasth_kadam_shared=debug".into()
        } else {
            "swasth_kadam_app=info,swasth_kadam_shared=info".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if config.json_logs() {
        // JSON logging for production (better for log aggregation)
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(io::stderr))
            .init();
    }
}
