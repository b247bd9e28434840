//! Common test utilities for integration tests
//!
//! Each test gets its own temporary data directory and a fixed clock.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use clap::Parser;
use std::path::PathBuf;
use swasth_kadam_app::cli::Cli;
use swasth_kadam_app::commands;
use swasth_kadam_app::config::{AppConfig, DayBoundaryKind};
use swasth_kadam_app::error::AppResult;
use swasth_kadam_app::file_store::FileStore;
use swasth_kadam_app::state::AppState;
use tempfile::TempDir;

/// Test application wrapper
pub struct TestApp {
    pub dir: TempDir,
    pub state: AppState<FileStore>,
}

impl TestApp {
    /// Create a new test application over an empty data directory
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let state = AppState::open(test_config(&dir));
        Self { dir, state }
    }

    /// Rebuild state from disk, as a fresh process would
    pub fn reopen(&mut self) {
        self.state = AppState::open(test_config(&self.dir));
    }

    /// Run a command line at the given instant and capture stdout
    pub fn run_at(&mut self, args: &[&str], now: DateTime<Utc>) -> AppResult<String> {
        let cli = Cli::try_parse_from(std::iter::once("swasth-kadam").chain(args.iter().copied()))
            .expect("Failed to parse arguments");
        let mut out = Vec::new();
        commands::run(cli.command, &mut self.state, now, &mut out)?;
        Ok(String::from_utf8(out).expect("Output is not UTF-8"))
    }

    /// Run a command line at the default test instant
    pub fn run(&mut self, args: &[&str]) -> AppResult<String> {
        self.run_at(args, noon())
    }

    pub fn store_path(&self) -> PathBuf {
        self.state.config().store_path()
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

/// Test configuration: temp data dir and UTC days so dates are stable
pub fn test_config(dir: &TempDir) -> AppConfig {
    let mut config = AppConfig::default();
    config.storage.data_dir = dir.path().join("data");
    config.tracking.day_boundary = DayBoundaryKind::Utc;
    config
}

/// 2025-03-01 12:00:00 UTC
pub fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
}
