//! Configuration management for the Swasth Kadam host
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. An explicit file passed with `--config`
//! 4. Environment variables (prefix: SK__)

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use swasth_kadam_shared::tracking::{HealthScoreAveraging, SummaryOptions, DEFAULT_DAILY_CALORIE_GOAL};
use swasth_kadam_shared::DayBoundary;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub tracking: TrackingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the key-value document lives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub file_name: String,
}

/// Which calendar a day belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayBoundaryKind {
    Local,
    Utc,
    FixedOffset,
}

/// Tracking aggregation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingConfig {
    pub day_boundary: DayBoundaryKind,
    /// Only used with `fixed_offset`
    pub utc_offset_minutes: i32,
    pub health_score_averaging: HealthScoreAveraging,
    pub daily_calorie_goal: f64,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// JSON in production, pretty otherwise
    #[default]
    Auto,
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

/// Per-user data directory, falling back to the working directory
fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("swasth-kadam"))
        .unwrap_or_else(|| PathBuf::from(".swasth-kadam"))
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig {
                data_dir: default_data_dir(),
                file_name: "store.json".to_string(),
            },
            tracking: TrackingConfig {
                day_boundary: DayBoundaryKind::Local,
                utc_offset_minutes: 0,
                health_score_averaging: HealthScoreAveraging::Pairwise,
                daily_calorie_goal: DEFAULT_DAILY_CALORIE_GOAL,
            },
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. `explicit_file`, which must exist when given
    /// 4. Environment variables with SK__ prefix
    pub fn load(explicit_file: Option<&Path>) -> AppResult<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let mut builder = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&AppConfig::default())?)
            // Load from environment-specific config file
            .add_source(config::File::with_name(&config_file).required(false));

        if let Some(path) = explicit_file {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config = builder
            // Override with environment variables (SK__ prefix)
            // e.g., SK__TRACKING__DAY_BOUNDARY=utc sets tracking.day_boundary
            .add_source(
                config::Environment::with_prefix("SK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let loaded: AppConfig = config.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Reject values no command can work with
    pub fn validate(&self) -> AppResult<()> {
        let mut errors = Vec::new();

        if self.storage.file_name.trim().is_empty() {
            errors.push("storage.file_name must not be empty".to_string());
        }
        let goal = self.tracking.daily_calorie_goal;
        if goal.is_nan() || goal <= 0.0 {
            errors.push("tracking.daily_calorie_goal must be positive".to_string());
        }
        if self.tracking.day_boundary == DayBoundaryKind::FixedOffset
            && DayBoundary::fixed_offset(self.tracking.utc_offset_minutes).is_none()
        {
            errors.push(format!(
                "tracking.utc_offset_minutes {} is outside ±24 hours",
                self.tracking.utc_offset_minutes
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::InvalidConfig(errors.join("; ")))
        }
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }

    /// Full path of the store document
    pub fn store_path(&self) -> PathBuf {
        self.storage.data_dir.join(&self.storage.file_name)
    }

    pub fn day_boundary(&self) -> DayBoundary {
        match self.tracking.day_boundary {
            DayBoundaryKind::Local => DayBoundary::Local,
            DayBoundaryKind::Utc => DayBoundary::Utc,
            // Range is checked in validate()
            DayBoundaryKind::FixedOffset => DayBoundary::fixed_offset(self.tracking.utc_offset_minutes)
                .unwrap_or(DayBoundary::Utc),
        }
    }

    pub fn summary_options(&self) -> SummaryOptions {
        SummaryOptions {
            boundary: self.day_boundary(),
            averaging: self.tracking.health_score_averaging,
            daily_calorie_goal: self.tracking.daily_calorie_goal,
        }
    }

    /// Whether logs should be emitted as JSON
    pub fn json_logs(&self) -> bool {
        match self.logging.format {
            LogFormat::Auto => Self::is_production(),
            LogFormat::Pretty => false,
            LogFormat::Json => true,
        }
    }

    /// Effective configuration rendered as TOML
    pub fn to_toml(&self) -> AppResult<String> {
        toml::to_string_pretty(self).map_err(|e| AppError::InvalidConfig(e.to_string()))
    }
}
