//! Command-line interface definition

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use swasth_kadam_shared::registration::{
    ActivityLevel, BloodPressure, BloodSugarLevel, CholesterolLevel, CookingFrequency, CookingOil,
    EatingOutFrequency, HouseholdSize, MedicalCondition, MonthlyOilUsage, NotificationPreference,
};
use swasth_kadam_shared::{FoodCategory, Theme};

#[derive(Parser, Debug)]
#[command(
    name = "swasth-kadam",
    version,
    about = "Swasth Kadam oil-awareness food tracker",
    long_about = "Log what you eat from a catalog of common Indian dishes and keep an eye on the day's oil intake."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Additional TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Data directory override
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Browse the food catalog
    Foods {
        #[command(subcommand)]
        action: FoodsCommand,
    },

    /// Log foods and review the day
    Track {
        #[command(subcommand)]
        action: TrackCommand,
    },

    /// Complete the registration wizard
    Register(RegisterArgs),

    /// Stored identity
    Profile {
        #[command(subcommand)]
        action: ProfileCommand,
    },

    /// Colour scheme preference
    Theme {
        #[command(subcommand)]
        action: ThemeCommand,
    },

    /// Export or import tracked foods
    Backup {
        #[command(subcommand)]
        action: BackupCommand,
    },

    /// Inspect the effective configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum FoodsCommand {
    /// List the catalog, optionally one category
    List {
        /// healthy, moderate or high
        #[arg(long, short = 'c')]
        category: Option<FoodCategory>,
    },

    /// Search names and descriptions
    Search {
        /// Case-insensitive text to look for
        query: String,
    },

    /// Show one catalog entry in full
    Show {
        /// Catalog id
        id: u32,
    },

    /// Suggested foods, a few from each category
    Popular,
}

#[derive(Subcommand, Debug)]
pub enum TrackCommand {
    /// Log a catalog food now
    Add {
        /// Catalog id
        food_id: u32,
    },

    /// Remove a logged food
    Remove {
        /// Catalog id
        food_id: u32,

        /// Log time as shown by `track timeline` (RFC 3339)
        #[arg(long)]
        at: DateTime<Utc>,
    },

    /// Today's totals, oil status and insights
    Today,

    /// Today's macros per food
    Details,

    /// Every logged food grouped by day
    Timeline,
}

#[derive(Args, Debug, Default, Clone)]
pub struct RegisterArgs {
    /// Full name
    #[arg(long)]
    pub name: Option<String>,

    /// Age in years (1-120)
    #[arg(long)]
    pub age: Option<u32>,

    #[arg(long)]
    pub email: Option<String>,

    /// Weight in kg (1-300)
    #[arg(long)]
    pub weight: Option<f64>,

    /// Height in cm (50-250)
    #[arg(long)]
    pub height: Option<f64>,

    /// sedentary, light, moderate or active
    #[arg(long)]
    pub activity: Option<ActivityLevel>,

    #[arg(long)]
    pub medical_condition: Option<MedicalCondition>,

    /// Details when the medical condition is "other"
    #[arg(long)]
    pub other_condition: Option<String>,

    /// 1, 2, 3-4, 5-6 or 7+
    #[arg(long)]
    pub household_size: Option<HouseholdSize>,

    #[arg(long)]
    pub cooking_frequency: Option<CookingFrequency>,

    /// Oil used most at home
    #[arg(long)]
    pub oil: Option<CookingOil>,

    /// below-1L, 1-2L, 3-5L or more-than-5L
    #[arg(long)]
    pub monthly_oil: Option<MonthlyOilUsage>,

    #[arg(long)]
    pub eating_out: Option<EatingOutFrequency>,

    #[arg(long)]
    pub cholesterol: Option<CholesterolLevel>,

    #[arg(long)]
    pub blood_sugar: Option<BloodSugarLevel>,

    #[arg(long)]
    pub blood_pressure: Option<BloodPressure>,

    #[arg(long)]
    pub digestive_issues: bool,

    /// daily, weekly or none
    #[arg(long)]
    pub notifications: Option<NotificationPreference>,

    /// Accept the terms and privacy policy
    #[arg(long)]
    pub accept_terms: bool,

    /// Stop after the health step and explore without full registration
    #[arg(long, conflicts_with = "accept_terms")]
    pub skip: bool,
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    /// Show the stored identity and session state
    Show,

    /// Clear the stored identity; tracked foods are kept
    SignOut,
}

#[derive(Subcommand, Debug)]
pub enum ThemeCommand {
    Show,

    Set {
        /// light or dark
        theme: Theme,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

#[derive(Subcommand, Debug)]
pub enum BackupCommand {
    /// Write tracked foods to stdout or a file
    Export {
        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,

        /// Destination file, stdout when omitted
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Replace tracked foods with a JSON backup
    Import {
        /// Backup file written by `backup export`
        path: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the effective configuration as TOML
    Show,
}
