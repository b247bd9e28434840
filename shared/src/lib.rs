//! Swasth Kadam Shared Library
//!
//! Domain logic for the Swasth Kadam oil-awareness tracker: the static food
//! catalog, daily tracking aggregation, the registration wizard and the
//! storage contracts. Used by the native host and the WASM bindings.

pub mod backup;
pub mod calendar;
pub mod catalog;
pub mod errors;
pub mod health_metrics;
pub mod models;
pub mod registration;
pub mod repository;
pub mod store;
pub mod tracking;
pub mod validation;

// Re-export commonly used items
pub use calendar::DayBoundary;
pub use errors::*;
pub use health_metrics::{assess_bmi, BmiAssessment, BmiCategory};
pub use models::{FoodCatalogEntry, FoodCategory, LoggedFood, Theme, UserData};
pub use registration::{
    persist_completion, transition, Action, CompletionOutcome, FieldUpdate, RegistrationForm,
    WizardState, WizardStep,
};
pub use repository::{LocalRepository, ProfileRepository, TrackedFoodRepository};
pub use store::{KeyValueStore, MemoryStore};
pub use tracking::{HealthScoreAveraging, SummaryOptions, Tracker};
