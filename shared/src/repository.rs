//! Typed repositories over a key-value store
//!
//! Reads never fail: a missing or corrupt value is logged and replaced by
//! its default. Writes surface store errors to the caller.

use crate::errors::StoreError;
use crate::models::{LoggedFood, Theme, UserData};
use crate::store::{keys, KeyValueStore};
use serde_json::Value;
use tracing::{debug, warn};

/// Persistence for the tracked-food list
pub trait TrackedFoodRepository {
    /// Stored entries, most recent first; empty when absent or corrupt
    fn load(&self) -> Vec<LoggedFood>;

    /// Replace the stored list
    fn save(&mut self, foods: &[LoggedFood]) -> Result<(), StoreError>;
}

impl<R: TrackedFoodRepository + ?Sized> TrackedFoodRepository for &mut R {
    fn load(&self) -> Vec<LoggedFood> {
        (**self).load()
    }

    fn save(&mut self, foods: &[LoggedFood]) -> Result<(), StoreError> {
        (**self).save(foods)
    }
}

/// Persistence for identity, session flag and theme
pub trait ProfileRepository {
    fn load_user(&self) -> Option<UserData>;

    fn save_user(&mut self, user: &UserData) -> Result<(), StoreError>;

    fn is_logged_in(&self) -> bool;

    fn set_logged_in(&mut self, logged_in: bool) -> Result<(), StoreError>;

    fn theme(&self) -> Theme;

    fn set_theme(&mut self, theme: Theme) -> Result<(), StoreError>;

    /// Clear the session flag and stored identity. Tracked foods and the
    /// theme are kept.
    fn sign_out(&mut self) -> Result<(), StoreError>;
}

/// Parse a stored tracked-food document
///
/// Anything other than a JSON array yields an empty list. Array elements
/// that are not valid records are skipped.
pub fn parse_tracked_foods(raw: &str) -> Vec<LoggedFood> {
    let items = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => items,
        Ok(_) => {
            warn!("Stored tracked foods are not a JSON array, ignoring");
            return Vec::new();
        }
        Err(e) => {
            warn!(error = %e, "Stored tracked foods are not valid JSON, ignoring");
            return Vec::new();
        }
    };

    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<LoggedFood>(item) {
            Ok(food) => Some(food),
            Err(e) => {
                warn!(index, error = %e, "Skipping invalid tracked food entry");
                None
            }
        })
        .collect()
}

/// Repository implementation backed by any [`KeyValueStore`]
#[derive(Debug, Clone, Default)]
pub struct LocalRepository<S> {
    store: S,
}

impl<S: KeyValueStore> LocalRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "Failed to read from store, using default");
                None
            }
        }
    }
}

impl<S: KeyValueStore> TrackedFoodRepository for LocalRepository<S> {
    fn load(&self) -> Vec<LoggedFood> {
        self.read(keys::TRACKED_FOODS)
            .map(|raw| parse_tracked_foods(&raw))
            .unwrap_or_default()
    }

    fn save(&mut self, foods: &[LoggedFood]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(foods)?;
        self.store.set(keys::TRACKED_FOODS, &raw)?;
        debug!(count = foods.len(), "Saved tracked foods");
        Ok(())
    }
}

impl<S: KeyValueStore> ProfileRepository for LocalRepository<S> {
    fn load_user(&self) -> Option<UserData> {
        let raw = self.read(keys::USER_DATA)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(error = %e, "Stored user data is invalid, ignoring");
                None
            }
        }
    }

    fn save_user(&mut self, user: &UserData) -> Result<(), StoreError> {
        let raw = serde_json::to_string(user)?;
        self.store.set(keys::USER_DATA, &raw)
    }

    fn is_logged_in(&self) -> bool {
        self.read(keys::USER_LOGGED_IN).as_deref() == Some("true")
    }

    fn set_logged_in(&mut self, logged_in: bool) -> Result<(), StoreError> {
        if logged_in {
            self.store.set(keys::USER_LOGGED_IN, "true")
        } else {
            self.store.remove(keys::USER_LOGGED_IN)
        }
    }

    fn theme(&self) -> Theme {
        match self.read(keys::THEME) {
            Some(raw) => raw.parse().unwrap_or_else(|e: String| {
                warn!(error = %e, "Stored theme is invalid, using default");
                Theme::default()
            }),
            None => Theme::default(),
        }
    }

    fn set_theme(&mut self, theme: Theme) -> Result<(), StoreError> {
        self.store.set(keys::THEME, theme.as_str())
    }

    fn sign_out(&mut self) -> Result<(), StoreError> {
        self.store.remove(keys::USER_LOGGED_IN)?;
        self.store.remove(keys::USER_DATA)?;
        debug!("Signed out");
        Ok(())
    }
}
