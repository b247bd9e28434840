//! Data models for the Swasth Kadam application
//!
//! Field names serialize in camelCase so documents written by the browser
//! shell and by the native host are interchangeable.

use crate::catalog::food_by_name;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Oil-intensity bucket a catalog entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodCategory {
    Healthy,
    Moderate,
    High,
}

impl FoodCategory {
    /// Every category, in display order
    pub const ALL: [FoodCategory; 3] = [
        FoodCategory::Healthy,
        FoodCategory::Moderate,
        FoodCategory::High,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FoodCategory::Healthy => "healthy",
            FoodCategory::Moderate => "moderate",
            FoodCategory::High => "high",
        }
    }
}

impl fmt::Display for FoodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FoodCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "healthy" => Ok(FoodCategory::Healthy),
            "moderate" => Ok(FoodCategory::Moderate),
            "high" => Ok(FoodCategory::High),
            other => Err(format!(
                "Invalid food category '{}'. Must be one of: healthy, moderate, high",
                other
            )),
        }
    }
}

/// A pre-authored food record with nutrition and oil metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodCatalogEntry {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub emoji: String,
    pub category: FoodCategory,
    #[serde(default)]
    pub calories: f64,
    /// Display label such as "Low" or "Very High"
    #[serde(default)]
    pub oil_content: String,
    /// Synthetic oil intensity, 0-100
    #[serde(default)]
    pub oil_level: u8,
    #[serde(default)]
    pub oil_amount: String,
    #[serde(default)]
    pub cooking_method: String,
    /// Editorial rating, 0-10
    #[serde(default)]
    pub health_score: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fat: f64,
    #[serde(default)]
    pub fiber: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub better_alternative: Option<String>,
    #[serde(default)]
    pub tips: String,
}

/// Catalog id given to legacy records whose name is not in the catalog
pub const UNKNOWN_CATALOG_ID: u32 = 0;

/// A catalog entry copied into the user's timeline at logging time
///
/// The catalog id stays in `food.id`; `tracking_id` only disambiguates
/// repeated logs of the same food.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "StoredLoggedFood")]
pub struct LoggedFood {
    pub tracking_id: i64,
    #[serde(flatten)]
    pub food: FoodCatalogEntry,
    pub timestamp: DateTime<Utc>,
}

impl LoggedFood {
    /// Copy a catalog entry into a new log record
    pub fn from_entry(entry: &FoodCatalogEntry, logged_at: DateTime<Utc>) -> Self {
        Self {
            tracking_id: logged_at.timestamp_millis(),
            food: entry.clone(),
            timestamp: logged_at,
        }
    }

    #[inline]
    pub fn catalog_id(&self) -> u32 {
        self.food.id
    }

    /// Whether this record carries the given removal identity
    pub fn matches(&self, catalog_id: u32, timestamp: DateTime<Utc>) -> bool {
        self.food.id == catalog_id && self.timestamp == timestamp
    }
}

/// Logged food as found in storage
///
/// Records written by the first browser release carry the logging instant
/// (epoch milliseconds) in `id` and have no `trackingId`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredLoggedFood {
    id: u64,
    #[serde(default)]
    tracking_id: Option<i64>,
    timestamp: DateTime<Utc>,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

impl TryFrom<StoredLoggedFood> for LoggedFood {
    type Error = String;

    fn try_from(stored: StoredLoggedFood) -> Result<Self, Self::Error> {
        let StoredLoggedFood {
            id,
            tracking_id,
            timestamp,
            mut fields,
        } = stored;

        let (catalog_id, tracking_id) = match u32::try_from(id) {
            Ok(catalog_id) => (catalog_id, tracking_id.unwrap_or_default()),
            Err(_) => {
                let catalog_id = fields
                    .get("name")
                    .and_then(Value::as_str)
                    .and_then(food_by_name)
                    .map_or(UNKNOWN_CATALOG_ID, |f| f.id);
                let tracking_id = i64::try_from(id)
                    .map_err(|_| format!("id {} is out of range", id))?;
                (catalog_id, tracking_id)
            }
        };

        fields.insert("id".to_string(), Value::from(catalog_id));
        let food = serde_json::from_value(Value::Object(fields)).map_err(|e| e.to_string())?;
        Ok(Self {
            tracking_id,
            food,
            timestamp,
        })
    }
}

/// Persisted identity written on registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub name: String,
    pub initial: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Older browser builds stored the raw text input, e.g. `"34"`
    #[serde(
        default,
        deserialize_with = "deserialize_age",
        skip_serializing_if = "Option::is_none"
    )]
    pub age: Option<u32>,
}

/// Accept an age as a number or numeric text; blank or unreadable text is no age
fn deserialize_age<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum AgeValue {
        Number(u32),
        Text(String),
        Other(Value),
    }

    Ok(match Option::<AgeValue>::deserialize(deserializer)? {
        None => None,
        Some(AgeValue::Number(age)) => Some(age),
        Some(AgeValue::Text(text)) => text.trim().parse().ok(),
        Some(AgeValue::Other(_)) => None,
    })
}

impl UserData {
    /// Build a record from a name, deriving the upper-cased initial
    pub fn from_name(name: &str) -> Self {
        Self {
            name: name.to_string(),
            initial: initial_of(name),
            email: None,
            age: None,
        }
    }

    /// First word of the name, used for greetings
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("User")
    }
}

/// Upper-cased first letter of a name, "U" when the name is empty
pub fn initial_of(name: &str) -> String {
    name.trim()
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| "U".to_string())
}

/// Colour scheme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("Invalid theme '{}'. Must be light or dark", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_entry() -> FoodCatalogEntry {
        FoodCatalogEntry {
            id: 7,
            name: "Aloo Paratha".to_string(),
            emoji: "🫓".to_string(),
            category: FoodCategory::Moderate,
            calories: 320.0,
            oil_content: "Medium".to_string(),
            oil_level: 55,
            oil_amount: "2 tsp".to_string(),
            cooking_method: "Pan-fried".to_string(),
            health_score: 5.0,
            protein: 8.0,
            carbs: 45.0,
            fat: 12.0,
            fiber: 4.0,
            description: "Stuffed potato flatbread".to_string(),
            better_alternative: Some("Roti".to_string()),
            tips: String::new(),
        }
    }

    #[test]
    fn test_logged_food_keeps_catalog_id() {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 8, 30, 0).unwrap();
        let logged = LoggedFood::from_entry(&sample_entry(), at);
        assert_eq!(logged.catalog_id(), 7);
        assert_eq!(logged.tracking_id, at.timestamp_millis());
        assert!(logged.matches(7, at));
        assert!(!logged.matches(8, at));
    }

    #[test]
    fn test_logged_food_json_is_flat_camel_case() {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 8, 30, 0).unwrap();
        let value = serde_json::to_value(LoggedFood::from_entry(&sample_entry(), at)).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["oilLevel"], 55);
        assert_eq!(value["healthScore"], 5.0);
        assert!(value["trackingId"].is_i64());
        assert!(value.get("food").is_none());
    }

    #[test]
    fn test_missing_numbers_default_to_zero() {
        let json = r#"{"id":3,"name":"Mystery","category":"high","timestamp":"2025-03-01T08:30:00Z"}"#;
        let logged: LoggedFood = serde_json::from_str(json).unwrap();
        assert_eq!(logged.food.calories, 0.0);
        assert_eq!(logged.food.oil_level, 0);
        assert_eq!(logged.tracking_id, 0);
    }

    #[test]
    fn test_first_release_record_moves_id_to_tracking_id() {
        let json = r#"{"id":1740816000000,"name":"Samosa","emoji":"🥟","category":"high",
            "calories":250,"oilLevel":85,"healthScore":3,"description":"Deep-fried pastry",
            "timestamp":"2025-03-01T08:00:00.000Z"}"#;
        let logged: LoggedFood = serde_json::from_str(json).unwrap();
        assert_eq!(logged.catalog_id(), 10);
        assert_eq!(logged.tracking_id, 1_740_816_000_000);
        assert_eq!(logged.food.calories, 250.0);
        assert_eq!(logged.timestamp, Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap());

        let rewritten = serde_json::to_value(&logged).unwrap();
        assert_eq!(rewritten["id"], 10);
        assert_eq!(rewritten["trackingId"], 1_740_816_000_000i64);
    }

    #[test]
    fn test_first_release_record_with_unknown_name_is_kept() {
        let json = r#"{"id":1740816000000,"name":"Dal Tadka","category":"healthy",
            "calories":180,"timestamp":"2025-03-01T08:00:00.000Z"}"#;
        let logged: LoggedFood = serde_json::from_str(json).unwrap();
        assert_eq!(logged.catalog_id(), UNKNOWN_CATALOG_ID);
        assert_eq!(logged.food.name, "Dal Tadka");
        assert_eq!(logged.tracking_id, 1_740_816_000_000);
    }

    #[test]
    fn test_user_data_age_from_text_input() {
        let user: UserData =
            serde_json::from_str(r#"{"name":"Priya","age":"34","initial":"P"}"#).unwrap();
        assert_eq!(user.age, Some(34));

        let blank: UserData =
            serde_json::from_str(r#"{"name":"Priya","email":"","age":"","initial":"P"}"#).unwrap();
        assert_eq!(blank.age, None);

        let numeric: UserData =
            serde_json::from_str(r#"{"name":"Priya","age":34,"initial":"P"}"#).unwrap();
        assert_eq!(numeric.age, Some(34));

        let missing: UserData = serde_json::from_str(r#"{"name":"Priya","initial":"P"}"#).unwrap();
        assert_eq!(missing.age, None);

        let odd: UserData =
            serde_json::from_str(r#"{"name":"Priya","age":-3,"initial":"P"}"#).unwrap();
        assert_eq!(odd.age, None);
    }

    #[test]
    fn test_initial_of() {
        assert_eq!(initial_of("priya sharma"), "P");
        assert_eq!(initial_of("  arun"), "A");
        assert_eq!(initial_of(""), "U");
    }

    #[test]
    fn test_first_name() {
        assert_eq!(UserData::from_name("Priya Sharma").first_name(), "Priya");
        assert_eq!(UserData::from_name("").first_name(), "User");
    }

    #[test]
    fn test_category_and_theme_parsing() {
        assert_eq!("High".parse::<FoodCategory>().unwrap(), FoodCategory::High);
        assert!("fried".parse::<FoodCategory>().is_err());
        assert_eq!("light".parse::<Theme>().unwrap(), Theme::Light);
        assert!("blue".parse::<Theme>().is_err());
    }
}
