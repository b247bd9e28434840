//! Swasth Kadam WASM Module
//!
//! WebAssembly bindings used by the browser shell. Structured values cross
//! the boundary as JSON strings in the same camelCase shape the shell keeps
//! in localStorage. Instants are epoch milliseconds and the calendar day is
//! taken from the caller's UTC offset in minutes.

use chrono::{DateTime, Utc};
use serde::Serialize;
use swasth_kadam_shared::backup::parse_backup;
use swasth_kadam_shared::calendar::DayBoundary;
use swasth_kadam_shared::catalog;
use swasth_kadam_shared::health_metrics::{BMI_MISSING_INPUT_COLOR, BMI_MISSING_INPUT_MESSAGE};
use swasth_kadam_shared::models::FoodCategory;
use swasth_kadam_shared::repository::parse_tracked_foods;
use swasth_kadam_shared::tracking::{self, HealthScoreAveraging, SummaryOptions};
use swasth_kadam_shared::{registration, Action, WizardState};
use wasm_bindgen::prelude::*;

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| e.to_string())
}

fn instant(epoch_ms: f64) -> Result<DateTime<Utc>, String> {
    if !epoch_ms.is_finite() {
        return Err(format!("Invalid timestamp {}", epoch_ms));
    }
    DateTime::from_timestamp_millis(epoch_ms as i64)
        .ok_or_else(|| format!("Timestamp {} is out of range", epoch_ms))
}

fn boundary(utc_offset_minutes: i32) -> Result<DayBoundary, String> {
    DayBoundary::fixed_offset(utc_offset_minutes)
        .ok_or_else(|| format!("UTC offset {} minutes is out of range", utc_offset_minutes))
}

fn category(name: &str) -> Result<FoodCategory, String> {
    name.parse()
}

// ============================================================================
// Catalog
// ============================================================================

#[wasm_bindgen(js_name = allFoods)]
pub fn all_foods() -> Result<String, String> {
    to_json(catalog::all_foods())
}

#[wasm_bindgen(js_name = searchFoods)]
pub fn search_foods(query: &str) -> Result<String, String> {
    to_json(&catalog::search_foods(query))
}

#[wasm_bindgen(js_name = foodsByCategory)]
pub fn foods_by_category(category_name: &str) -> Result<String, String> {
    to_json(&catalog::foods_by_category(category(category_name)?))
}

/// Catalog entry as JSON, `undefined` for unknown ids
#[wasm_bindgen(js_name = foodById)]
pub fn food_by_id(id: u32) -> Option<String> {
    catalog::food_by_id(id).and_then(|f| to_json(f).ok())
}

#[wasm_bindgen(js_name = popularFoods)]
pub fn popular_foods() -> Result<String, String> {
    to_json(&catalog::popular_foods())
}

#[wasm_bindgen(js_name = healthyAlternatives)]
pub fn healthy_alternatives(category_name: &str) -> Result<String, String> {
    to_json(&catalog::healthy_alternatives(category(category_name)?))
}

#[wasm_bindgen(js_name = oilLevelColor)]
pub fn oil_level_color(oil_level: u8) -> String {
    catalog::oil_level_color(oil_level).to_string()
}

#[wasm_bindgen(js_name = healthScoreColor)]
pub fn health_score_color(score: f64) -> String {
    catalog::health_score_color(score).to_string()
}

#[wasm_bindgen(js_name = oilDots)]
pub fn oil_dots(oil_level: u8) -> u8 {
    catalog::oil_dots(oil_level)
}

#[wasm_bindgen(js_name = healthStars)]
pub fn health_stars(score: f64) -> u8 {
    catalog::health_stars(score)
}

// ============================================================================
// Tracking
// ============================================================================

/// Header figures, oil status, insights and calorie ring for today
///
/// `averaging` is `"pairwise"` or `"mean"`.
#[wasm_bindgen(js_name = dailySummary)]
pub fn daily_summary(
    tracked_json: &str,
    now_ms: f64,
    utc_offset_minutes: i32,
    averaging: &str,
    daily_calorie_goal: f64,
) -> Result<String, String> {
    let averaging = match averaging {
        "mean" => HealthScoreAveraging::Mean,
        "pairwise" | "" => HealthScoreAveraging::Pairwise,
        other => return Err(format!("Unknown averaging '{}'", other)),
    };
    let options = SummaryOptions {
        boundary: boundary(utc_offset_minutes)?,
        averaging,
        daily_calorie_goal,
    };
    let foods = parse_tracked_foods(tracked_json);
    to_json(&tracking::summarize(&foods, instant(now_ms)?, &options))
}

#[wasm_bindgen(js_name = dailyDetails)]
pub fn daily_details(tracked_json: &str, now_ms: f64, utc_offset_minutes: i32) -> Result<String, String> {
    let foods = parse_tracked_foods(tracked_json);
    to_json(&tracking::daily_details(
        &foods,
        instant(now_ms)?,
        boundary(utc_offset_minutes)?,
    ))
}

#[wasm_bindgen]
pub fn timeline(tracked_json: &str, now_ms: f64, utc_offset_minutes: i32) -> Result<String, String> {
    let foods = parse_tracked_foods(tracked_json);
    to_json(&tracking::timeline(
        &foods,
        instant(now_ms)?,
        boundary(utc_offset_minutes)?,
    ))
}

/// Prepend a catalog entry to the tracked list and return the new list
#[wasm_bindgen(js_name = addFood)]
pub fn add_food(tracked_json: &str, food_id: u32, now_ms: f64) -> Result<String, String> {
    let entry = catalog::food_by_id(food_id).ok_or_else(|| format!("Unknown food id {}", food_id))?;
    let mut foods = parse_tracked_foods(tracked_json);
    tracking::add_food(&mut foods, entry, instant(now_ms)?);
    to_json(&foods)
}

/// Drop entries matching the catalog id and log time, returning the new list
#[wasm_bindgen(js_name = removeFood)]
pub fn remove_food(tracked_json: &str, food_id: u32, timestamp_ms: f64) -> Result<String, String> {
    let mut foods = parse_tracked_foods(tracked_json);
    tracking::remove_food(&mut foods, food_id, instant(timestamp_ms)?);
    to_json(&foods)
}

// ============================================================================
// Registration
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BmiView {
    bmi: Option<f64>,
    category: Option<String>,
    color: String,
    message: String,
}

/// BMI for the registration summary; missing inputs give the prompt text
#[wasm_bindgen(js_name = assessBmi)]
pub fn assess_bmi(weight_kg: Option<f64>, height_cm: Option<f64>) -> Result<String, String> {
    let view = match swasth_kadam_shared::assess_bmi(weight_kg, height_cm) {
        Some(a) => BmiView {
            bmi: Some(a.bmi),
            category: Some(a.category.label().to_string()),
            color: a.color,
            message: a.insight,
        },
        None => BmiView {
            bmi: None,
            category: None,
            color: BMI_MISSING_INPUT_COLOR.to_string(),
            message: BMI_MISSING_INPUT_MESSAGE.to_string(),
        },
    };
    to_json(&view)
}

#[wasm_bindgen(js_name = wizardInitialState)]
pub fn wizard_initial_state() -> Result<String, String> {
    to_json(&WizardState::new())
}

/// Apply a wizard action; the error is the message to show the user
#[wasm_bindgen(js_name = wizardTransition)]
pub fn wizard_transition(state_json: &str, action_json: &str) -> Result<String, String> {
    let state: WizardState =
        serde_json::from_str(state_json).map_err(|e| format!("Invalid wizard state: {}", e))?;
    let action: Action =
        serde_json::from_str(action_json).map_err(|e| format!("Invalid wizard action: {}", e))?;
    let next = registration::transition(&state, action).map_err(|e| e.to_string())?;
    to_json(&next)
}

// ============================================================================
// Backup
// ============================================================================

/// Check a backup document before the shell writes it; returns the entry count
#[wasm_bindgen(js_name = validateBackup)]
pub fn validate_backup(raw: &str) -> Result<u32, String> {
    parse_backup(raw)
        .map(|foods| foods.len() as u32)
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    // 2025-03-01T12:00:00Z
    const NOON_MS: f64 = 1_740_830_400_000.0;
    const IST: i32 = 330;

    fn parse(json: &str) -> Value {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_catalog_bindings() {
        assert_eq!(parse(&all_foods().unwrap()).as_array().unwrap().len(), 15);
        assert_eq!(parse(&search_foods("dal").unwrap())[0]["id"], 1);
        assert_eq!(parse(&foods_by_category("moderate").unwrap()).as_array().unwrap().len(), 4);
        assert!(foods_by_category("fried").is_err());
        assert!(food_by_id(42).is_none());
        assert_eq!(parse(&healthy_alternatives("high").unwrap()).as_array().unwrap().len(), 3);
        assert_eq!(oil_level_color(85), "#EF4444");
        assert_eq!(oil_dots(50), 3);
    }

    #[test]
    fn test_add_then_summarize() {
        let tracked = add_food("[]", 10, NOON_MS).unwrap();
        let tracked = add_food(&tracked, 1, NOON_MS + 60_000.0).unwrap();

        let summary = parse(&daily_summary(&tracked, NOON_MS + 120_000.0, IST, "pairwise", 2000.0).unwrap());
        assert_eq!(summary["totals"]["calories"], 415.0);
        assert_eq!(summary["totals"]["oilLevel"], 85);
        assert_eq!(summary["oilStatus"], "high");
        assert_eq!(summary["insights"][0], "high_oil");
    }

    #[test]
    fn test_empty_day_reports_plain_zero() {
        let raw = daily_summary("[]", NOON_MS, IST, "pairwise", 2000.0).unwrap();
        assert!(raw.contains(r#""calories":0.0"#), "{raw}");
        assert!(!raw.contains("-0.0"));
    }

    #[test]
    fn test_unknown_food_is_rejected() {
        assert!(add_food("[]", 99, NOON_MS).is_err());
        assert!(daily_summary("[]", NOON_MS, IST, "median", 2000.0).is_err());
    }

    #[test]
    fn test_remove_by_id_and_time() {
        let tracked = add_food("[]", 3, NOON_MS).unwrap();
        let tracked = add_food(&tracked, 3, NOON_MS + 1000.0).unwrap();
        let remaining = parse(&remove_food(&tracked, 3, NOON_MS).unwrap());
        assert_eq!(remaining.as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_corrupt_tracked_list_reads_as_empty() {
        let details = parse(&daily_details("{oops", NOON_MS, IST).unwrap());
        assert_eq!(details["items"].as_array().unwrap().len(), 0);
        assert_eq!(parse(&timeline("\"x\"", NOON_MS, 0).unwrap()), Value::Array(vec![]));
    }

    #[test]
    fn test_bmi_binding() {
        let view = parse(&assess_bmi(Some(70.0), Some(175.0)).unwrap());
        assert_eq!(view["bmi"], 22.9);
        assert_eq!(view["category"], "Healthy");

        let missing = parse(&assess_bmi(None, Some(175.0)).unwrap());
        assert!(missing["bmi"].is_null());
        assert_eq!(missing["color"], BMI_MISSING_INPUT_COLOR);
    }

    #[test]
    fn test_wizard_binding() {
        let state = wizard_initial_state().unwrap();
        assert_eq!(parse(&state)["step"], 1);

        let err = wizard_transition(&state, r#"{"type":"next"}"#).unwrap_err();
        assert!(err.starts_with("Full Name"));

        let left = wizard_transition(&state, r#"{"type":"back"}"#).unwrap();
        assert_eq!(parse(&left)["status"], "abandoned");
    }

    #[test]
    fn test_validate_backup() {
        assert_eq!(validate_backup(&add_food("[]", 2, NOON_MS).unwrap()).unwrap(), 1);
        assert!(validate_backup("{}").is_err());
    }
}
