//! Backup export and import of the tracked-food list
//!
//! Supports two export formats:
//! - JSON: the stored array, pretty-printed, importable again
//! - CSV: one row per logged food for spreadsheets
//!
//! Import replaces the stored list wholesale and is all-or-nothing.

use crate::errors::{ExportError, ImportError};
use crate::models::LoggedFood;
use crate::repository::TrackedFoodRepository;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

/// Export the list as pretty-printed JSON
pub fn export_json(foods: &[LoggedFood]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(foods)?)
}

#[derive(Debug, Serialize)]
struct TrackedFoodCsvRow<'a> {
    logged_at: String,
    food_id: u32,
    name: &'a str,
    category: &'a str,
    calories: f64,
    oil_level: u8,
    health_score: f64,
    protein: f64,
    carbs: f64,
    fat: f64,
    fiber: f64,
}

/// Export the list as CSV, one row per logged food
pub fn export_csv(foods: &[LoggedFood]) -> Result<String, ExportError> {
    let rows = foods.iter().map(|f| TrackedFoodCsvRow {
        logged_at: f.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
        food_id: f.catalog_id(),
        name: &f.food.name,
        category: f.food.category.as_str(),
        calories: f.food.calories,
        oil_level: f.food.oil_level,
        health_score: f.food.health_score,
        protein: f.food.protein,
        carbs: f.food.carbs,
        fat: f.food.fat,
        fiber: f.food.fiber,
    });

    let mut wtr = csv::Writer::from_writer(vec![]);
    for row in rows {
        wtr.serialize(row)?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| ExportError::Csv(e.into_error().into()))?;
    String::from_utf8(bytes).map_err(|_| ExportError::Encoding)
}

/// Parse a backup document without touching any store
///
/// The document must be a JSON array whose every element is a logged food.
pub fn parse_backup(raw: &str) -> Result<Vec<LoggedFood>, ImportError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| ImportError::InvalidJson(e.to_string()))?;
    let items = match value {
        Value::Array(items) => items,
        _ => return Err(ImportError::NotAnArray),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).map_err(|e| ImportError::InvalidEntry {
                index,
                reason: e.to_string(),
            })
        })
        .collect()
}

/// Replace the stored list with a backup document
///
/// Returns the number of imported entries. On any error the stored list
/// is left unchanged.
pub fn import_backup<R: TrackedFoodRepository>(raw: &str, repo: &mut R) -> Result<usize, ImportError> {
    let foods = match parse_backup(raw) {
        Ok(foods) => foods,
        Err(e) => {
            warn!(error = %e, "Rejected backup import");
            return Err(e);
        }
    };
    repo.save(&foods)?;
    info!(count = foods.len(), "Imported tracked foods from backup");
    Ok(foods.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::food_by_id;
    use crate::repository::LocalRepository;
    use crate::store::{keys, KeyValueStore, MemoryStore};
    use chrono::{TimeZone, Utc};

    fn sample_foods() -> Vec<LoggedFood> {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 13, 15, 0).unwrap();
        vec![
            LoggedFood::from_entry(food_by_id(5).unwrap(), at),
            LoggedFood::from_entry(food_by_id(13).unwrap(), at),
        ]
    }

    fn seeded_repo() -> LocalRepository<MemoryStore> {
        let mut repo = LocalRepository::new(MemoryStore::new());
        repo.save(&sample_foods()).unwrap();
        repo
    }

    #[test]
    fn test_export_then_import_restores_list() {
        let exported = export_json(&sample_foods()).unwrap();
        assert!(exported.starts_with("[\n"));

        let mut repo = LocalRepository::new(MemoryStore::new());
        assert_eq!(import_backup(&exported, &mut repo).unwrap(), 2);
        assert_eq!(repo.load(), sample_foods());
    }

    #[test]
    fn test_import_replaces_existing_list() {
        let mut repo = seeded_repo();
        assert_eq!(import_backup("[]", &mut repo).unwrap(), 0);
        assert!(repo.load().is_empty());
    }

    #[test]
    fn test_non_array_import_leaves_store_untouched() {
        let mut repo = seeded_repo();
        let before = repo.store().get(keys::TRACKED_FOODS).unwrap();

        assert!(matches!(
            import_backup(r#"{"trackedFoods": []}"#, &mut repo),
            Err(ImportError::NotAnArray)
        ));
        assert!(matches!(
            import_backup("not json", &mut repo),
            Err(ImportError::InvalidJson(_))
        ));
        assert_eq!(repo.store().get(keys::TRACKED_FOODS).unwrap(), before);
    }

    #[test]
    fn test_invalid_entry_rejects_whole_import() {
        let mut repo = seeded_repo();
        let good = serde_json::to_value(&sample_foods()[0]).unwrap();
        let raw = serde_json::json!([good, {"id": "seven"}]).to_string();

        match import_backup(&raw, &mut repo) {
            Err(ImportError::InvalidEntry { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected invalid entry, got {:?}", other),
        }
        assert_eq!(repo.load().len(), 2);
    }

    #[test]
    fn test_first_release_backup_imports() {
        let mut repo = LocalRepository::new(MemoryStore::new());
        assert_eq!(import_backup(r#"[{"id":1740816000000,"name":"Dal Tadka","category":"healthy","calories":180,
            "oilLevel":25,"healthScore":8,"timestamp":"2025-03-01T08:00:00.000Z"}]"#, &mut repo).unwrap(), 1);
        let loaded = repo.load();
        assert_eq!(loaded[0].food.calories, 180.0);
        assert_eq!(loaded[0].tracking_id, 1_740_816_000_000);
    }

    #[test]
    fn test_csv_export() {
        let csv = export_csv(&sample_foods()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("logged_at,food_id,name,category,calories,oil_level,health_score,protein,carbs,fat,fiber")
        );
        assert_eq!(
            lines.next(),
            Some("2025-03-01 13:15:00,5,Mixed Vegetable Salad,healthy,50.0,8,10.0,2.0,8.0,1.0,4.0")
        );
        // "Pakora/Bhajiya" needs no quoting
        assert!(lines.next().unwrap().contains("Pakora/Bhajiya"));
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_csv_export_empty_list() {
        assert_eq!(export_csv(&[]).unwrap(), "");
    }
}
