//! Daily tracking aggregation
//!
//! Everything here is derived on demand from the stored list of logged
//! foods; nothing computed in this module is persisted. The list is kept
//! most-recent-first because new entries are prepended.

use crate::calendar::DayBoundary;
use crate::catalog::colors;
use crate::errors::StoreError;
use crate::models::{FoodCatalogEntry, LoggedFood};
use crate::repository::TrackedFoodRepository;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Default daily calorie goal used by the progress ring
pub const DEFAULT_DAILY_CALORIE_GOAL: f64 = 2000.0;

/// Oil level above which the high-oil insight is shown
const HIGH_OIL_INSIGHT_THRESHOLD: u8 = 70;

/// Entries needed for the consistency insight
const CONSISTENT_TRACKING_COUNT: usize = 3;

// ============================================================================
// Daily Totals
// ============================================================================

/// How the day's health scores are folded into one figure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HealthScoreAveraging {
    /// `avg = (avg + score) / 2` per entry, starting from 0.
    /// Matches figures already shown to existing users.
    #[default]
    Pairwise,
    /// Arithmetic mean
    Mean,
}

impl HealthScoreAveraging {
    /// Fold scores in the order given
    pub fn fold(&self, scores: impl IntoIterator<Item = f64>) -> f64 {
        match self {
            HealthScoreAveraging::Pairwise => scores
                .into_iter()
                .fold(0.0, |running, score| (running + score) / 2.0),
            HealthScoreAveraging::Mean => {
                let (sum, count) = scores
                    .into_iter()
                    .fold((0.0, 0usize), |(sum, count), score| (sum + score, count + 1));
                if count == 0 {
                    0.0
                } else {
                    sum / count as f64
                }
            }
        }
    }
}

/// Summary figures for one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DailyTotals {
    pub calories: f64,
    /// Worst single entry, not the sum
    pub oil_level: u8,
    pub avg_health_score: f64,
    pub food_count: usize,
}

/// Entries logged on the same calendar day as `now`
pub fn todays_foods<'a>(
    foods: &'a [LoggedFood],
    now: DateTime<Utc>,
    boundary: DayBoundary,
) -> Vec<&'a LoggedFood> {
    let today = boundary.date_of(now);
    foods
        .iter()
        .filter(|f| boundary.date_of(f.timestamp) == today)
        .collect()
}

/// Reduce a day's entries into totals
pub fn daily_totals(today: &[&LoggedFood], averaging: HealthScoreAveraging) -> DailyTotals {
    let calories = today.iter().fold(0.0, |sum, f| sum + f.food.calories);
    let oil_level = today
        .iter()
        .map(|f| f.food.oil_level.min(100))
        .max()
        .unwrap_or(0);

    DailyTotals {
        calories,
        oil_level,
        avg_health_score: averaging.fold(today.iter().map(|f| f.food.health_score)),
        food_count: today.len(),
    }
}

// ============================================================================
// Classification
// ============================================================================

/// Oil status badge for the day's worst entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OilStatus {
    Excellent,
    Moderate,
    High,
}

impl OilStatus {
    pub fn from_level(oil_level: u8) -> Self {
        if oil_level <= 20 {
            OilStatus::Excellent
        } else if oil_level <= 50 {
            OilStatus::Moderate
        } else {
            OilStatus::High
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OilStatus::Excellent => "Excellent",
            OilStatus::Moderate => "Moderate",
            OilStatus::High => "High",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            OilStatus::Excellent => colors::GOOD,
            OilStatus::Moderate => colors::MODERATE,
            OilStatus::High => colors::HIGH,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            OilStatus::Excellent => "💚",
            OilStatus::Moderate => "⚠️",
            OilStatus::High => "🚨",
        }
    }
}

/// Colour tier of the day's health score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthTier {
    Good,
    Moderate,
    Poor,
}

impl HealthTier {
    pub fn from_score(score: f64) -> Self {
        if score >= 8.0 {
            HealthTier::Good
        } else if score >= 5.0 {
            HealthTier::Moderate
        } else {
            HealthTier::Poor
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            HealthTier::Good => colors::GOOD,
            HealthTier::Moderate => colors::MODERATE,
            HealthTier::Poor => colors::HIGH,
        }
    }
}

/// Advice cards shown under the day's timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Insight {
    HighOil,
    GreatChoices,
    ConsistentTracking,
}

impl Insight {
    /// Card style: warning, success or info
    pub fn kind(&self) -> &'static str {
        match self {
            Insight::HighOil => "warning",
            Insight::GreatChoices => "success",
            Insight::ConsistentTracking => "info",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Insight::HighOil => {
                "High oil intake today. Consider grilling or steaming your next meal."
            }
            Insight::GreatChoices => {
                "Great food choices today! You're maintaining a healthy diet."
            }
            Insight::ConsistentTracking => {
                "Good tracking consistency! Regular logging helps build healthy habits."
            }
        }
    }
}

/// Insights that apply to the day; none when nothing was logged
pub fn insights(totals: &DailyTotals) -> Vec<Insight> {
    if totals.food_count == 0 {
        return Vec::new();
    }
    let mut cards = Vec::new();
    if totals.oil_level > HIGH_OIL_INSIGHT_THRESHOLD {
        cards.push(Insight::HighOil);
    }
    if totals.avg_health_score >= 8.0 {
        cards.push(Insight::GreatChoices);
    }
    if totals.food_count >= CONSISTENT_TRACKING_COUNT {
        cards.push(Insight::ConsistentTracking);
    }
    cards
}

/// Progress towards the daily calorie goal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalorieProgress {
    pub goal: f64,
    /// 0.0-1.0
    pub fraction: f64,
    pub over_goal: bool,
}

pub fn calorie_progress(calories: f64, goal: f64) -> CalorieProgress {
    let fraction = if goal > 0.0 {
        (calories / goal).clamp(0.0, 1.0)
    } else {
        1.0
    };
    CalorieProgress {
        goal,
        fraction,
        over_goal: calories > goal,
    }
}

/// Everything the "Today's Tracking" header shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    pub totals: DailyTotals,
    pub oil_status: OilStatus,
    pub health_tier: HealthTier,
    pub insights: Vec<Insight>,
    pub calorie_progress: CalorieProgress,
}

/// Summary settings supplied by configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryOptions {
    pub boundary: DayBoundary,
    pub averaging: HealthScoreAveraging,
    pub daily_calorie_goal: f64,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            boundary: DayBoundary::default(),
            averaging: HealthScoreAveraging::default(),
            daily_calorie_goal: DEFAULT_DAILY_CALORIE_GOAL,
        }
    }
}

/// Build the day's summary from the full stored list
pub fn summarize(foods: &[LoggedFood], now: DateTime<Utc>, options: &SummaryOptions) -> DailySummary {
    let today = todays_foods(foods, now, options.boundary);
    let totals = daily_totals(&today, options.averaging);
    debug!(
        food_count = totals.food_count,
        oil_level = totals.oil_level,
        "Computed daily totals"
    );

    DailySummary {
        oil_status: OilStatus::from_level(totals.oil_level),
        health_tier: HealthTier::from_score(totals.avg_health_score),
        insights: insights(&totals),
        calorie_progress: calorie_progress(totals.calories, options.daily_calorie_goal),
        totals,
    }
}

// ============================================================================
// Macro Details
// ============================================================================

/// Sums across the day's entries
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MacroTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
    pub max_oil_level: u8,
}

/// Largest single-entry value per nutrient, never below 1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroMaxima {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
}

impl Default for MacroMaxima {
    fn default() -> Self {
        Self {
            protein: 1.0,
            carbs: 1.0,
            fat: 1.0,
            fiber: 1.0,
        }
    }
}

/// Bar widths in percent, relative to the day's maxima
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroBars {
    pub protein: u8,
    pub carbs: u8,
    pub fat: u8,
    pub fiber: u8,
}

/// Percent-of-max bar width: `min(100, round(value / max * 100))`
///
/// A non-positive max is treated as 1.
pub fn bar_width(value: f64, max: f64) -> u8 {
    let max = if max > 0.0 { max } else { 1.0 };
    let percent = (value / max * 100.0).round();
    percent.clamp(0.0, 100.0) as u8
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailItem<'a> {
    pub food: &'a LoggedFood,
    pub bars: MacroBars,
}

/// The "Today's Details" page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyDetails<'a> {
    pub totals: MacroTotals,
    pub maxima: MacroMaxima,
    pub oil_status: OilStatus,
    pub items: Vec<DetailItem<'a>>,
}

pub fn macro_totals(today: &[&LoggedFood]) -> MacroTotals {
    today.iter().fold(MacroTotals::default(), |acc, f| MacroTotals {
        calories: acc.calories + f.food.calories,
        protein: acc.protein + f.food.protein,
        carbs: acc.carbs + f.food.carbs,
        fat: acc.fat + f.food.fat,
        fiber: acc.fiber + f.food.fiber,
        max_oil_level: acc.max_oil_level.max(f.food.oil_level.min(100)),
    })
}

pub fn macro_maxima(today: &[&LoggedFood]) -> MacroMaxima {
    today.iter().fold(MacroMaxima::default(), |acc, f| MacroMaxima {
        protein: acc.protein.max(f.food.protein),
        carbs: acc.carbs.max(f.food.carbs),
        fat: acc.fat.max(f.food.fat),
        fiber: acc.fiber.max(f.food.fiber),
    })
}

pub fn daily_details<'a>(
    foods: &'a [LoggedFood],
    now: DateTime<Utc>,
    boundary: DayBoundary,
) -> DailyDetails<'a> {
    let today = todays_foods(foods, now, boundary);
    let totals = macro_totals(&today);
    let maxima = macro_maxima(&today);

    let items = today
        .iter()
        .map(|f| DetailItem {
            food: f,
            bars: MacroBars {
                protein: bar_width(f.food.protein, maxima.protein),
                carbs: bar_width(f.food.carbs, maxima.carbs),
                fat: bar_width(f.food.fat, maxima.fat),
                fiber: bar_width(f.food.fiber, maxima.fiber),
            },
        })
        .collect();

    DailyDetails {
        oil_status: OilStatus::from_level(totals.max_oil_level),
        totals,
        maxima,
        items,
    }
}

// ============================================================================
// Timeline
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineDay<'a> {
    pub date: NaiveDate,
    pub is_today: bool,
    pub entries: Vec<&'a LoggedFood>,
}

/// Group entries by calendar day, most recent day first
///
/// Entries keep their stored order within a day.
pub fn timeline<'a>(
    foods: &'a [LoggedFood],
    now: DateTime<Utc>,
    boundary: DayBoundary,
) -> Vec<TimelineDay<'a>> {
    let today = boundary.date_of(now);
    let mut days: Vec<TimelineDay<'a>> = Vec::new();

    for food in foods {
        let date = boundary.date_of(food.timestamp);
        match days.iter_mut().find(|d| d.date == date) {
            Some(day) => day.entries.push(food),
            None => days.push(TimelineDay {
                date,
                is_today: date == today,
                entries: vec![food],
            }),
        }
    }

    days.sort_by(|a, b| b.date.cmp(&a.date));
    days
}

// ============================================================================
// Mutation
// ============================================================================

/// Log a catalog entry at `now`, newest first
pub fn add_food(foods: &mut Vec<LoggedFood>, entry: &FoodCatalogEntry, now: DateTime<Utc>) -> LoggedFood {
    let logged = LoggedFood::from_entry(entry, now);
    foods.insert(0, logged.clone());
    logged
}

/// Remove every entry with this catalog id and timestamp
///
/// Returns the number of entries removed.
pub fn remove_food(foods: &mut Vec<LoggedFood>, catalog_id: u32, timestamp: DateTime<Utc>) -> usize {
    let before = foods.len();
    foods.retain(|f| !f.matches(catalog_id, timestamp));
    before - foods.len()
}

/// Read-modify-write access to the tracked list through a repository
pub struct Tracker<R> {
    repo: R,
}

impl<R: TrackedFoodRepository> Tracker<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Current stored entries, most recent first
    pub fn entries(&self) -> Vec<LoggedFood> {
        self.repo.load()
    }

    pub fn log(&mut self, entry: &FoodCatalogEntry, now: DateTime<Utc>) -> Result<LoggedFood, StoreError> {
        let mut foods = self.repo.load();
        let logged = add_food(&mut foods, entry, now);
        self.repo.save(&foods)?;
        info!(food_id = entry.id, name = %entry.name, "Logged food");
        Ok(logged)
    }

    pub fn remove(&mut self, catalog_id: u32, timestamp: DateTime<Utc>) -> Result<usize, StoreError> {
        let mut foods = self.repo.load();
        let removed = remove_food(&mut foods, catalog_id, timestamp);
        if removed > 0 {
            self.repo.save(&foods)?;
        }
        info!(food_id = catalog_id, %timestamp, removed, "Removed logged food");
        Ok(removed)
    }

    pub fn summary(&self, now: DateTime<Utc>, options: &SummaryOptions) -> DailySummary {
        summarize(&self.repo.load(), now, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::food_by_id;
    use crate::repository::LocalRepository;
    use crate::store::{keys, KeyValueStore, MemoryStore};
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;
    use rstest::rstest;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    fn logged(id: u32, at: DateTime<Utc>) -> LoggedFood {
        LoggedFood::from_entry(food_by_id(id).unwrap(), at)
    }

    fn with_values(calories: f64, oil_level: u8, health_score: f64, at: DateTime<Utc>) -> LoggedFood {
        let mut food = logged(1, at);
        food.food.calories = calories;
        food.food.oil_level = oil_level;
        food.food.health_score = health_score;
        food
    }

    #[test]
    fn test_todays_foods_filters_by_calendar_day() {
        let foods = vec![
            logged(1, now() - Duration::hours(2)),
            logged(2, now() - Duration::days(1)),
            logged(3, now() + Duration::hours(3)),
        ];
        let today = todays_foods(&foods, now(), DayBoundary::Utc);
        let ids: Vec<u32> = today.iter().map(|f| f.catalog_id()).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_calories_sum_and_oil_max() {
        let foods = vec![
            with_values(100.0, 30, 8.0, now()),
            with_values(50.0, 60, 4.0, now()),
        ];
        let today = todays_foods(&foods, now(), DayBoundary::Utc);
        let totals = daily_totals(&today, HealthScoreAveraging::Pairwise);
        assert_eq!(totals.calories, 150.0);
        assert_eq!(totals.oil_level, 60);
        assert_eq!(totals.food_count, 2);
    }

    #[test]
    fn test_pairwise_recurrence_is_not_the_mean() {
        let foods = vec![with_values(0.0, 0, 8.0, now()), with_values(0.0, 0, 4.0, now())];
        let today = todays_foods(&foods, now(), DayBoundary::Utc);
        assert_eq!(daily_totals(&today, HealthScoreAveraging::Pairwise).avg_health_score, 4.0);
        assert_eq!(daily_totals(&today, HealthScoreAveraging::Mean).avg_health_score, 6.0);
    }

    #[test]
    fn test_empty_day() {
        let totals = daily_totals(&[], HealthScoreAveraging::Mean);
        assert_eq!(totals, DailyTotals::default());
        // Renders as "0", never "-0"
        assert!(totals.calories.is_sign_positive());
        assert!(totals.avg_health_score.is_sign_positive());
        assert!(insights(&totals).is_empty());
    }

    #[test]
    fn test_oil_level_is_capped() {
        let foods = vec![with_values(0.0, 180, 0.0, now())];
        let today = todays_foods(&foods, now(), DayBoundary::Utc);
        assert_eq!(daily_totals(&today, HealthScoreAveraging::Pairwise).oil_level, 100);
        assert_eq!(macro_totals(&today).max_oil_level, 100);
    }

    #[rstest]
    #[case(0, OilStatus::Excellent)]
    #[case(20, OilStatus::Excellent)]
    #[case(21, OilStatus::Moderate)]
    #[case(50, OilStatus::Moderate)]
    #[case(51, OilStatus::High)]
    fn test_oil_status(#[case] level: u8, #[case] expected: OilStatus) {
        assert_eq!(OilStatus::from_level(level), expected);
    }

    #[rstest]
    #[case(8.0, HealthTier::Good)]
    #[case(7.9, HealthTier::Moderate)]
    #[case(5.0, HealthTier::Moderate)]
    #[case(4.9, HealthTier::Poor)]
    fn test_health_tier(#[case] score: f64, #[case] expected: HealthTier) {
        assert_eq!(HealthTier::from_score(score), expected);
    }

    #[test]
    fn test_insights() {
        let totals = DailyTotals {
            calories: 900.0,
            oil_level: 85,
            avg_health_score: 8.5,
            food_count: 3,
        };
        assert_eq!(
            insights(&totals),
            vec![Insight::HighOil, Insight::GreatChoices, Insight::ConsistentTracking]
        );

        let quiet = DailyTotals {
            oil_level: 70,
            avg_health_score: 7.0,
            food_count: 1,
            ..totals
        };
        assert!(insights(&quiet).is_empty());
    }

    #[test]
    fn test_calorie_progress() {
        let half = calorie_progress(1000.0, 2000.0);
        assert_eq!(half.fraction, 0.5);
        assert!(!half.over_goal);

        let over = calorie_progress(2500.0, 2000.0);
        assert_eq!(over.fraction, 1.0);
        assert!(over.over_goal);
    }

    #[rstest]
    #[case(30.0, 40.0, 75)]
    #[case(0.0, 40.0, 0)]
    #[case(50.0, 40.0, 100)]
    #[case(0.5, 0.0, 50)]
    #[case(1.0, 3.0, 33)]
    fn test_bar_width(#[case] value: f64, #[case] max: f64, #[case] expected: u8) {
        assert_eq!(bar_width(value, max), expected);
    }

    #[test]
    fn test_macro_maxima_floor_of_one() {
        // Grilled chicken has zero carbs and fiber
        let foods = vec![logged(3, now())];
        let today = todays_foods(&foods, now(), DayBoundary::Utc);
        let maxima = macro_maxima(&today);
        assert_eq!(maxima.carbs, 1.0);
        assert_eq!(maxima.fiber, 1.0);
        assert_eq!(maxima.protein, 35.0);
    }

    #[test]
    fn test_daily_details() {
        // Dal: protein 12, Chicken: protein 35
        let foods = vec![logged(1, now()), logged(3, now()), logged(10, now() - Duration::days(2))];
        let details = daily_details(&foods, now(), DayBoundary::Utc);
        assert_eq!(details.items.len(), 2);
        assert_eq!(details.totals.protein, 47.0);
        assert_eq!(details.totals.calories, 350.0);
        assert_eq!(details.items[0].bars.protein, 34);
        assert_eq!(details.items[1].bars.protein, 100);
        assert_eq!(details.oil_status, OilStatus::Excellent);
    }

    #[test]
    fn test_timeline_groups_most_recent_day_first() {
        let yesterday = now() - Duration::days(1);
        let foods = vec![
            logged(1, yesterday),
            logged(5, now() - Duration::hours(1)),
            logged(2, now() - Duration::hours(2)),
            logged(4, yesterday - Duration::hours(1)),
        ];
        let days = timeline(&foods, now(), DayBoundary::Utc);
        assert_eq!(days.len(), 2);
        assert!(days[0].is_today);
        assert_eq!(days[0].entries.iter().map(|f| f.catalog_id()).collect::<Vec<_>>(), vec![5, 2]);
        assert!(!days[1].is_today);
        assert_eq!(days[1].entries.iter().map(|f| f.catalog_id()).collect::<Vec<_>>(), vec![1, 4]);
    }

    #[test]
    fn test_add_food_prepends() {
        let mut foods = vec![logged(1, now() - Duration::hours(1))];
        let added = add_food(&mut foods, food_by_id(7).unwrap(), now());
        assert_eq!(foods[0], added);
        assert_eq!(foods.len(), 2);
    }

    #[test]
    fn test_remove_by_id_and_timestamp_only() {
        let earlier = now() - Duration::hours(1);
        let mut foods = vec![logged(1, now()), logged(1, earlier), logged(2, now())];
        let removed = remove_food(&mut foods, 1, now());
        assert_eq!(removed, 1);
        assert_eq!(foods.len(), 2);
        assert!(foods.iter().any(|f| f.matches(1, earlier)));
        assert!(foods.iter().any(|f| f.matches(2, now())));
    }

    #[test]
    fn test_remove_takes_all_identical_entries() {
        let mut foods = vec![logged(1, now()), logged(1, now())];
        assert_eq!(remove_food(&mut foods, 1, now()), 2);
        assert!(foods.is_empty());
    }

    #[test]
    fn test_tracker_round_trip_through_repository() {
        let mut tracker = Tracker::new(LocalRepository::new(MemoryStore::new()));
        let first = tracker.log(food_by_id(10).unwrap(), now()).unwrap();
        tracker.log(food_by_id(1).unwrap(), now() + Duration::minutes(5)).unwrap();
        assert_eq!(tracker.entries().len(), 2);

        let summary = tracker.summary(
            now() + Duration::minutes(10),
            &SummaryOptions {
                boundary: DayBoundary::Utc,
                ..SummaryOptions::default()
            },
        );
        assert_eq!(summary.totals.oil_level, 85);
        assert_eq!(summary.oil_status, OilStatus::High);
        assert_eq!(summary.insights, vec![Insight::HighOil]);

        assert_eq!(tracker.remove(first.catalog_id(), first.timestamp).unwrap(), 1);
        assert_eq!(tracker.entries().len(), 1);
        assert_eq!(tracker.remove(99, now()).unwrap(), 0);
    }

    #[test]
    fn test_logging_keeps_first_release_entries() {
        let store = MemoryStore::new().with_entry(keys::TRACKED_FOODS, r#"[{"id":1740816000000,"name":"Dal Tadka","category":"healthy","calories":180,
            "oilLevel":25,"healthScore":8,"timestamp":"2025-03-01T08:00:00.000Z"}]"#);
        let mut tracker = Tracker::new(LocalRepository::new(store));
        tracker.log(food_by_id(2).unwrap(), now()).unwrap();

        let entries = tracker.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].food.name, "Dal Tadka");
        assert_eq!(entries[1].tracking_id, 1_740_816_000_000);

        let raw = tracker.repository().store().get(keys::TRACKED_FOODS).unwrap().unwrap();
        assert!(raw.contains("Dal Tadka"));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: bar width stays within 0-100
        #[test]
        fn prop_bar_width_bounded(value in 0.0f64..1000.0, max in 0.0f64..1000.0) {
            prop_assert!(bar_width(value, max) <= 100);
        }

        /// Property: the day's oil level never exceeds 100 and is the max
        #[test]
        fn prop_oil_level_is_max(levels in proptest::collection::vec(0u8..=255, 0..10)) {
            let foods: Vec<LoggedFood> = levels
                .iter()
                .map(|l| with_values(0.0, *l, 0.0, now()))
                .collect();
            let today = todays_foods(&foods, now(), DayBoundary::Utc);
            let totals = daily_totals(&today, HealthScoreAveraging::Pairwise);
            let expected = levels.iter().map(|l| (*l).min(100)).max().unwrap_or(0);
            prop_assert_eq!(totals.oil_level, expected);
        }
    }
}
