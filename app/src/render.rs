//! Plain-text formatting for command output

use swasth_kadam_shared::catalog::{health_stars, oil_dots, OIL_DOT_COUNT};
use swasth_kadam_shared::FoodCatalogEntry;

const MAX_STARS: u8 = 5;

/// Drop a trailing ".0" so whole numbers read naturally
pub fn number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

/// Six-dot oil gauge, e.g. "●●●○○○"
pub fn oil_gauge(oil_level: u8) -> String {
    let filled = oil_dots(oil_level);
    let mut gauge = "●".repeat(filled as usize);
    gauge.push_str(&"○".repeat((OIL_DOT_COUNT - filled) as usize));
    gauge
}

/// Five-star health rating, e.g. "★★★★☆"
pub fn stars(score: f64) -> String {
    let filled = health_stars(score).min(MAX_STARS);
    let mut rating = "★".repeat(filled as usize);
    rating.push_str(&"☆".repeat((MAX_STARS - filled) as usize));
    rating
}

/// Horizontal bar for a 0-100 percentage
pub fn bar(percent: u8, width: usize) -> String {
    let filled = (usize::from(percent.min(100)) * width + 50) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// One catalog entry per line
pub fn food_line(food: &FoodCatalogEntry) -> String {
    format!(
        "{:>3}  {} {:<28} {:>4} kcal  oil {} {:>3}  health {}",
        food.id,
        food.emoji,
        food.name,
        number(food.calories),
        oil_gauge(food.oil_level),
        food.oil_level,
        stars(food.health_score),
    )
}
