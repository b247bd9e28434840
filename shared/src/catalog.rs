//! Static food catalog and lookup helpers
//!
//! The catalog is fixed at build time. Every lookup is a total function
//! returning entries in catalog order.

use crate::models::{FoodCatalogEntry, FoodCategory};
use once_cell::sync::Lazy;

/// Tier colours shared by the catalog and tracking views
pub mod colors {
    pub const GOOD: &str = "#10B981";
    pub const MODERATE: &str = "#F59E0B";
    pub const FAIR: &str = "#FB923C";
    pub const HIGH: &str = "#EF4444";
}

/// Dots drawn in the oil-intensity gauge
pub const OIL_DOT_COUNT: u8 = 6;

/// Entries shown per category when no search query is typed
const POPULAR_PER_CATEGORY: usize = 3;

struct Seed {
    id: u32,
    name: &'static str,
    emoji: &'static str,
    category: FoodCategory,
    calories: f64,
    oil_content: &'static str,
    oil_level: u8,
    oil_amount: &'static str,
    cooking_method: &'static str,
    health_score: f64,
    protein: f64,
    carbs: f64,
    fat: f64,
    fiber: f64,
    description: &'static str,
    better_alternative: Option<&'static str>,
    tips: &'static str,
}

impl Seed {
    fn to_entry(&self) -> FoodCatalogEntry {
        FoodCatalogEntry {
            id: self.id,
            name: self.name.to_string(),
            emoji: self.emoji.to_string(),
            category: self.category,
            calories: self.calories,
            oil_content: self.oil_content.to_string(),
            oil_level: self.oil_level,
            oil_amount: self.oil_amount.to_string(),
            cooking_method: self.cooking_method.to_string(),
            health_score: self.health_score,
            protein: self.protein,
            carbs: self.carbs,
            fat: self.fat,
            fiber: self.fiber,
            description: self.description.to_string(),
            better_alternative: self.better_alternative.map(str::to_string),
            tips: self.tips.to_string(),
        }
    }
}

const SEEDS: &[Seed] = &[
    // Low oil
    Seed {
        id: 1,
        name: "Dal (Yellow Lentils)",
        emoji: "🍛",
        category: FoodCategory::Healthy,
        calories: 165.0,
        oil_content: "Low",
        oil_level: 15,
        oil_amount: "0.5 tsp",
        cooking_method: "Boiled with tempering",
        health_score: 9.0,
        protein: 12.0,
        carbs: 28.0,
        fat: 1.0,
        fiber: 8.0,
        description: "Traditional Indian lentil curry with minimal oil",
        better_alternative: None,
        tips: "Rich in protein and fiber, perfect for daily consumption",
    },
    Seed {
        id: 2,
        name: "Roti (Wheat Chapati)",
        emoji: "🫓",
        category: FoodCategory::Healthy,
        calories: 80.0,
        oil_content: "Very Low",
        oil_level: 5,
        oil_amount: "0.1 tsp",
        cooking_method: "Dry roasted",
        health_score: 8.0,
        protein: 3.0,
        carbs: 15.0,
        fat: 0.5,
        fiber: 2.0,
        description: "Whole wheat flatbread with minimal oil",
        better_alternative: None,
        tips: "Great source of complex carbohydrates",
    },
    Seed {
        id: 3,
        name: "Grilled Chicken Breast",
        emoji: "🍗",
        category: FoodCategory::Healthy,
        calories: 185.0,
        oil_content: "Low",
        oil_level: 20,
        oil_amount: "0.5 tsp",
        cooking_method: "Grilled",
        health_score: 9.0,
        protein: 35.0,
        carbs: 0.0,
        fat: 4.0,
        fiber: 0.0,
        description: "Lean protein grilled with minimal oil",
        better_alternative: None,
        tips: "Excellent source of lean protein",
    },
    Seed {
        id: 4,
        name: "Steamed Rice",
        emoji: "🍚",
        category: FoodCategory::Healthy,
        calories: 130.0,
        oil_content: "None",
        oil_level: 0,
        oil_amount: "0 tsp",
        cooking_method: "Steamed",
        health_score: 7.0,
        protein: 3.0,
        carbs: 28.0,
        fat: 0.3,
        fiber: 0.4,
        description: "Plain steamed rice without any oil",
        better_alternative: None,
        tips: "Good source of energy, pair with protein",
    },
    Seed {
        id: 5,
        name: "Mixed Vegetable Salad",
        emoji: "🥗",
        category: FoodCategory::Healthy,
        calories: 50.0,
        oil_content: "Very Low",
        oil_level: 8,
        oil_amount: "0.2 tsp",
        cooking_method: "Raw with light dressing",
        health_score: 10.0,
        protein: 2.0,
        carbs: 8.0,
        fat: 1.0,
        fiber: 4.0,
        description: "Fresh vegetables with light olive oil dressing",
        better_alternative: None,
        tips: "High in vitamins and minerals",
    },
    // Medium oil
    Seed {
        id: 6,
        name: "Chicken Curry (Home-style)",
        emoji: "🍛",
        category: FoodCategory::Moderate,
        calories: 285.0,
        oil_content: "Medium",
        oil_level: 45,
        oil_amount: "1.5 tsp",
        cooking_method: "Pan-cooked with spices",
        health_score: 6.0,
        protein: 25.0,
        carbs: 8.0,
        fat: 18.0,
        fiber: 2.0,
        description: "Traditional home-style chicken curry",
        better_alternative: Some("Grilled Chicken with steamed vegetables"),
        tips: "Reduce oil by 50% for healthier version",
    },
    Seed {
        id: 7,
        name: "Aloo Paratha",
        emoji: "🫓",
        category: FoodCategory::Moderate,
        calories: 320.0,
        oil_content: "Medium",
        oil_level: 55,
        oil_amount: "2 tsp",
        cooking_method: "Pan-fried",
        health_score: 5.0,
        protein: 8.0,
        carbs: 45.0,
        fat: 12.0,
        fiber: 4.0,
        description: "Stuffed potato flatbread with ghee/oil",
        better_alternative: Some("Roti with boiled potato curry"),
        tips: "Use less oil and add yogurt for balance",
    },
    Seed {
        id: 8,
        name: "Pasta with Olive Oil",
        emoji: "🍝",
        category: FoodCategory::Moderate,
        calories: 220.0,
        oil_content: "Medium",
        oil_level: 40,
        oil_amount: "1 tbsp",
        cooking_method: "Boiled with oil dressing",
        health_score: 6.0,
        protein: 8.0,
        carbs: 35.0,
        fat: 8.0,
        fiber: 2.0,
        description: "Pasta with olive oil and herbs",
        better_alternative: Some("Pasta with tomato-based sauce"),
        tips: "Add vegetables for better nutrition",
    },
    Seed {
        id: 9,
        name: "Vegetable Sandwich",
        emoji: "🥪",
        category: FoodCategory::Moderate,
        calories: 280.0,
        oil_content: "Medium",
        oil_level: 35,
        oil_amount: "1 tsp",
        cooking_method: "Grilled with butter",
        health_score: 6.0,
        protein: 12.0,
        carbs: 40.0,
        fat: 10.0,
        fiber: 6.0,
        description: "Grilled sandwich with vegetables and cheese",
        better_alternative: Some("Open sandwich without grilling"),
        tips: "Use whole grain bread for better nutrition",
    },
    // Fried and fast food
    Seed {
        id: 10,
        name: "Samosa",
        emoji: "🥟",
        category: FoodCategory::High,
        calories: 250.0,
        oil_content: "Very High",
        oil_level: 85,
        oil_amount: "2.5 tbsp",
        cooking_method: "Deep fried",
        health_score: 3.0,
        protein: 6.0,
        carbs: 25.0,
        fat: 18.0,
        fiber: 3.0,
        description: "Deep-fried pastry with spiced filling",
        better_alternative: Some("Baked samosa (-60% oil)"),
        tips: "Limit to special occasions, drink green tea after",
    },
    Seed {
        id: 11,
        name: "French Fries",
        emoji: "🍟",
        category: FoodCategory::High,
        calories: 365.0,
        oil_content: "Very High",
        oil_level: 90,
        oil_amount: "3 tbsp",
        cooking_method: "Deep fried",
        health_score: 2.0,
        protein: 4.0,
        carbs: 48.0,
        fat: 17.0,
        fiber: 4.0,
        description: "Deep-fried potato strips",
        better_alternative: Some("Air-fried potato wedges (-70% oil)"),
        tips: "Try baked sweet potato fries instead",
    },
    Seed {
        id: 12,
        name: "Fried Chicken",
        emoji: "🍗",
        category: FoodCategory::High,
        calories: 320.0,
        oil_content: "Very High",
        oil_level: 88,
        oil_amount: "3 tbsp",
        cooking_method: "Deep fried",
        health_score: 2.0,
        protein: 25.0,
        carbs: 8.0,
        fat: 22.0,
        fiber: 0.0,
        description: "Battered and deep-fried chicken",
        better_alternative: Some("Grilled chicken breast (-75% oil)"),
        tips: "Remove skin to reduce oil absorption",
    },
    Seed {
        id: 13,
        name: "Pakora/Bhajiya",
        emoji: "🧄",
        category: FoodCategory::High,
        calories: 180.0,
        oil_content: "Very High",
        oil_level: 92,
        oil_amount: "2 tbsp",
        cooking_method: "Deep fried",
        health_score: 2.0,
        protein: 4.0,
        carbs: 15.0,
        fat: 13.0,
        fiber: 2.0,
        description: "Deep-fried vegetable fritters",
        better_alternative: Some("Steamed vegetable dumplings (-80% oil)"),
        tips: "Drain on paper towels and eat immediately",
    },
    Seed {
        id: 14,
        name: "Pizza Slice (Margherita)",
        emoji: "🍕",
        category: FoodCategory::High,
        calories: 285.0,
        oil_content: "High",
        oil_level: 65,
        oil_amount: "2 tsp",
        cooking_method: "Baked with cheese",
        health_score: 4.0,
        protein: 12.0,
        carbs: 35.0,
        fat: 12.0,
        fiber: 2.0,
        description: "Cheese pizza with tomato sauce",
        better_alternative: Some("Thin crust with vegetables (-30% calories)"),
        tips: "Add vegetables and reduce cheese",
    },
    Seed {
        id: 15,
        name: "Burger (Chicken)",
        emoji: "🍔",
        category: FoodCategory::High,
        calories: 540.0,
        oil_content: "High",
        oil_level: 70,
        oil_amount: "2.5 tbsp",
        cooking_method: "Fried patty with mayo",
        health_score: 3.0,
        protein: 25.0,
        carbs: 45.0,
        fat: 28.0,
        fiber: 3.0,
        description: "Chicken burger with mayo and fries",
        better_alternative: Some("Grilled chicken wrap (-50% oil)"),
        tips: "Ask for grilled patty and skip mayo",
    },
];

static CATALOG: Lazy<Vec<FoodCatalogEntry>> =
    Lazy::new(|| SEEDS.iter().map(Seed::to_entry).collect());

/// The full catalog in insertion order
pub fn all_foods() -> &'static [FoodCatalogEntry] {
    &CATALOG
}

/// All entries whose category matches exactly
pub fn foods_by_category(category: FoodCategory) -> Vec<&'static FoodCatalogEntry> {
    CATALOG.iter().filter(|f| f.category == category).collect()
}

/// Case-insensitive substring search over name and description
///
/// A blank query returns the whole catalog. Otherwise the query is matched
/// as typed, surrounding whitespace included.
pub fn search_foods(query: &str) -> Vec<&'static FoodCatalogEntry> {
    if query.trim().is_empty() {
        return CATALOG.iter().collect();
    }
    let needle = query.to_lowercase();
    CATALOG
        .iter()
        .filter(|f| {
            f.name.to_lowercase().contains(&needle)
                || f.description.to_lowercase().contains(&needle)
        })
        .collect()
}

/// First entry with the given id
pub fn food_by_id(id: u32) -> Option<&'static FoodCatalogEntry> {
    CATALOG.iter().find(|f| f.id == id)
}

/// Entry whose name matches case-insensitively
pub fn food_by_name(name: &str) -> Option<&'static FoodCatalogEntry> {
    CATALOG.iter().find(|f| f.name.eq_ignore_ascii_case(name.trim()))
}

/// Healthy swaps suggested for high-oil foods
pub fn healthy_alternatives(category: FoodCategory) -> Vec<&'static FoodCatalogEntry> {
    match category {
        FoodCategory::High => foods_by_category(FoodCategory::Healthy)
            .into_iter()
            .take(3)
            .collect(),
        _ => Vec::new(),
    }
}

/// Default suggestions: the first few entries of each category
pub fn popular_foods() -> Vec<&'static FoodCatalogEntry> {
    FoodCategory::ALL
        .iter()
        .flat_map(|c| foods_by_category(*c).into_iter().take(POPULAR_PER_CATEGORY))
        .collect()
}

/// Colour for a 0-100 oil level
pub fn oil_level_color(oil_level: u8) -> &'static str {
    if oil_level <= 20 {
        colors::GOOD
    } else if oil_level <= 50 {
        colors::MODERATE
    } else {
        colors::HIGH
    }
}

/// Colour for a 0-10 health score
pub fn health_score_color(score: f64) -> &'static str {
    if score >= 8.0 {
        colors::GOOD
    } else if score >= 6.0 {
        colors::MODERATE
    } else if score >= 4.0 {
        colors::FAIR
    } else {
        colors::HIGH
    }
}

/// Filled dots in the six-dot oil gauge
pub fn oil_dots(oil_level: u8) -> u8 {
    let scaled = f64::from(oil_level.min(100)) / 100.0 * f64::from(OIL_DOT_COUNT);
    (0..OIL_DOT_COUNT).filter(|i| f64::from(*i) < scaled).count() as u8
}

/// Star rating shown next to a health score
pub fn health_stars(score: f64) -> u8 {
    (score.clamp(0.0, 10.0) / 2.0).floor() as u8
}
