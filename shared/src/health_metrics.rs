//! BMI for the registration summary
//!
//! Categories carry a fixed colour and advisory message and are not
//! personalised beyond the category.

use serde::{Deserialize, Serialize};

/// Shown when weight or height is missing
pub const BMI_MISSING_INPUT_MESSAGE: &str =
    "Please provide both height and weight for BMI calculation.";

/// Neutral colour used when no BMI can be derived
pub const BMI_MISSING_INPUT_COLOR: &str = "#9aa6b2";

/// Upper bounds (exclusive) for each category below `Obese`
const BMI_UPPER_BOUNDS: [(f64, BmiCategory); 3] = [
    (18.5, BmiCategory::Underweight),
    (25.0, BmiCategory::Healthy),
    (30.0, BmiCategory::Overweight),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Healthy,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Healthy => "Healthy",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }

    /// Display colour for the category badge
    pub fn color(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "#3b82f6",
            BmiCategory::Healthy => "#10b981",
            BmiCategory::Overweight => "#f97316",
            BmiCategory::Obese => "#ef4444",
        }
    }

    /// Oil-consumption advice for the category
    pub fn insight(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => {
                "You may need to increase your caloric intake. Focus on healthy fats like olive or canola oil in moderation."
            }
            BmiCategory::Healthy => {
                "You have a healthy BMI. Maintain a balanced diet with moderate oil consumption, focusing on healthier oils like olive oil."
            }
            BmiCategory::Overweight => {
                "Consider reducing oil consumption and opt for heart-healthy oils like olive or avocado oil in smaller quantities."
            }
            BmiCategory::Obese => {
                "Significantly reduce oil consumption and focus on healthier cooking methods like steaming, grilling, or air frying."
            }
        }
    }
}

/// BMI shown on the registration summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmiAssessment {
    /// BMI rounded to one decimal
    pub bmi: f64,
    pub category: BmiCategory,
    pub color: String,
    pub insight: String,
}

/// kg / m²
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    weight_kg / (height_cm / 100.0).powi(2)
}

pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn classify_bmi(bmi: f64) -> BmiCategory {
    BMI_UPPER_BOUNDS
        .iter()
        .find(|(upper, _)| bmi < *upper)
        .map_or(BmiCategory::Obese, |(_, category)| *category)
}

/// Derive the BMI assessment, or `None` when an input is missing or unusable
///
/// The category is classified from the unrounded value.
pub fn assess_bmi(weight_kg: Option<f64>, height_cm: Option<f64>) -> Option<BmiAssessment> {
    let (weight_kg, height_cm) = (weight_kg?, height_cm?);
    if weight_kg <= 0.0 || height_cm <= 0.0 {
        return None;
    }
    let bmi = calculate_bmi(weight_kg, height_cm);
    if !bmi.is_finite() {
        return None;
    }
    let category = classify_bmi(bmi);

    Some(BmiAssessment {
        bmi: round_to_tenth(bmi),
        category,
        color: category.color().to_string(),
        insight: category.insight().to_string(),
    })
}
