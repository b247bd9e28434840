//! Registration input checks
//!
//! Bounds mirror the inputs on the registration screens: age 1-120 years,
//! weight 1-300 kg, height 50-250 cm.

use std::ops::RangeInclusive;
use validator::ValidateEmail;

pub const AGE_YEARS: RangeInclusive<u32> = 1..=120;
pub const WEIGHT_KG: RangeInclusive<f64> = 1.0..=300.0;
pub const HEIGHT_CM: RangeInclusive<f64> = 50.0..=250.0;
pub const MAX_NAME_CHARS: usize = 100;
pub const MAX_EMAIL_LEN: usize = 255;

/// Check a measurement against an inclusive range, rejecting NaN and infinities
fn measurement_in(
    value: f64,
    range: &RangeInclusive<f64>,
    what: &str,
    unit: &str,
) -> Result<(), String> {
    if !value.is_finite() {
        return Err(format!("{} must be a valid number", what));
    }
    if value < *range.start() {
        return Err(format!("{} must be at least {} {}", what, range.start(), unit));
    }
    if value > *range.end() {
        return Err(format!("{} must be at most {} {}", what, range.end(), unit));
    }
    Ok(())
}

/// Optional contact address; when given it has to look like an email
pub fn validate_email(email: &str) -> Result<(), String> {
    match email {
        "" => Err("Email cannot be empty".to_string()),
        e if e.len() > MAX_EMAIL_LEN => Err("Email too long".to_string()),
        e if !e.validate_email() => Err("Invalid email format".to_string()),
        _ => Ok(()),
    }
}

pub fn validate_name(name: &str) -> Result<(), String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Name is required".to_string());
    }
    if trimmed.chars().count() > MAX_NAME_CHARS {
        return Err(format!("Name must be at most {} characters", MAX_NAME_CHARS));
    }
    Ok(())
}

pub fn validate_age(age: u32) -> Result<(), String> {
    if AGE_YEARS.contains(&age) {
        Ok(())
    } else if age < *AGE_YEARS.start() {
        Err(format!("Age must be at least {} year", AGE_YEARS.start()))
    } else {
        Err(format!("Age must be at most {} years", AGE_YEARS.end()))
    }
}

pub fn validate_weight(weight_kg: f64) -> Result<(), String> {
    measurement_in(weight_kg, &WEIGHT_KG, "Weight", "kg")
}

pub fn validate_height_cm(height_cm: f64) -> Result<(), String> {
    measurement_in(height_cm, &HEIGHT_CM, "Height", "cm")
}

/// Require a selection to have been made
pub fn require<T>(field: &str, value: &Option<T>) -> Result<(), ValidationError> {
    match value {
        Some(_) => Ok(()),
        None => Err(ValidationError::new(field, "is required")),
    }
}

/// Label shown to the user for a form field
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "name" => "Full Name",
        "age" => "Age",
        "email" => "Email",
        "weight" | "weight_kg" => "Weight",
        "height" | "height_cm" => "Height",
        "activity_level" => "Activity Level",
        "medical_condition" => "Medical Condition",
        "other_condition" => "Other Condition",
        "household_size" => "Household Size",
        "cooking_frequency" => "Cooking Frequency",
        "dominant_oil" => "Primary Cooking Oil",
        "monthly_oil_usage" => "Monthly Oil Purchase",
        "eating_out_frequency" => "Eating Out Frequency",
        "cholesterol_level" => "Cholesterol",
        "blood_sugar_level" => "Blood Sugar",
        "blood_pressure" => "Blood Pressure",
        "digestive_issues" => "Digestive Issues with Oils",
        "notification_preference" => "Notifications",
        "accept_terms" => "Terms & Conditions",
        _ => field_name,
    }
}

pub fn get_missing_fields_labels(fields: &[String]) -> Vec<String> {
    fields
        .iter()
        .map(|f| get_field_display_label(f).to_owned())
        .collect()
}

/// A rejected form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub display_label: String,
}

impl ValidationError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_owned(),
            message: message.to_owned(),
            display_label: get_field_display_label(field).to_owned(),
        }
    }

    /// Attach the field name to a plain check result
    pub fn check(field: &str, result: Result<(), String>) -> Result<(), Self> {
        result.map_err(|message| Self::new(field, &message))
    }

    pub fn user_message(&self) -> String {
        format!("{}: {}", self.display_label, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_email_checks() {
        assert!(validate_email("meera@example.com").is_ok());
        assert!(validate_email("first.last@mail.co.in").is_ok());
        assert_eq!(validate_email(""), Err("Email cannot be empty".to_string()));
        assert_eq!(validate_email("meera"), Err("Invalid email format".to_string()));
        assert!(validate_email("two words@example.com").is_err());
        let long = format!("{}@example.com", "a".repeat(250));
        assert_eq!(validate_email(&long), Err("Email too long".to_string()));
    }

    #[test]
    fn test_name_checks() {
        assert!(validate_name("Priya").is_ok());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"a".repeat(101)).is_err());
    }

    #[test]
    fn test_age_bounds() {
        assert!(validate_age(1).is_ok());
        assert!(validate_age(120).is_ok());
        assert_eq!(validate_age(0), Err("Age must be at least 1 year".to_string()));
        assert_eq!(validate_age(121), Err("Age must be at most 120 years".to_string()));
    }

    #[test]
    fn test_measurement_messages() {
        assert_eq!(validate_weight(0.5), Err("Weight must be at least 1 kg".to_string()));
        assert_eq!(validate_weight(300.5), Err("Weight must be at most 300 kg".to_string()));
        assert_eq!(validate_height_cm(49.9), Err("Height must be at least 50 cm".to_string()));
        assert_eq!(validate_height_cm(250.1), Err("Height must be at most 250 cm".to_string()));
        assert_eq!(
            validate_height_cm(f64::NAN),
            Err("Height must be a valid number".to_string())
        );
        assert!(validate_weight(f64::INFINITY).is_err());
    }

    #[test]
    fn test_require() {
        assert!(require("activity_level", &Some(1)).is_ok());
        let err = require::<u8>("activity_level", &None).unwrap_err();
        assert_eq!(err.user_message(), "Activity Level: is required");
    }

    #[test]
    fn test_labels() {
        assert_eq!(get_field_display_label("dominant_oil"), "Primary Cooking Oil");
        assert_eq!(get_field_display_label("weight_kg"), "Weight");
        assert_eq!(get_field_display_label("favourite_snack"), "favourite_snack");
        assert_eq!(
            get_missing_fields_labels(&["name".to_string(), "age".to_string()]),
            vec!["Full Name".to_string(), "Age".to_string()]
        );
    }

    #[test]
    fn test_check_attaches_field() {
        let err = ValidationError::check("weight_kg", validate_weight(0.0)).unwrap_err();
        assert_eq!(err.field, "weight_kg");
        assert_eq!(err.user_message(), "Weight: Weight must be at least 1 kg");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_weights_inside_bounds_pass(weight in 1.0f64..=300.0) {
            prop_assert!(validate_weight(weight).is_ok());
        }

        #[test]
        fn prop_heights_outside_bounds_fail(
            height in prop_oneof![0.0f64..49.99, 250.01f64..1000.0]
        ) {
            prop_assert!(validate_height_cm(height).is_err(), "{} accepted", height);
        }

        #[test]
        fn prop_age_matches_range(age in 0u32..200) {
            prop_assert_eq!(validate_age(age).is_ok(), AGE_YEARS.contains(&age));
        }
    }
}
