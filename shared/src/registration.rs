//! Registration wizard
//!
//! Five-step onboarding form driven by a pure transition function. A
//! rejected action returns an error and the caller keeps its previous
//! state; the function never mutates its input.

use crate::errors::{StoreError, WizardError};
use crate::health_metrics::{assess_bmi, BmiAssessment};
use crate::models::{initial_of, UserData};
use crate::repository::ProfileRepository;
use crate::validation::{
    require, validate_age, validate_email, validate_height_cm, validate_name, validate_weight,
    ValidationError,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

// ============================================================================
// Form Choices
// ============================================================================

/// Closed set of form options with their stored string values
macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal {
            $($variant:ident => $value:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|c| c.as_str().eq_ignore_ascii_case(s))
                    .ok_or_else(|| {
                        let options: Vec<&str> = $name::ALL.iter().map(|c| c.as_str()).collect();
                        format!(
                            "Invalid {} '{}'. Must be one of: {}",
                            $label,
                            s,
                            options.join(", ")
                        )
                    })
            }
        }
    };
}

choice_enum! {
    ActivityLevel, "activity level" {
        Sedentary => "sedentary",
        Light => "light",
        Moderate => "moderate",
        Active => "active",
    }
}

choice_enum! {
    MedicalCondition, "medical condition" {
        None => "none",
        Diabetes => "diabetes",
        HighBloodPressure => "highBP",
        HeartDisease => "heartDisease",
        Thyroid => "thyroid",
        Kidney => "kidney",
        Liver => "liver",
        Obesity => "obesity",
        Other => "other",
    }
}

choice_enum! {
    HouseholdSize, "household size" {
        One => "1",
        Two => "2",
        ThreeToFour => "3-4",
        FiveToSix => "5-6",
        SevenPlus => "7+",
    }
}

choice_enum! {
    CookingFrequency, "cooking frequency" {
        Rarely => "rarely",
        Sometimes => "sometimes",
        Frequently => "frequently",
        Multiple => "multiple",
    }
}

choice_enum! {
    CookingOil, "cooking oil" {
        Mustard => "mustard",
        Sunflower => "sunflower",
        Soybean => "soybean",
        Olive => "olive",
        Groundnut => "groundnut",
        Coconut => "coconut",
        Ghee => "ghee",
        RiceBran => "rice-bran",
        Sesame => "sesame",
        Mixed => "mixed",
        Other => "other",
    }
}

choice_enum! {
    /// Oil bought per month
    MonthlyOilUsage, "monthly oil usage" {
        BelowOneLitre => "below-1L",
        OneToTwoLitres => "1-2L",
        ThreeToFiveLitres => "3-5L",
        MoreThanFiveLitres => "more-than-5L",
    }
}

choice_enum! {
    EatingOutFrequency, "eating out frequency" {
        Never => "never",
        Rarely => "rarely",
        Sometimes => "sometimes",
        Often => "often",
        VeryOften => "very-often",
    }
}

choice_enum! {
    CholesterolLevel, "cholesterol level" {
        Normal => "normal",
        Borderline => "borderline",
        High => "high",
    }
}

choice_enum! {
    BloodSugarLevel, "blood sugar level" {
        Normal => "normal",
        Prediabetic => "prediabetic",
        Diabetic => "diabetic",
    }
}

choice_enum! {
    BloodPressure, "blood pressure" {
        Normal => "normal",
        Elevated => "elevated",
        High => "high",
    }
}

choice_enum! {
    NotificationPreference, "notification preference" {
        Daily => "daily",
        Weekly => "weekly",
        None => "none",
    }
}

// ============================================================================
// Steps
// ============================================================================

/// Wizard page, serialized as its 1-based number
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum WizardStep {
    Profile = 1,
    Household = 2,
    Health = 3,
    Preferences = 4,
    Summary = 5,
}

impl WizardStep {
    pub const ALL: [WizardStep; 5] = [
        WizardStep::Profile,
        WizardStep::Household,
        WizardStep::Health,
        WizardStep::Preferences,
        WizardStep::Summary,
    ];

    pub fn number(&self) -> u8 {
        *self as u8
    }

    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.number() == number)
    }

    pub fn next(&self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn previous(&self) -> Option<Self> {
        self.number().checked_sub(1).and_then(Self::from_number)
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Profile => "Personal Information",
            WizardStep::Household => "Cooking & Household",
            WizardStep::Health => "Health Indicators",
            WizardStep::Preferences => "Preferences",
            WizardStep::Summary => "Summary",
        }
    }

    /// Whether Skip & Explore is offered on this step
    pub fn allows_skip(&self) -> bool {
        matches!(self, WizardStep::Health | WizardStep::Preferences)
    }
}

impl From<WizardStep> for u8 {
    fn from(step: WizardStep) -> Self {
        step.number()
    }
}

impl TryFrom<u8> for WizardStep {
    type Error = String;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Self::from_number(number).ok_or_else(|| format!("Invalid wizard step {}", number))
    }
}

// ============================================================================
// Form
// ============================================================================

/// Everything collected by the wizard
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationForm {
    pub name: String,
    pub age: Option<u32>,
    pub email: Option<String>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub activity_level: Option<ActivityLevel>,
    pub medical_condition: Option<MedicalCondition>,
    pub other_condition: Option<String>,
    pub household_size: Option<HouseholdSize>,
    pub cooking_frequency: Option<CookingFrequency>,
    pub dominant_oil: Option<CookingOil>,
    pub monthly_oil_usage: Option<MonthlyOilUsage>,
    pub eating_out_frequency: Option<EatingOutFrequency>,
    pub cholesterol_level: Option<CholesterolLevel>,
    pub blood_sugar_level: Option<BloodSugarLevel>,
    pub blood_pressure: Option<BloodPressure>,
    pub digestive_issues: bool,
    pub notification_preference: Option<NotificationPreference>,
    pub accept_terms: bool,
}

/// A single field edit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum FieldUpdate {
    Name(String),
    Age(Option<u32>),
    Email(Option<String>),
    WeightKg(Option<f64>),
    HeightCm(Option<f64>),
    ActivityLevel(Option<ActivityLevel>),
    MedicalCondition(Option<MedicalCondition>),
    OtherCondition(Option<String>),
    HouseholdSize(Option<HouseholdSize>),
    CookingFrequency(Option<CookingFrequency>),
    DominantOil(Option<CookingOil>),
    MonthlyOilUsage(Option<MonthlyOilUsage>),
    EatingOutFrequency(Option<EatingOutFrequency>),
    CholesterolLevel(Option<CholesterolLevel>),
    BloodSugarLevel(Option<BloodSugarLevel>),
    BloodPressure(Option<BloodPressure>),
    DigestiveIssues(bool),
    NotificationPreference(Option<NotificationPreference>),
    AcceptTerms(bool),
}

/// Blank text counts as not entered
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl RegistrationForm {
    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::Name(v) => self.name = v,
            FieldUpdate::Age(v) => self.age = v,
            FieldUpdate::Email(v) => self.email = non_blank(v),
            FieldUpdate::WeightKg(v) => self.weight_kg = v,
            FieldUpdate::HeightCm(v) => self.height_cm = v,
            FieldUpdate::ActivityLevel(v) => self.activity_level = v,
            FieldUpdate::MedicalCondition(v) => self.medical_condition = v,
            FieldUpdate::OtherCondition(v) => self.other_condition = non_blank(v),
            FieldUpdate::HouseholdSize(v) => self.household_size = v,
            FieldUpdate::CookingFrequency(v) => self.cooking_frequency = v,
            FieldUpdate::DominantOil(v) => self.dominant_oil = v,
            FieldUpdate::MonthlyOilUsage(v) => self.monthly_oil_usage = v,
            FieldUpdate::EatingOutFrequency(v) => self.eating_out_frequency = v,
            FieldUpdate::CholesterolLevel(v) => self.cholesterol_level = v,
            FieldUpdate::BloodSugarLevel(v) => self.blood_sugar_level = v,
            FieldUpdate::BloodPressure(v) => self.blood_pressure = v,
            FieldUpdate::DigestiveIssues(v) => self.digestive_issues = v,
            FieldUpdate::NotificationPreference(v) => self.notification_preference = v,
            FieldUpdate::AcceptTerms(v) => self.accept_terms = v,
        }
    }

    /// Check the fields a step requires before moving past it
    pub fn validate_step(&self, step: WizardStep) -> Result<(), ValidationError> {
        match step {
            WizardStep::Profile => {
                ValidationError::check("name", validate_name(&self.name))?;
                require("age", &self.age)?;
                if let Some(age) = self.age {
                    ValidationError::check("age", validate_age(age))?;
                }
                if let Some(email) = &self.email {
                    ValidationError::check("email", validate_email(email))?;
                }
                if let Some(weight) = self.weight_kg {
                    ValidationError::check("weight_kg", validate_weight(weight))?;
                }
                if let Some(height) = self.height_cm {
                    ValidationError::check("height_cm", validate_height_cm(height))?;
                }
                require("activity_level", &self.activity_level)
            }
            WizardStep::Household => {
                require("household_size", &self.household_size)?;
                require("cooking_frequency", &self.cooking_frequency)?;
                require("dominant_oil", &self.dominant_oil)?;
                require("monthly_oil_usage", &self.monthly_oil_usage)?;
                require("eating_out_frequency", &self.eating_out_frequency)
            }
            WizardStep::Health | WizardStep::Preferences | WizardStep::Summary => Ok(()),
        }
    }

    /// Required fields of a step that have not been filled in
    pub fn missing_fields(&self, step: WizardStep) -> Vec<String> {
        let checks: Vec<(&str, bool)> = match step {
            WizardStep::Profile => vec![
                ("name", self.name.trim().is_empty()),
                ("age", self.age.is_none()),
                ("activity_level", self.activity_level.is_none()),
            ],
            WizardStep::Household => vec![
                ("household_size", self.household_size.is_none()),
                ("cooking_frequency", self.cooking_frequency.is_none()),
                ("dominant_oil", self.dominant_oil.is_none()),
                ("monthly_oil_usage", self.monthly_oil_usage.is_none()),
                ("eating_out_frequency", self.eating_out_frequency.is_none()),
            ],
            _ => Vec::new(),
        };
        checks
            .into_iter()
            .filter(|(_, missing)| *missing)
            .map(|(field, _)| field.to_string())
            .collect()
    }

    /// BMI for the summary page, `None` until weight and height are known
    pub fn bmi(&self) -> Option<BmiAssessment> {
        assess_bmi(self.weight_kg, self.height_cm)
    }

    /// Identity record written on full registration
    pub fn user_data(&self) -> UserData {
        let name = self.name.trim();
        UserData {
            name: name.to_string(),
            initial: initial_of(name),
            email: self.email.clone(),
            age: self.age,
        }
    }
}

// ============================================================================
// State Machine
// ============================================================================

/// How a finished wizard ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionOutcome {
    Registered,
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WizardState {
    InProgress {
        step: WizardStep,
        form: RegistrationForm,
    },
    Completed {
        form: RegistrationForm,
        outcome: CompletionOutcome,
    },
    /// Left via Back on the first step
    Abandoned,
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardState {
    pub fn new() -> Self {
        WizardState::InProgress {
            step: WizardStep::Profile,
            form: RegistrationForm::default(),
        }
    }

    pub fn step(&self) -> Option<WizardStep> {
        match self {
            WizardState::InProgress { step, .. } => Some(*step),
            _ => None,
        }
    }

    pub fn form(&self) -> Option<&RegistrationForm> {
        match self {
            WizardState::InProgress { form, .. } | WizardState::Completed { form, .. } => Some(form),
            WizardState::Abandoned => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        !matches!(self, WizardState::InProgress { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Action {
    Update(FieldUpdate),
    Next,
    Back,
    SkipAndExplore,
    Complete,
}

/// Apply an action, returning the next state
pub fn transition(state: &WizardState, action: Action) -> Result<WizardState, WizardError> {
    let (step, form) = match state {
        WizardState::InProgress { step, form } => (*step, form),
        _ => return Err(WizardError::Finished),
    };

    let next = match action {
        Action::Update(update) => {
            let mut form = form.clone();
            form.apply(update);
            WizardState::InProgress { step, form }
        }
        Action::Next => {
            let target = match step {
                WizardStep::Summary => return Err(WizardError::NoNextStep),
                _ => step.next().ok_or(WizardError::NoNextStep)?,
            };
            form.validate_step(step)?;
            WizardState::InProgress {
                step: target,
                form: form.clone(),
            }
        }
        Action::Back => match step.previous() {
            Some(previous) => WizardState::InProgress {
                step: previous,
                form: form.clone(),
            },
            None => WizardState::Abandoned,
        },
        Action::SkipAndExplore => {
            if !step.allows_skip() {
                return Err(WizardError::SkipNotAllowed(step));
            }
            WizardState::Completed {
                form: form.clone(),
                outcome: CompletionOutcome::Skipped,
            }
        }
        Action::Complete => {
            if step != WizardStep::Summary {
                return Err(WizardError::NotAtSummary(step));
            }
            // Fields may have been edited after their step was passed
            form.validate_step(WizardStep::Profile)?;
            form.validate_step(WizardStep::Household)?;
            if !form.accept_terms {
                return Err(WizardError::ConsentRequired);
            }
            WizardState::Completed {
                form: form.clone(),
                outcome: CompletionOutcome::Registered,
            }
        }
    };

    debug!(from = step.number(), to = ?next.step(), "Wizard transition");
    Ok(next)
}

/// Write the result of a finished wizard to the profile repository
///
/// Returns the identity that was stored, if any. States other than
/// `Completed` write nothing.
pub fn persist_completion<R: ProfileRepository>(
    state: &WizardState,
    repo: &mut R,
) -> Result<Option<UserData>, StoreError> {
    let (form, outcome) = match state {
        WizardState::Completed { form, outcome } => (form, *outcome),
        _ => return Ok(None),
    };

    let user = match outcome {
        CompletionOutcome::Registered => Some(form.user_data()),
        CompletionOutcome::Skipped => {
            let name = form.name.trim();
            (!name.is_empty()).then(|| UserData::from_name(name))
        }
    };

    if let Some(user) = &user {
        repo.save_user(user)?;
    }
    repo.set_logged_in(true)?;

    info!(outcome = ?outcome, has_profile = user.is_some(), "Registration finished");
    Ok(user)
}
