//! Non-interactive run of the registration wizard

use crate::cli::RegisterArgs;
use crate::error::{AppError, AppResult};
use crate::render::number;
use crate::state::AppState;
use std::io::Write;
use swasth_kadam_shared::health_metrics::BMI_MISSING_INPUT_MESSAGE;
use swasth_kadam_shared::registration::FieldUpdate;
use swasth_kadam_shared::validation::get_missing_fields_labels;
use swasth_kadam_shared::{
    persist_completion, transition, Action, CompletionOutcome, KeyValueStore, WizardError,
    WizardState,
};
use tracing::debug;

/// The actions a user clicking through the wizard with these answers would take
pub fn wizard_actions(args: &RegisterArgs) -> Vec<Action> {
    let update = Action::Update;

    let mut actions = vec![
        update(FieldUpdate::Name(args.name.clone().unwrap_or_default())),
        update(FieldUpdate::Age(args.age)),
        update(FieldUpdate::Email(args.email.clone())),
        update(FieldUpdate::WeightKg(args.weight)),
        update(FieldUpdate::HeightCm(args.height)),
        update(FieldUpdate::ActivityLevel(args.activity)),
        update(FieldUpdate::MedicalCondition(args.medical_condition)),
        update(FieldUpdate::OtherCondition(args.other_condition.clone())),
        Action::Next,
        update(FieldUpdate::HouseholdSize(args.household_size)),
        update(FieldUpdate::CookingFrequency(args.cooking_frequency)),
        update(FieldUpdate::DominantOil(args.oil)),
        update(FieldUpdate::MonthlyOilUsage(args.monthly_oil)),
        update(FieldUpdate::EatingOutFrequency(args.eating_out)),
        Action::Next,
        update(FieldUpdate::CholesterolLevel(args.cholesterol)),
        update(FieldUpdate::BloodSugarLevel(args.blood_sugar)),
        update(FieldUpdate::BloodPressure(args.blood_pressure)),
        update(FieldUpdate::DigestiveIssues(args.digestive_issues)),
    ];

    if args.skip {
        actions.push(Action::SkipAndExplore);
        return actions;
    }

    actions.extend([
        Action::Next,
        update(FieldUpdate::NotificationPreference(args.notifications)),
        Action::Next,
        update(FieldUpdate::AcceptTerms(args.accept_terms)),
        Action::Complete,
    ]);
    actions
}

/// Drive the wizard to completion, naming every missing field on failure
pub fn run_wizard(args: &RegisterArgs) -> AppResult<WizardState> {
    let mut state = WizardState::new();
    for action in wizard_actions(args) {
        state = match transition(&state, action) {
            Ok(next) => next,
            Err(WizardError::Validation(err)) => {
                let missing = match (state.step(), state.form()) {
                    (Some(step), Some(form)) => get_missing_fields_labels(&form.missing_fields(step)),
                    _ => Vec::new(),
                };
                if missing.is_empty() {
                    return Err(WizardError::Validation(err).into());
                }
                return Err(AppError::BadRequest(format!(
                    "missing required fields: {}",
                    missing.join(", ")
                )));
            }
            Err(e) => return Err(e.into()),
        };
        debug!(step = ?state.step(), "Wizard advanced");
    }
    Ok(state)
}

pub fn register<S: KeyValueStore, W: Write>(
    state: &mut AppState<S>,
    out: &mut W,
    args: &RegisterArgs,
) -> AppResult<()> {
    let finished = run_wizard(args)?;
    let user = persist_completion(&finished, state.repo_mut())?;

    let (form, outcome) = match &finished {
        WizardState::Completed { form, outcome } => (form, *outcome),
        _ => return Err(AppError::BadRequest("registration did not finish".to_string())),
    };

    match (&user, outcome) {
        (Some(user), CompletionOutcome::Registered) => {
            writeln!(out, "Welcome, {}! Registration complete.", user.first_name())?
        }
        (Some(user), CompletionOutcome::Skipped) => {
            writeln!(out, "Welcome, {}! You can finish registration later.", user.first_name())?
        }
        (None, _) => writeln!(out, "Welcome! You can finish registration later.")?,
    }

    match form.bmi() {
        Some(bmi) => {
            writeln!(out, "BMI: {} ({})", number(bmi.bmi), bmi.category.label())?;
            writeln!(out, "{}", bmi.insight)?;
        }
        None => writeln!(out, "{}", BMI_MISSING_INPUT_MESSAGE)?,
    }
    Ok(())
}
