//! Food logging and daily review commands

use crate::error::{AppError, AppResult};
use crate::render::{bar, number, oil_gauge};
use crate::state::AppState;
use chrono::{DateTime, Utc};
use std::io::Write;
use swasth_kadam_shared::catalog::food_by_id;
use swasth_kadam_shared::tracking::{daily_details, timeline};
use swasth_kadam_shared::{KeyValueStore, TrackedFoodRepository};

const BAR_WIDTH: usize = 20;

pub fn add<S: KeyValueStore, W: Write>(
    state: &mut AppState<S>,
    out: &mut W,
    food_id: u32,
    now: DateTime<Utc>,
) -> AppResult<()> {
    let food = food_by_id(food_id).ok_or_else(|| AppError::NotFound(format!("food {}", food_id)))?;
    let logged = state.tracker().log(food, now)?;
    writeln!(
        out,
        "Logged {} {} at {}",
        food.emoji,
        food.name,
        logged.timestamp.to_rfc3339()
    )?;
    Ok(())
}

pub fn remove<S: KeyValueStore, W: Write>(
    state: &mut AppState<S>,
    out: &mut W,
    food_id: u32,
    at: DateTime<Utc>,
) -> AppResult<()> {
    let removed = state.tracker().remove(food_id, at)?;
    if removed == 0 {
        return Err(AppError::NotFound(format!(
            "no logged food {} at {}",
            food_id,
            at.to_rfc3339()
        )));
    }
    writeln!(out, "Removed {} entr{}", removed, if removed == 1 { "y" } else { "ies" })?;
    Ok(())
}

pub fn today<S: KeyValueStore, W: Write>(
    state: &mut AppState<S>,
    out: &mut W,
    now: DateTime<Utc>,
) -> AppResult<()> {
    let options = state.config().summary_options();
    let summary = state.tracker().summary(now, &options);
    let totals = &summary.totals;

    writeln!(out, "Today's Tracking")?;
    writeln!(
        out,
        "  Calories:  {} / {} kcal {}",
        number(totals.calories),
        number(summary.calorie_progress.goal),
        bar(
            (summary.calorie_progress.fraction * 100.0).round() as u8,
            BAR_WIDTH
        )
    )?;
    if summary.calorie_progress.over_goal {
        writeln!(out, "  Over today's calorie goal")?;
    }
    writeln!(
        out,
        "  Oil:       {} {} {} (peak {}/100)",
        summary.oil_status.icon(),
        summary.oil_status.label(),
        oil_gauge(totals.oil_level),
        totals.oil_level
    )?;
    writeln!(
        out,
        "  Health:    {}/10 average",
        number(totals.avg_health_score)
    )?;
    writeln!(out, "  Foods:     {}", totals.food_count)?;

    if totals.food_count == 0 {
        writeln!(out)?;
        writeln!(out, "Nothing logged yet today. Try `swasth-kadam foods popular`.")?;
    }
    for insight in &summary.insights {
        writeln!(out, "  [{}] {}", insight.kind(), insight.message())?;
    }
    Ok(())
}

pub fn details<S: KeyValueStore, W: Write>(
    state: &AppState<S>,
    out: &mut W,
    now: DateTime<Utc>,
) -> AppResult<()> {
    let boundary = state.config().day_boundary();
    let foods = state.repo().load();
    let details = daily_details(&foods, now, boundary);
    let totals = &details.totals;

    writeln!(out, "Today's Details")?;
    writeln!(
        out,
        "  {} kcal | protein {}g | carbs {}g | fat {}g | fiber {}g",
        number(totals.calories),
        number(totals.protein),
        number(totals.carbs),
        number(totals.fat),
        number(totals.fiber)
    )?;
    writeln!(
        out,
        "  Oil: {} {}",
        details.oil_status.icon(),
        details.oil_status.label()
    )?;

    for item in &details.items {
        let food = &item.food.food;
        writeln!(out)?;
        writeln!(
            out,
            "{} {} at {}, {} kcal",
            food.emoji,
            food.name,
            boundary.format_time(item.food.timestamp),
            number(food.calories)
        )?;
        for (label, value, width) in [
            ("protein", food.protein, item.bars.protein),
            ("carbs", food.carbs, item.bars.carbs),
            ("fat", food.fat, item.bars.fat),
            ("fiber", food.fiber, item.bars.fiber),
        ] {
            writeln!(
                out,
                "  {:<8}{} {}g",
                label,
                bar(width, BAR_WIDTH),
                number(value)
            )?;
        }
    }
    Ok(())
}

pub fn timeline_view<S: KeyValueStore, W: Write>(
    state: &AppState<S>,
    out: &mut W,
    now: DateTime<Utc>,
) -> AppResult<()> {
    let boundary = state.config().day_boundary();
    let foods = state.repo().load();
    let days = timeline(&foods, now, boundary);

    if days.is_empty() {
        writeln!(out, "No foods logged yet")?;
    }
    for day in days {
        let heading = if day.is_today {
            "Today".to_string()
        } else {
            day.date.format("%a %d %b %Y").to_string()
        };
        writeln!(out, "{}", heading)?;
        for entry in day.entries {
            writeln!(
                out,
                "  {}  {} {:<28} {:>4} kcal  oil {:>3}  --at {}",
                boundary.format_time(entry.timestamp),
                entry.food.emoji,
                entry.food.name,
                number(entry.food.calories),
                entry.food.oil_level,
                entry.timestamp.to_rfc3339()
            )?;
        }
    }
    Ok(())
}
