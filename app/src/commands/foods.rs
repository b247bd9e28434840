//! Catalog browsing commands

use crate::error::{AppError, AppResult};
use crate::render::{food_line, number, oil_gauge, stars};
use std::io::Write;
use swasth_kadam_shared::catalog::{
    all_foods, food_by_id, foods_by_category, healthy_alternatives, popular_foods, search_foods,
};
use swasth_kadam_shared::{FoodCatalogEntry, FoodCategory};

fn write_list<W: Write>(out: &mut W, foods: &[&FoodCatalogEntry]) -> AppResult<()> {
    if foods.is_empty() {
        writeln!(out, "No foods found")?;
    }
    for food in foods {
        writeln!(out, "{}", food_line(food))?;
    }
    Ok(())
}

pub fn list<W: Write>(out: &mut W, category: Option<FoodCategory>) -> AppResult<()> {
    let foods: Vec<&FoodCatalogEntry> = match category {
        Some(category) => foods_by_category(category),
        None => all_foods().iter().collect(),
    };
    write_list(out, &foods)
}

pub fn search<W: Write>(out: &mut W, query: &str) -> AppResult<()> {
    write_list(out, &search_foods(query))
}

pub fn popular<W: Write>(out: &mut W) -> AppResult<()> {
    write_list(out, &popular_foods())
}

pub fn show<W: Write>(out: &mut W, id: u32) -> AppResult<()> {
    let food = food_by_id(id).ok_or_else(|| AppError::NotFound(format!("food {}", id)))?;

    writeln!(out, "{} {} (#{})", food.emoji, food.name, food.id)?;
    writeln!(out, "{}", food.description)?;
    writeln!(out)?;
    writeln!(out, "Category:       {}", food.category)?;
    writeln!(out, "Calories:       {} kcal", number(food.calories))?;
    writeln!(
        out,
        "Oil:            {} ({}, {}/100, about {})",
        oil_gauge(food.oil_level),
        food.oil_content,
        food.oil_level,
        food.oil_amount
    )?;
    writeln!(out, "Cooking method: {}", food.cooking_method)?;
    writeln!(
        out,
        "Health score:   {} {}/10",
        stars(food.health_score),
        number(food.health_score)
    )?;
    writeln!(
        out,
        "Macros:         protein {}g, carbs {}g, fat {}g, fiber {}g",
        number(food.protein),
        number(food.carbs),
        number(food.fat),
        number(food.fiber)
    )?;
    if let Some(alternative) = &food.better_alternative {
        writeln!(out, "Better choice:  {}", alternative)?;
    }
    if !food.tips.is_empty() {
        writeln!(out, "Tip:            {}", food.tips)?;
    }

    let swaps = healthy_alternatives(food.category);
    if !swaps.is_empty() {
        writeln!(out)?;
        writeln!(out, "Healthier swaps:")?;
        write_list(out, &swaps)?;
    }
    Ok(())
}
