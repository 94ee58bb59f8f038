//! Goal suggestions from body metrics.
//!
//! BMR uses the Mifflin-St Jeor equation, protein follows the ISSN range for
//! active adults (1.6-2.0 g/kg) and fiber the USDA guideline of 14 g per
//! 1000 kcal.

use super::dto::{GoalSuggestions, Sex, SuggestedGoals, UserSettings};

const KG_PER_LB: f64 = 0.453592;
const CM_PER_INCH: f64 = 2.54;
const PROTEIN_BASE_G_PER_KG: f64 = 1.6;
const PROTEIN_HIGH_G_PER_KG: f64 = 2.0;
const FIBER_G_PER_1000_KCAL: f64 = 14.0;

/// Basal metabolic rate in kcal/day.
pub fn bmr(weight_lb: f64, height_in: f64, age: u32, sex: Sex) -> f64 {
    let weight_kg = weight_lb * KG_PER_LB;
    let height_cm = height_in * CM_PER_INCH;
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age);
    match sex {
        Sex::Male => base + 5.0,
        Sex::Female => base - 161.0,
    }
}

fn fiber_for(calories: f64) -> i64 {
    (calories / 1000.0 * FIBER_G_PER_1000_KCAL).round() as i64
}

fn plan(calories: f64, protein: i64) -> SuggestedGoals {
    SuggestedGoals {
        calories: calories.round() as i64,
        protein,
        fiber: fiber_for(calories),
    }
}

pub fn suggest_goals(settings: &UserSettings) -> GoalSuggestions {
    let bmr = bmr(
        settings.weight,
        f64::from(settings.total_height_inches()),
        settings.age,
        settings.sex,
    );
    let tdee = bmr * settings.activity_level;

    let weight_kg = settings.weight * KG_PER_LB;
    let protein_base = (weight_kg * PROTEIN_BASE_G_PER_KG).round() as i64;
    let protein_high = (weight_kg * PROTEIN_HIGH_G_PER_KG).round() as i64;

    // cutting and bulking both get the higher protein target
    GoalSuggestions {
        bmr,
        tdee,
        lose2: plan(tdee - 1000.0, protein_high),
        lose1: plan(tdee - 500.0, protein_high),
        maintain: plan(tdee, protein_base),
        gain1: plan(tdee + 500.0, protein_high),
    }
}
