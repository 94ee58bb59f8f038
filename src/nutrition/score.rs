use serde::Serialize;
use tracing::debug;

use super::quality::Quality;
use super::types::{DailyGoals, DayData, NutrientTotals};

/// Each of calories, protein and fiber is worth a third of the score.
const COMPONENT_WEIGHT: f64 = 100.0 / 3.0;

/// Calorie credit reaches zero once intake is this far over the goal.
const CALORIE_OVERAGE_LIMIT: f64 = 0.2;

/// Unrounded per-component points behind a day score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub calories: f64,
    pub protein: f64,
    pub fiber: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> u8 {
        (self.calories + self.protein + self.fiber).round().clamp(0.0, 100.0) as u8
    }
}

pub fn score_breakdown(totals: &NutrientTotals, goals: &DailyGoals) -> ScoreBreakdown {
    ScoreBreakdown {
        calories: calorie_points(totals.calories, goals.calorie_goal),
        protein: floor_points(totals.protein, goals.protein_goal),
        fiber: floor_points(totals.fiber, goals.fiber_goal),
    }
}

/// 0–100 blend of calorie restraint and protein/fiber sufficiency.
pub fn day_score(day: &DayData, goals: &DailyGoals) -> u8 {
    score_breakdown(&day.totals, goals).total()
}

/// Badge band for a day score.
pub fn score_band(score: u8) -> Quality {
    match score {
        80..=u8::MAX => Quality::Green,
        50..=79 => Quality::Yellow,
        _ => Quality::Red,
    }
}

fn calorie_points(calories: f64, goal: f64) -> f64 {
    if goal <= 0.0 {
        debug!("calorie goal is zero, awarding full calorie credit");
        return COMPONENT_WEIGHT;
    }
    if calories <= goal {
        return COMPONENT_WEIGHT;
    }
    let over_by = calories - goal;
    let penalty = (over_by / (goal * CALORIE_OVERAGE_LIMIT)).min(1.0);
    COMPONENT_WEIGHT * (1.0 - penalty)
}

fn floor_points(amount: f64, goal: f64) -> f64 {
    if goal <= 0.0 {
        debug!("nutrient goal is zero, awarding full credit");
        return COMPONENT_WEIGHT;
    }
    COMPONENT_WEIGHT * (amount / goal).clamp(0.0, 1.0)
}
