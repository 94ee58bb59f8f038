//! Three-tier quality bands for nutrient density.
//!
//! Two formulations are exposed. Day cards start from the direct
//! nutrient-per-calorie ratio; meal and item badges from an efficiency index,
//! `(nutrient % of goal / calorie % of goal) * 100`. The index reduces
//! algebraically to `ratio / goal_ratio * 100`, and both formulations are
//! normalized that way and compared against the same fixed bands at 100 and
//! 67, so the same input always lands in the same band.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::aggregate::per_calorie;
use super::types::{DailyGoals, DayData, Nutrient, NutrientTotals};

/// Share of the green threshold at which yellow starts.
pub const YELLOW_FRACTION: f64 = 0.67;

/// Efficiency index that corresponds to exactly meeting the goal ratio.
pub const EFFICIENCY_AT_GOAL: f64 = 100.0;

/// Ordered worst to best, so `Red < Yellow < Green`. `Muted` marks a
/// context with no calories, where no ratio exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Muted,
    Red,
    Yellow,
    Green,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub green: f64,
    pub yellow: f64,
}

impl Thresholds {
    pub fn from_goal_ratio(green: f64) -> Self {
        Self {
            green,
            yellow: green * YELLOW_FRACTION,
        }
    }

    /// Fixed bands for the efficiency index: green >= 100, yellow >= 67.
    pub fn efficiency() -> Self {
        Self::from_goal_ratio(EFFICIENCY_AT_GOAL)
    }
}

/// Pure step function; callers substitute `Muted` themselves when there is no
/// ratio to classify.
pub fn classify(ratio: f64, thresholds: Thresholds) -> Quality {
    if ratio >= thresholds.green {
        Quality::Green
    } else if ratio >= thresholds.yellow {
        Quality::Yellow
    } else {
        Quality::Red
    }
}

/// `ratio` relative to the goal ratio, scaled so the goal sits at 100. A
/// zero goal counts as met.
fn normalized(ratio: f64, nutrient: Nutrient, goals: &DailyGoals) -> f64 {
    let goal_ratio = goals.goal_ratio(nutrient);
    if goal_ratio <= 0.0 {
        debug!(?nutrient, "zero goal ratio, treating efficiency as at goal");
        return EFFICIENCY_AT_GOAL;
    }
    ratio / goal_ratio * EFFICIENCY_AT_GOAL
}

/// Day-card quality from the direct per-calorie ratio.
pub fn day_quality(day: &DayData, nutrient: Nutrient, goals: &DailyGoals) -> Quality {
    if day.totals.calories <= 0.0 {
        return Quality::Muted;
    }
    let ratio = match nutrient {
        Nutrient::Protein => day.protein_per_calorie,
        Nutrient::Fiber => day.fiber_per_calorie,
    };
    classify(normalized(ratio, nutrient, goals), Thresholds::efficiency())
}

/// Efficiency index for `nutrient` within `totals`, or `None` when there are
/// no calories. A zero goal yields exactly 100.
pub fn efficiency_index(totals: &NutrientTotals, nutrient: Nutrient, goals: &DailyGoals) -> Option<f64> {
    if totals.calories <= 0.0 {
        return None;
    }
    let ratio = per_calorie(totals.amount(nutrient), totals.calories);
    Some(normalized(ratio, nutrient, goals))
}

/// Display value and band for one nutrient of a meal or a single item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EfficiencyBadge {
    /// Rounded index; 0 when muted.
    pub efficiency: u32,
    pub quality: Quality,
}

/// Builds the badge for any granularity: pass a meal's totals or a single
/// item converted with `NutrientTotals::from`. The band is taken from the
/// unrounded index; rounding only affects the displayed number.
pub fn efficiency_badge(totals: &NutrientTotals, nutrient: Nutrient, goals: &DailyGoals) -> EfficiencyBadge {
    match efficiency_index(totals, nutrient, goals) {
        Some(index) => EfficiencyBadge {
            efficiency: index.max(0.0).round() as u32,
            quality: classify(index, Thresholds::efficiency()),
        },
        None => EfficiencyBadge {
            efficiency: 0,
            quality: Quality::Muted,
        },
    }
}
