use serde::Serialize;

use super::metrics::{MealTypeMetrics, MindfulnessMetrics};
use crate::nutrition::{DayData, Meal, MealType, Quality};

/// Days per reporting week.
pub const WEEK_DAYS: usize = 7;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Trends {
    /// Percentage-point change in calm meals since last week.
    pub calm_delta: Option<i32>,
    pub hungry_delta: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MindfulnessReport {
    pub this_week: MindfulnessMetrics,
    pub last_week: Option<MindfulnessMetrics>,
    pub by_meal_type: MealTypeMetrics,
    pub trends: Trends,
}

/// Builds the week-over-week report from up to fourteen days of data.
///
/// Days are ordered newest first before splitting, so the input order does
/// not matter. The newest seven days are "this week" and the next seven are
/// "last week"; anything older is ignored.
pub fn build_report(days: &[DayData]) -> MindfulnessReport {
    let mut sorted: Vec<&DayData> = days.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));

    let split = sorted.len().min(WEEK_DAYS);
    let (this_days, rest) = sorted.split_at(split);
    let last_days = &rest[..rest.len().min(WEEK_DAYS)];

    let this_meals = flatten(this_days);
    let last_meals = flatten(last_days);

    let this_week = MindfulnessMetrics::from_meals(this_meals.iter().copied());
    let last_week = if last_meals.is_empty() {
        None
    } else {
        Some(MindfulnessMetrics::from_meals(last_meals.iter().copied()))
    };

    let trends = match last_week {
        Some(prev) => Trends {
            calm_delta: Some(delta(this_week.calm_percent, prev.calm_percent)),
            hungry_delta: Some(delta(this_week.hungry_percent, prev.hungry_percent)),
        },
        None => Trends::default(),
    };

    MindfulnessReport {
        this_week,
        last_week,
        by_meal_type: MealTypeMetrics::from_meals(&this_meals),
        trends,
    }
}

fn flatten<'a>(days: &[&'a DayData]) -> Vec<&'a Meal> {
    days.iter().flat_map(|d| d.meals.iter()).collect()
}

fn delta(now: u32, before: u32) -> i32 {
    now as i32 - before as i32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Calm,
    Hungry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeakestMealType {
    #[serde(rename = "type")]
    pub meal_type: MealType,
    pub metric: Metric,
    pub percent: u32,
}

/// Meal types considered when looking for the weakest habit. Indulgences are
/// left out on purpose.
const COACHED_TYPES: [MealType; 4] = [
    MealType::Breakfast,
    MealType::Lunch,
    MealType::Dinner,
    MealType::Snack,
];

/// The meal type and metric with the lowest percentage this week. Ties keep
/// the first candidate in breakfast, lunch, dinner, snack order, calm before
/// hungry.
pub fn weakest_meal_type(by_type: &MealTypeMetrics) -> Option<WeakestMealType> {
    let mut weakest: Option<WeakestMealType> = None;
    for meal_type in COACHED_TYPES {
        let m = by_type.get(meal_type);
        if m.is_empty() {
            continue;
        }
        for (metric, percent) in [(Metric::Calm, m.calm_percent), (Metric::Hungry, m.hungry_percent)] {
            if weakest.map_or(true, |w| percent < w.percent) {
                weakest = Some(WeakestMealType {
                    meal_type,
                    metric,
                    percent,
                });
            }
        }
    }
    weakest
}

/// Color band for a mindfulness percentage.
pub fn percent_color(percent: u32) -> Quality {
    match percent {
        70..=u32::MAX => Quality::Green,
        50..=69 => Quality::Yellow,
        _ => Quality::Red,
    }
}
