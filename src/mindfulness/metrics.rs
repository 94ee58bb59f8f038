use serde::Serialize;

use crate::nutrition::{Meal, MealType};

/// Calmness at or above this counts as eating calm.
pub const CALM_THRESHOLD: u8 = 4;
/// Hunger in `HUNGER_MIN..=HUNGER_MAX` counts as eating when actually hungry;
/// lower is starving, higher is not hungry.
pub const HUNGER_MIN: u8 = 3;
pub const HUNGER_MAX: u8 = 4;

pub fn is_calm(meal: &Meal) -> bool {
    let calmness = meal.context.as_ref().and_then(|c| c.calmness).unwrap_or(0);
    calmness >= CALM_THRESHOLD
}

pub fn is_hungry(meal: &Meal) -> bool {
    let hunger = meal.context.as_ref().and_then(|c| c.hunger_level).unwrap_or(0);
    (HUNGER_MIN..=HUNGER_MAX).contains(&hunger)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MindfulnessMetrics {
    pub total_meals: u32,
    pub calm_meals: u32,
    pub hungry_meals: u32,
    pub calm_percent: u32,
    pub hungry_percent: u32,
}

impl MindfulnessMetrics {
    pub fn from_meals<'a, I>(meals: I) -> Self
    where
        I: IntoIterator<Item = &'a Meal>,
    {
        let mut m = Self::default();
        for meal in meals {
            m.total_meals += 1;
            if is_calm(meal) {
                m.calm_meals += 1;
            }
            if is_hungry(meal) {
                m.hungry_meals += 1;
            }
        }
        m.calm_percent = percent(m.calm_meals, m.total_meals);
        m.hungry_percent = percent(m.hungry_meals, m.total_meals);
        m
    }

    pub fn is_empty(&self) -> bool {
        self.total_meals == 0
    }
}

/// Whole-number percentage, 0 for an empty set.
fn percent(part: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    (f64::from(part) / f64::from(total) * 100.0).round() as u32
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MealTypeMetrics {
    pub breakfast: MindfulnessMetrics,
    pub lunch: MindfulnessMetrics,
    pub dinner: MindfulnessMetrics,
    pub snack: MindfulnessMetrics,
    pub indulgence: MindfulnessMetrics,
}

impl MealTypeMetrics {
    pub fn from_meals(meals: &[&Meal]) -> Self {
        let of = |t: MealType| {
            MindfulnessMetrics::from_meals(meals.iter().copied().filter(|m| m.meal_type == t))
        };
        Self {
            breakfast: of(MealType::Breakfast),
            lunch: of(MealType::Lunch),
            dinner: of(MealType::Dinner),
            snack: of(MealType::Snack),
            indulgence: of(MealType::Indulgence),
        }
    }

    pub fn get(&self, meal_type: MealType) -> &MindfulnessMetrics {
        match meal_type {
            MealType::Breakfast => &self.breakfast,
            MealType::Lunch => &self.lunch,
            MealType::Dinner => &self.dinner,
            MealType::Snack => &self.snack,
            MealType::Indulgence => &self.indulgence,
        }
    }
}
