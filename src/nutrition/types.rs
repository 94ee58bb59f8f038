use std::iter::Sum;
use std::ops::Add;

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use super::dates::iso_date;

/// A single food entry inside a meal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: Uuid,
    pub name: String,
    pub calories: f64,
    /// grams
    pub protein: f64,
    /// grams
    pub fiber: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
    Indulgence,
}

/// Self-reported circumstances of a meal.
///
/// `calmness` travels as `stressLevel` on the wire for compatibility with
/// stored records, but its polarity is calm: 1 = not calm, 5 = very calm.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealContext {
    /// 1 = starving, 5 = not hungry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hunger_level: Option<u8>,
    #[serde(default, rename = "stressLevel", skip_serializing_if = "Option::is_none")]
    pub calmness: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ate_with_others: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl MealContext {
    /// Converts a context recorded on the old stress scale (1 = calm,
    /// 5 = very stressed) to the calm scale. Applied once, at ingestion.
    pub fn from_legacy_stress(mut self) -> Self {
        self.calmness = self.calmness.map(|old| 6u8.saturating_sub(old.clamp(1, 5)));
        self
    }
}

/// Calories, protein and fiber summed over some set of foods.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct NutrientTotals {
    #[serde(rename = "totalCalories")]
    pub calories: f64,
    #[serde(rename = "totalProtein")]
    pub protein: f64,
    #[serde(rename = "totalFiber")]
    pub fiber: f64,
}

impl NutrientTotals {
    pub fn amount(&self, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::Protein => self.protein,
            Nutrient::Fiber => self.fiber,
        }
    }
}

impl From<&FoodItem> for NutrientTotals {
    fn from(item: &FoodItem) -> Self {
        Self {
            calories: item.calories,
            protein: item.protein,
            fiber: item.fiber,
        }
    }
}

impl Add for NutrientTotals {
    type Output = NutrientTotals;

    fn add(self, rhs: NutrientTotals) -> NutrientTotals {
        NutrientTotals {
            calories: self.calories + rhs.calories,
            protein: self.protein + rhs.protein,
            fiber: self.fiber + rhs.fiber,
        }
    }
}

impl Sum for NutrientTotals {
    fn sum<I: Iterator<Item = NutrientTotals>>(iter: I) -> Self {
        iter.fold(NutrientTotals::default(), Add::add)
    }
}

/// The nutrients tracked against a floor goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Nutrient {
    Protein,
    Fiber,
}

/// A logged meal. Totals are always derived from `items`; there is no way to
/// set them independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "MealRecord")]
pub struct Meal {
    pub id: Uuid,
    #[serde(with = "iso_date")]
    pub date: Date,
    #[serde(rename = "type")]
    pub meal_type: MealType,
    items: Vec<FoodItem>,
    #[serde(flatten)]
    totals: NutrientTotals,
    pub context: Option<MealContext>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Meal {
    pub fn new(date: Date, meal_type: MealType, items: Vec<FoodItem>) -> Self {
        let totals = super::aggregate::item_totals(&items);
        Self {
            id: Uuid::new_v4(),
            date,
            meal_type,
            items,
            totals,
            context: None,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    pub fn with_context(mut self, context: MealContext) -> Self {
        self.context = Some(context);
        self
    }

    pub fn items(&self) -> &[FoodItem] {
        &self.items
    }

    pub fn totals(&self) -> NutrientTotals {
        self.totals
    }

    pub fn replace_items(&mut self, items: Vec<FoodItem>) {
        self.totals = super::aggregate::item_totals(&items);
        self.items = items;
    }
}

/// Wire shape of a stored meal. Any cached totals it carries are ignored and
/// recomputed from the items.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MealRecord {
    id: Uuid,
    #[serde(with = "iso_date")]
    date: Date,
    #[serde(rename = "type")]
    meal_type: MealType,
    #[serde(default)]
    items: Vec<FoodItem>,
    #[serde(default)]
    context: Option<MealContext>,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
}

impl From<MealRecord> for Meal {
    fn from(r: MealRecord) -> Self {
        let mut meal = Meal {
            id: r.id,
            date: r.date,
            meal_type: r.meal_type,
            items: Vec::new(),
            totals: NutrientTotals::default(),
            context: r.context,
            created_at: r.created_at,
        };
        meal.replace_items(r.items);
        meal
    }
}

/// All meals of one calendar day with their sums. Derived on demand, never
/// stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayData {
    #[serde(with = "iso_date")]
    pub date: Date,
    pub meals: Vec<Meal>,
    #[serde(flatten)]
    pub totals: NutrientTotals,
    pub protein_per_calorie: f64,
    pub fiber_per_calorie: f64,
}

/// Daily targets. Calories are a ceiling, protein and fiber are floors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyGoals {
    pub calorie_goal: f64,
    pub protein_goal: f64,
    pub fiber_goal: f64,
}

impl Default for DailyGoals {
    fn default() -> Self {
        Self {
            calorie_goal: 2000.0,
            protein_goal: 150.0,
            fiber_goal: 30.0,
        }
    }
}

impl DailyGoals {
    pub fn nutrient_goal(&self, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::Protein => self.protein_goal,
            Nutrient::Fiber => self.fiber_goal,
        }
    }

    /// Grams of `nutrient` per calorie implied by the goals. A zero (or
    /// negative) goal on either side yields 0, so every ratio meets it.
    pub fn goal_ratio(&self, nutrient: Nutrient) -> f64 {
        let nutrient_goal = self.nutrient_goal(nutrient);
        if self.calorie_goal <= 0.0 || nutrient_goal <= 0.0 {
            return 0.0;
        }
        nutrient_goal / self.calorie_goal
    }
}
