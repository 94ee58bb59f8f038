use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

use crate::nutrition::dates::iso_date;
use crate::nutrition::{DayData, EfficiencyBadge, Meal, MealContext, MealType, NutrientTotals, Quality};

/// A food item as submitted by the client. Missing ids are assigned on write.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemInput {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub name: String,
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub fiber: f64,
    #[serde(default)]
    pub quantity: Option<String>,
}

/// Polarity of the `stressLevel` field in a write request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CalmScale {
    /// 5 = very calm
    #[default]
    Calm,
    /// 1 = calm, 5 = very stressed; flipped before storage
    LegacyStress,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMealRequest {
    #[serde(rename = "type")]
    pub meal_type: MealType,
    #[serde(with = "iso_date")]
    pub date: Date,
    pub items: Vec<ItemInput>,
    #[serde(default)]
    pub context: Option<MealContext>,
    #[serde(default)]
    pub calm_scale: CalmScale,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateMealRequest {
    pub id: Uuid,
    #[serde(flatten)]
    pub meal: CreateMealRequest,
}

#[derive(Debug, Deserialize)]
pub struct DaysQuery {
    #[serde(default)]
    pub days: Option<u32>,
    /// `YYYY-MM-DD`; defaults to the server's local date.
    #[serde(default)]
    pub today: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    pub id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct MealResponse {
    pub meal: Meal,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ListMealsResponse {
    Days { days: Vec<DayView> },
    Meals { meals: Vec<Meal> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NutrientBadges {
    pub protein: EfficiencyBadge,
    pub fiber: EfficiencyBadge,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealView {
    #[serde(flatten)]
    pub meal: Meal,
    pub efficiency: NutrientBadges,
    /// Same order as `meal.items`.
    pub item_efficiency: Vec<NutrientBadges>,
}

/// One day as the dashboard shows it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayView {
    #[serde(with = "iso_date")]
    pub date: Date,
    pub meals: Vec<MealView>,
    #[serde(flatten)]
    pub totals: NutrientTotals,
    pub protein_per_calorie: f64,
    pub fiber_per_calorie: f64,
    pub score: u8,
    pub score_band: Quality,
    pub protein_quality: Quality,
    pub fiber_quality: Quality,
}

impl DayView {
    pub(crate) fn from_parts(day: DayData, meals: Vec<MealView>, score: u8, protein: Quality, fiber: Quality) -> Self {
        Self {
            date: day.date,
            meals,
            totals: day.totals,
            protein_per_calorie: day.protein_per_calorie,
            fiber_per_calorie: day.fiber_per_calorie,
            score,
            score_band: crate::nutrition::score_band(score),
            protein_quality: protein,
            fiber_quality: fiber,
        }
    }
}
