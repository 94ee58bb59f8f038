//! Day aggregation, quality bands and day scores. Everything here is pure and
//! synchronous over in-memory meal records.

pub mod aggregate;
pub mod dates;
pub mod quality;
pub mod score;
pub mod types;

pub use aggregate::recent_days;
pub use quality::{day_quality, efficiency_badge, EfficiencyBadge, Quality};
pub use score::{day_score, score_band};
pub use types::{DailyGoals, DayData, FoodItem, Meal, MealContext, MealType, Nutrient, NutrientTotals};
