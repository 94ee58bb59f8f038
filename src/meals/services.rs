use thiserror::Error;
use time::Date;
use tracing::debug;
use uuid::Uuid;

use super::dto::{CalmScale, CreateMealRequest, DayView, ItemInput, MealView, NutrientBadges};
use crate::nutrition::aggregate::window_start;
use crate::nutrition::dates::{parse_date, today};
use crate::nutrition::{
    day_quality, day_score, efficiency_badge, recent_days, DailyGoals, DayData, FoodItem, Meal,
    MealContext, Nutrient, NutrientTotals,
};
use crate::store::MealStore;

const LEVEL_MIN: u8 = 1;
const LEVEL_MAX: u8 = 5;

#[derive(Debug, Error, PartialEq)]
pub enum MealError {
    #[error("{field} must be between 1 and 5, got {value}")]
    LevelOutOfRange { field: &'static str, value: u8 },
    #[error("{field} of item {item:?} must be a non-negative number")]
    InvalidNutrient { item: String, field: &'static str },
    #[error("item name must not be empty")]
    EmptyItemName,
    #[error("days must be between 1 and {max}, got {got}")]
    InvalidDays { got: u32, max: u32 },
    #[error("invalid date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("meal {0} not found")]
    NotFound(Uuid),
}

fn check_level(field: &'static str, value: Option<u8>) -> Result<(), MealError> {
    match value {
        Some(v) if !(LEVEL_MIN..=LEVEL_MAX).contains(&v) => Err(MealError::LevelOutOfRange { field, value: v }),
        _ => Ok(()),
    }
}

fn check_context(context: &MealContext) -> Result<(), MealError> {
    check_level("hungerLevel", context.hunger_level)?;
    check_level("stressLevel", context.calmness)
}

fn to_item(input: ItemInput) -> Result<FoodItem, MealError> {
    let name = input.name.trim().to_string();
    if name.is_empty() {
        return Err(MealError::EmptyItemName);
    }
    for (field, value) in [
        ("calories", input.calories),
        ("protein", input.protein),
        ("fiber", input.fiber),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(MealError::InvalidNutrient { item: name, field });
        }
    }
    Ok(FoodItem {
        id: input.id.unwrap_or_else(Uuid::new_v4),
        name,
        calories: input.calories,
        protein: input.protein,
        fiber: input.fiber,
        quantity: input.quantity,
    })
}

/// Validates a write request and turns it into a meal with a fresh id.
/// Totals come from the items only.
pub fn build_meal(req: CreateMealRequest) -> Result<Meal, MealError> {
    let items = req
        .items
        .into_iter()
        .map(to_item)
        .collect::<Result<Vec<_>, _>>()?;

    let mut meal = Meal::new(req.date, req.meal_type, items);
    if let Some(context) = req.context {
        check_context(&context)?;
        let context = match req.calm_scale {
            CalmScale::Calm => context,
            CalmScale::LegacyStress => {
                debug!(stress = ?context.calmness, "flipping legacy stress level");
                context.from_legacy_stress()
            }
        };
        meal = meal.with_context(context);
    }
    Ok(meal)
}

/// The request's `today`, or the server's local date when absent.
pub fn resolve_today(raw: Option<&str>) -> Result<Date, MealError> {
    match raw {
        Some(s) if !s.trim().is_empty() => parse_date(s).map_err(|_| MealError::InvalidDate(s.to_string())),
        _ => Ok(today()),
    }
}

pub fn check_days(days: u32, max: u32) -> Result<u32, MealError> {
    if days == 0 || days > max {
        return Err(MealError::InvalidDays { got: days, max });
    }
    Ok(days)
}

/// The `count` days ending on `today`, newest first, with empty days filled in.
pub async fn load_days(
    store: &dyn MealStore,
    user_id: Uuid,
    count: u32,
    today: Date,
) -> anyhow::Result<Vec<DayData>> {
    let meals = store
        .meals_between(user_id, window_start(today, count), today)
        .await?;
    debug!(%user_id, count, meals = meals.len(), "loaded day window");
    Ok(recent_days(&meals, count, today))
}

fn badges(totals: &NutrientTotals, goals: &DailyGoals) -> NutrientBadges {
    NutrientBadges {
        protein: efficiency_badge(totals, Nutrient::Protein, goals),
        fiber: efficiency_badge(totals, Nutrient::Fiber, goals),
    }
}

fn meal_view(meal: Meal, goals: &DailyGoals) -> MealView {
    let item_efficiency = meal
        .items()
        .iter()
        .map(|item| badges(&NutrientTotals::from(item), goals))
        .collect();
    MealView {
        efficiency: badges(&meal.totals(), goals),
        item_efficiency,
        meal,
    }
}

/// Scores and classifies each day against `goals`.
pub fn day_views(days: Vec<DayData>, goals: &DailyGoals) -> Vec<DayView> {
    days.into_iter()
        .map(|mut day| {
            let score = day_score(&day, goals);
            let protein = day_quality(&day, Nutrient::Protein, goals);
            let fiber = day_quality(&day, Nutrient::Fiber, goals);
            let meals = std::mem::take(&mut day.meals)
                .into_iter()
                .map(|m| meal_view(m, goals))
                .collect();
            DayView::from_parts(day, meals, score, protein, fiber)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nutrition::{MealType, Quality};
    use crate::store::MemoryStore;
    use time::macros::date;

    fn item(name: &str, calories: f64, protein: f64, fiber: f64) -> ItemInput {
        ItemInput {
            id: None,
            name: name.into(),
            calories,
            protein,
            fiber,
            quantity: None,
        }
    }

    fn request(items: Vec<ItemInput>, context: Option<MealContext>, calm_scale: CalmScale) -> CreateMealRequest {
        CreateMealRequest {
            meal_type: MealType::Lunch,
            date: date!(2024 - 03 - 10),
            items,
            context,
            calm_scale,
        }
    }

    #[test]
    fn totals_come_from_items_and_ids_are_assigned() {
        let meal = build_meal(request(
            vec![item("rice", 200.0, 4.0, 1.0), item("tofu", 150.0, 16.0, 2.0)],
            None,
            CalmScale::Calm,
        ))
        .unwrap();
        assert_eq!(meal.totals().calories, 350.0);
        assert_eq!(meal.totals().protein, 20.0);
        assert_ne!(meal.items()[0].id, meal.items()[1].id);
    }

    #[test]
    fn keeps_client_item_ids() {
        let id = Uuid::new_v4();
        let mut input = item("egg", 78.0, 6.0, 0.0);
        input.id = Some(id);
        let meal = build_meal(request(vec![input], None, CalmScale::Calm)).unwrap();
        assert_eq!(meal.items()[0].id, id);
    }

    #[test]
    fn rejects_out_of_range_levels_and_bad_nutrients() {
        let ctx = MealContext {
            hunger_level: Some(6),
            ..MealContext::default()
        };
        assert_eq!(
            build_meal(request(vec![], Some(ctx), CalmScale::Calm)).err(),
            Some(MealError::LevelOutOfRange {
                field: "hungerLevel",
                value: 6
            })
        );

        let ctx = MealContext {
            calmness: Some(0),
            ..MealContext::default()
        };
        assert!(build_meal(request(vec![], Some(ctx), CalmScale::Calm)).is_err());

        let err = build_meal(request(vec![item("oil", -5.0, 0.0, 0.0)], None, CalmScale::Calm)).err();
        assert!(matches!(err, Some(MealError::InvalidNutrient { field: "calories", .. })));

        let err = build_meal(request(vec![item("  ", 5.0, 0.0, 0.0)], None, CalmScale::Calm)).err();
        assert_eq!(err, Some(MealError::EmptyItemName));
    }

    #[test]
    fn legacy_stress_is_flipped_once() {
        let ctx = MealContext {
            calmness: Some(1),
            hunger_level: Some(3),
            ..MealContext::default()
        };
        let legacy = build_meal(request(vec![], Some(ctx.clone()), CalmScale::LegacyStress)).unwrap();
        assert_eq!(legacy.context.as_ref().unwrap().calmness, Some(5));
        assert_eq!(legacy.context.as_ref().unwrap().hunger_level, Some(3));

        let calm = build_meal(request(vec![], Some(ctx), CalmScale::Calm)).unwrap();
        assert_eq!(calm.context.unwrap().calmness, Some(1));
    }

    #[test]
    fn today_and_days_parsing() {
        assert_eq!(resolve_today(Some("2024-02-29")).unwrap(), date!(2024 - 02 - 29));
        assert_eq!(
            resolve_today(Some("29/02/2024")).err(),
            Some(MealError::InvalidDate("29/02/2024".into()))
        );
        assert!(resolve_today(None).is_ok());

        assert_eq!(check_days(7, 90), Ok(7));
        assert!(check_days(0, 90).is_err());
        assert!(check_days(91, 90).is_err());
    }

    #[tokio::test]
    async fn load_days_fills_the_window() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();
        let meal = build_meal(request(vec![item("soup", 300.0, 20.0, 6.0)], None, CalmScale::Calm)).unwrap();
        store.insert_meal(user, meal).await.unwrap();
        let old = Meal::new(date!(2024 - 02 - 01), MealType::Dinner, Vec::new());
        store.insert_meal(user, old).await.unwrap();

        let days = load_days(&store, user, 3, date!(2024 - 03 - 11)).await.unwrap();
        let dates: Vec<Date> = days.iter().map(|d| d.date).collect();
        assert_eq!(
            dates,
            vec![date!(2024 - 03 - 11), date!(2024 - 03 - 10), date!(2024 - 03 - 09)]
        );
        assert!(days[0].is_empty());
        assert_eq!(days[1].totals.calories, 300.0);
        assert!(days[2].is_empty());
    }

    #[test]
    fn day_views_carry_score_and_badges() {
        let goals = DailyGoals::default();
        // exactly on the default goal ratios: 150/2000 protein, 30/2000 fiber
        let meal = build_meal(request(vec![item("plan", 2000.0, 150.0, 30.0)], None, CalmScale::Calm)).unwrap();
        let day = DayData::from_meals(meal.date, [&meal]);
        let empty = DayData::from_meals(date!(2024 - 03 - 09), std::iter::empty());

        let views = day_views(vec![day, empty], &goals);
        assert_eq!(views[0].score, 100);
        assert_eq!(views[0].score_band, Quality::Green);
        assert_eq!(views[0].protein_quality, Quality::Green);
        assert_eq!(views[0].meals[0].efficiency.protein.efficiency, 100);
        assert_eq!(views[0].meals[0].item_efficiency.len(), 1);

        assert_eq!(views[1].protein_quality, Quality::Muted);
        assert_eq!(views[1].fiber_quality, Quality::Muted);
        assert!(views[1].meals.is_empty());
    }
}
