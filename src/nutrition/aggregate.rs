use std::collections::BTreeMap;

use time::{Date, Duration};

use super::types::{DayData, FoodItem, Meal, NutrientTotals};

pub fn item_totals(items: &[FoodItem]) -> NutrientTotals {
    items.iter().map(NutrientTotals::from).sum()
}

/// `amount / calories`, or 0 when there are no calories to divide by.
pub fn per_calorie(amount: f64, calories: f64) -> f64 {
    if calories > 0.0 {
        amount / calories
    } else {
        0.0
    }
}

impl DayData {
    /// Builds the day view for `date` from the meals that fall on it. Meals on
    /// other dates are ignored.
    pub fn from_meals<'a, I>(date: Date, meals: I) -> Self
    where
        I: IntoIterator<Item = &'a Meal>,
    {
        let meals: Vec<Meal> = meals
            .into_iter()
            .filter(|m| m.date == date)
            .cloned()
            .collect();
        let totals: NutrientTotals = meals.iter().map(Meal::totals).sum();
        Self {
            date,
            meals,
            protein_per_calorie: per_calorie(totals.protein, totals.calories),
            fiber_per_calorie: per_calorie(totals.fiber, totals.calories),
            totals,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.meals.is_empty()
    }
}

/// First day of a `count`-day window ending on `today`.
pub fn window_start(today: Date, count: u32) -> Date {
    let back = i64::from(count.saturating_sub(1));
    today.checked_sub(Duration::days(back)).unwrap_or(Date::MIN)
}

/// One `DayData` per calendar day in `[today - (count - 1), today]`, newest
/// first. Days without meals are present with zero totals.
pub fn recent_days(meals: &[Meal], count: u32, today: Date) -> Vec<DayData> {
    let mut by_date: BTreeMap<Date, Vec<&Meal>> = BTreeMap::new();
    for meal in meals {
        by_date.entry(meal.date).or_default().push(meal);
    }

    let mut days = Vec::with_capacity(count as usize);
    let mut date = today;
    for i in 0..count {
        if i > 0 {
            match date.previous_day() {
                Some(d) => date = d,
                None => break,
            }
        }
        let day_meals = by_date.get(&date).map(Vec::as_slice).unwrap_or_default();
        days.push(DayData::from_meals(date, day_meals.iter().copied()));
    }
    days
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nutrition::types::MealType;
    use time::macros::date;
    use uuid::Uuid;

    fn item(calories: f64, protein: f64, fiber: f64) -> FoodItem {
        FoodItem {
            id: Uuid::new_v4(),
            name: "food".into(),
            calories,
            protein,
            fiber,
            quantity: None,
        }
    }

    fn meal(date: Date, items: Vec<FoodItem>) -> Meal {
        Meal::new(date, MealType::Lunch, items)
    }

    #[test]
    fn day_totals_equal_sum_of_meals_and_items() {
        let d = date!(2024 - 06 - 10);
        let meals = vec![
            meal(d, vec![item(400.0, 30.0, 5.0), item(100.0, 1.0, 3.0)]),
            meal(d, vec![item(650.0, 45.0, 9.5)]),
            meal(date!(2024 - 06 - 09), vec![item(999.0, 99.0, 9.0)]),
        ];
        let day = DayData::from_meals(d, &meals);

        assert_eq!(day.meals.len(), 2);
        assert_eq!(day.totals.calories, 1150.0);
        assert_eq!(day.totals.protein, 76.0);
        assert_eq!(day.totals.fiber, 17.5);

        let by_items: NutrientTotals = day
            .meals
            .iter()
            .flat_map(|m| m.items().iter())
            .map(NutrientTotals::from)
            .sum();
        assert_eq!(by_items, day.totals);
        assert!((day.protein_per_calorie - 76.0 / 1150.0).abs() < 1e-12);
    }

    #[test]
    fn zero_calories_give_zero_ratios() {
        let d = date!(2024 - 06 - 10);
        let water = vec![meal(d, vec![item(0.0, 0.0, 0.0)])];
        let day = DayData::from_meals(d, &water);
        assert_eq!(day.protein_per_calorie, 0.0);
        assert_eq!(day.fiber_per_calorie, 0.0);

        // protein powder logged with no calories must not divide by zero
        let odd = vec![meal(d, vec![item(0.0, 25.0, 2.0)])];
        let day = DayData::from_meals(d, &odd);
        assert_eq!(day.protein_per_calorie, 0.0);
        assert_eq!(day.fiber_per_calorie, 0.0);

        let empty = DayData::from_meals(d, std::iter::empty());
        assert!(empty.is_empty());
        assert_eq!(empty.totals, NutrientTotals::default());
    }

    #[test]
    fn recent_days_covers_every_calendar_day_newest_first() {
        let today = date!(2024 - 03 - 01);
        let meals = vec![
            meal(date!(2024 - 02 - 28), vec![item(500.0, 20.0, 4.0)]),
            meal(today, vec![item(300.0, 10.0, 2.0)]),
            meal(date!(2024 - 02 - 20), vec![item(800.0, 40.0, 8.0)]),
        ];
        let days = recent_days(&meals, 4, today);

        let dates: Vec<Date> = days.iter().map(|d| d.date).collect();
        assert_eq!(
            dates,
            vec![
                date!(2024 - 03 - 01),
                date!(2024 - 02 - 29),
                date!(2024 - 02 - 28),
                date!(2024 - 02 - 27),
            ]
        );
        assert_eq!(days[0].totals.calories, 300.0);
        assert!(days[1].is_empty());
        assert_eq!(days[1].protein_per_calorie, 0.0);
        assert_eq!(days[2].totals.calories, 500.0);
        assert!(days[3].is_empty());
    }

    #[test]
    fn window_start_matches_recent_days() {
        let today = date!(2024 - 03 - 01);
        assert_eq!(window_start(today, 7), date!(2024 - 02 - 24));
        assert_eq!(window_start(today, 1), today);
        assert_eq!(window_start(today, 0), today);
        assert!(recent_days(&[], 0, today).is_empty());
    }
}
