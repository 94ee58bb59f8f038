use serde::Serialize;
use time::Date;

use super::metrics::MindfulnessMetrics;
use crate::nutrition::dates::{day_label, iso_date};
use crate::nutrition::DayData;

/// One day of the mindfulness chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyMindfulnessPoint {
    #[serde(with = "iso_date")]
    pub date: Date,
    pub day_label: &'static str,
    /// `None` when nothing was eaten that day, which is not the same as 0%.
    pub calm_percent: Option<u32>,
    pub hungry_percent: Option<u32>,
    pub total_meals: u32,
}

/// Chart points oldest first, one per supplied day.
pub fn daily_series(days: &[DayData]) -> Vec<DailyMindfulnessPoint> {
    let mut sorted: Vec<&DayData> = days.iter().collect();
    sorted.sort_by_key(|d| d.date);

    sorted
        .into_iter()
        .map(|day| {
            let m = MindfulnessMetrics::from_meals(&day.meals);
            let has_meals = !m.is_empty();
            DailyMindfulnessPoint {
                date: day.date,
                day_label: day_label(day.date),
                calm_percent: has_meals.then_some(m.calm_percent),
                hungry_percent: has_meals.then_some(m.hungry_percent),
                total_meals: m.total_meals,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nutrition::{aggregate::recent_days, Meal, MealContext, MealType};
    use time::macros::date;

    #[test]
    fn empty_days_are_null_not_zero() {
        let today = date!(2024 - 03 - 13); // Wednesday
        let meals = vec![Meal::new(today, MealType::Lunch, Vec::new()).with_context(MealContext {
            hunger_level: Some(2),
            calmness: Some(2),
            ..Default::default()
        })];
        let days = recent_days(&meals, 3, today);
        let series = daily_series(&days);

        assert_eq!(series.len(), 3);
        assert_eq!(series[0].date, date!(2024 - 03 - 11));
        assert_eq!(series[0].day_label, "Mon");
        assert_eq!(series[0].calm_percent, None);
        assert_eq!(series[0].total_meals, 0);

        let last = &series[2];
        assert_eq!(last.day_label, "Wed");
        assert_eq!(last.calm_percent, Some(0));
        assert_eq!(last.hungry_percent, Some(0));
        assert_eq!(last.total_meals, 1);

        let v = serde_json::to_value(&series[0]).unwrap();
        assert!(v["calmPercent"].is_null());
        assert_eq!(v["dayLabel"], "Mon");
        assert_eq!(v["date"], "2024-03-11");
    }

    #[test]
    fn series_is_repeatable() {
        let today = date!(2024 - 03 - 13);
        let days = recent_days(&[], 7, today);
        assert_eq!(daily_series(&days), daily_series(&days));
        assert!(daily_series(&[]).is_empty());
    }
}
