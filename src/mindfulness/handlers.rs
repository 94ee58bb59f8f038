use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use super::report::{build_report, percent_color, weakest_meal_type, MindfulnessReport, WeakestMealType, WEEK_DAYS};
use super::series::{daily_series, DailyMindfulnessPoint};
use crate::extractors::UserId;
use crate::meals::handlers::rejected;
use crate::meals::services::{load_days, resolve_today};
use crate::nutrition::Quality;
use crate::state::AppState;

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    error!(error = %e, "mindfulness request failed");
    (StatusCode::INTERNAL_SERVER_ERROR, "internal error".into())
}

#[derive(Debug, Deserialize)]
pub struct MindfulnessQuery {
    #[serde(default)]
    pub today: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PercentColors {
    pub calm: Quality,
    pub hungry: Quality,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MindfulnessResponse {
    #[serde(flatten)]
    pub report: MindfulnessReport,
    /// Oldest first, covering both weeks.
    pub daily: Vec<DailyMindfulnessPoint>,
    pub weakest: Option<WeakestMealType>,
    pub colors: PercentColors,
}

/// GET /mindfulness?today=YYYY-MM-DD
#[instrument(skip(state))]
pub async fn get_mindfulness(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Query(q): Query<MindfulnessQuery>,
) -> Result<Json<MindfulnessResponse>, (StatusCode, String)> {
    let today = resolve_today(q.today.as_deref()).map_err(rejected)?;
    let days = load_days(state.store.as_ref(), user_id, 2 * WEEK_DAYS as u32, today)
        .await
        .map_err(internal)?;

    let report = build_report(&days);
    debug!(%user_id, meals = report.this_week.total_meals, "mindfulness report built");

    Ok(Json(MindfulnessResponse {
        daily: daily_series(&days),
        weakest: weakest_meal_type(&report.by_meal_type),
        colors: PercentColors {
            calm: percent_color(report.this_week.calm_percent),
            hungry: percent_color(report.this_week.hungry_percent),
        },
        report,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nutrition::{Meal, MealContext, MealType};
    use crate::settings::UserSettings;
    use crate::store::MealStore;
    use std::sync::Arc;
    use time::macros::date;
    use time::Date;
    use uuid::Uuid;

    fn meal(date: Date, meal_type: MealType, hunger: u8, calm: u8) -> Meal {
        Meal::new(date, meal_type, Vec::new()).with_context(MealContext {
            hunger_level: Some(hunger),
            calmness: Some(calm),
            ..MealContext::default()
        })
    }

    fn query(today: &str) -> Query<MindfulnessQuery> {
        Query(MindfulnessQuery {
            today: Some(today.into()),
        })
    }

    #[tokio::test]
    async fn report_over_two_weeks() {
        let state = AppState::fake();
        let user = Uuid::new_v4();
        for m in [
            // this week: one calm and hungry breakfast, one stressed lunch
            meal(date!(2024 - 06 - 14), MealType::Breakfast, 3, 5),
            meal(date!(2024 - 06 - 10), MealType::Lunch, 1, 2),
            // last week: a single calm dinner
            meal(date!(2024 - 06 - 05), MealType::Dinner, 4, 4),
            // outside the window
            meal(date!(2024 - 05 - 01), MealType::Dinner, 1, 1),
        ] {
            state.store.insert_meal(user, m).await.unwrap();
        }

        let Json(resp) = get_mindfulness(State(state), UserId(user), query("2024-06-14"))
            .await
            .unwrap();

        assert_eq!(resp.report.this_week.total_meals, 2);
        assert_eq!(resp.report.this_week.calm_percent, 50);
        assert_eq!(resp.report.last_week.unwrap().calm_percent, 100);
        assert_eq!(resp.report.trends.calm_delta, Some(-50));
        assert_eq!(resp.colors.calm, Quality::Yellow);
        assert_eq!(resp.colors.hungry, Quality::Yellow);

        assert_eq!(resp.daily.len(), 14);
        assert_eq!(resp.daily[0].date, date!(2024 - 06 - 01));
        assert_eq!(resp.daily[13].calm_percent, Some(100));
        assert_eq!(resp.daily[12].calm_percent, None);

        let weakest = resp.weakest.unwrap();
        assert_eq!(weakest.meal_type, MealType::Lunch);
        assert_eq!(weakest.percent, 0);
    }

    #[tokio::test]
    async fn empty_history_has_no_trends() {
        let Json(resp) = get_mindfulness(State(AppState::fake()), UserId(Uuid::new_v4()), query("2024-06-14"))
            .await
            .unwrap();
        assert_eq!(resp.report.this_week.total_meals, 0);
        assert!(resp.report.last_week.is_none());
        assert_eq!(resp.report.trends.calm_delta, None);
        assert!(resp.weakest.is_none());
        assert_eq!(resp.colors.calm, Quality::Red);
    }

    struct BrokenStore;

    #[async_trait::async_trait]
    impl MealStore for BrokenStore {
        async fn meals_between(&self, _: Uuid, _: Date, _: Date) -> anyhow::Result<Vec<Meal>> {
            anyhow::bail!("store offline")
        }
        async fn all_meals(&self, _: Uuid) -> anyhow::Result<Vec<Meal>> {
            anyhow::bail!("store offline")
        }
        async fn insert_meal(&self, _: Uuid, _: Meal) -> anyhow::Result<Meal> {
            anyhow::bail!("store offline")
        }
        async fn update_meal(&self, _: Uuid, _: Meal) -> anyhow::Result<Option<Meal>> {
            anyhow::bail!("store offline")
        }
        async fn delete_meal(&self, _: Uuid, _: Uuid) -> anyhow::Result<bool> {
            anyhow::bail!("store offline")
        }
        async fn get_settings(&self, _: Uuid) -> anyhow::Result<Option<UserSettings>> {
            anyhow::bail!("store offline")
        }
        async fn put_settings(&self, _: Uuid, _: UserSettings) -> anyhow::Result<UserSettings> {
            anyhow::bail!("store offline")
        }
    }

    #[tokio::test]
    async fn store_failure_is_internal_error() {
        let fake = AppState::fake();
        let state = AppState::from_parts(fake.config, Arc::new(BrokenStore), fake.parser);
        let err = get_mindfulness(State(state), UserId(Uuid::new_v4()), query("2024-06-14"))
            .await
            .err()
            .unwrap();
        assert_eq!(err.0, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.1, "internal error");
    }

    #[tokio::test]
    async fn bad_date_is_rejected() {
        let err = get_mindfulness(State(AppState::fake()), UserId(Uuid::new_v4()), query("June 14"))
            .await
            .err()
            .unwrap();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }
}
