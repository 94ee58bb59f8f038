use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use super::dto::{
    CreateMealRequest, DaysQuery, DeleteQuery, DeleteResponse, ListMealsResponse, MealResponse,
    UpdateMealRequest,
};
use super::services::{build_meal, check_days, day_views, load_days, resolve_today, MealError};
use crate::extractors::UserId;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/meals",
        get(list_meals)
            .post(create_meal)
            .put(update_meal)
            .delete(delete_meal),
    )
}

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    error!(error = %e, "meal request failed");
    (StatusCode::INTERNAL_SERVER_ERROR, "internal error".into())
}

pub(crate) fn rejected(e: MealError) -> (StatusCode, String) {
    let status = match e {
        MealError::NotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::BAD_REQUEST,
    };
    warn!(error = %e, %status, "meal request rejected");
    (status, e.to_string())
}

/// GET /meals?days=N&today=YYYY-MM-DD returns scored days; without `days`,
/// every meal newest first.
#[instrument(skip(state))]
pub async fn list_meals(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Query(q): Query<DaysQuery>,
) -> Result<Json<ListMealsResponse>, (StatusCode, String)> {
    let Some(days) = q.days else {
        let meals = state.store.all_meals(user_id).await.map_err(internal)?;
        return Ok(Json(ListMealsResponse::Meals { meals }));
    };

    let count = check_days(days, state.config.max_history_days).map_err(rejected)?;
    let today = resolve_today(q.today.as_deref()).map_err(rejected)?;
    let goals = state.settings.goals(user_id).await.map_err(internal)?;

    let days = load_days(state.store.as_ref(), user_id, count, today)
        .await
        .map_err(internal)?;
    Ok(Json(ListMealsResponse::Days {
        days: day_views(days, &goals),
    }))
}

/// POST /meals
#[instrument(skip(state, req))]
pub async fn create_meal(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Json(req): Json<CreateMealRequest>,
) -> Result<(StatusCode, Json<MealResponse>), (StatusCode, String)> {
    let meal = build_meal(req).map_err(rejected)?;
    let meal = state
        .store
        .insert_meal(user_id, meal)
        .await
        .map_err(internal)?;
    info!(%user_id, meal_id = %meal.id, calories = meal.totals().calories, "meal logged");
    Ok((StatusCode::CREATED, Json(MealResponse { meal })))
}

/// PUT /meals { id, ... }
#[instrument(skip(state, req))]
pub async fn update_meal(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Json(req): Json<UpdateMealRequest>,
) -> Result<Json<MealResponse>, (StatusCode, String)> {
    let mut meal = build_meal(req.meal).map_err(rejected)?;
    meal.id = req.id;
    match state
        .store
        .update_meal(user_id, meal)
        .await
        .map_err(internal)?
    {
        Some(meal) => Ok(Json(MealResponse { meal })),
        None => Err(rejected(MealError::NotFound(req.id))),
    }
}

/// DELETE /meals?id=
#[instrument(skip(state))]
pub async fn delete_meal(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Query(q): Query<DeleteQuery>,
) -> Result<Json<DeleteResponse>, (StatusCode, String)> {
    let removed = state
        .store
        .delete_meal(user_id, q.id)
        .await
        .map_err(internal)?;
    if !removed {
        return Err(rejected(MealError::NotFound(q.id)));
    }
    Ok(Json(DeleteResponse { success: true }))
}
