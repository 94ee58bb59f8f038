use std::collections::HashMap;

use anyhow::Context;
use async_trait::async_trait;
use time::Date;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::nutrition::Meal;
use crate::settings::UserSettings;

/// Persistence seam for meals and settings, keyed by user.
#[async_trait]
pub trait MealStore: Send + Sync {
    /// Meals with `start <= date <= end`, newest date first, and in logging
    /// order within a day.
    async fn meals_between(&self, user_id: Uuid, start: Date, end: Date) -> anyhow::Result<Vec<Meal>>;
    /// Every meal of the user, most recently logged first.
    async fn all_meals(&self, user_id: Uuid) -> anyhow::Result<Vec<Meal>>;
    async fn insert_meal(&self, user_id: Uuid, meal: Meal) -> anyhow::Result<Meal>;
    /// Replaces an existing meal, keeping its original `created_at`.
    /// Returns `None` when the user has no meal with that id.
    async fn update_meal(&self, user_id: Uuid, meal: Meal) -> anyhow::Result<Option<Meal>>;
    /// Returns whether a meal was removed.
    async fn delete_meal(&self, user_id: Uuid, meal_id: Uuid) -> anyhow::Result<bool>;
    async fn get_settings(&self, user_id: Uuid) -> anyhow::Result<Option<UserSettings>>;
    async fn put_settings(&self, user_id: Uuid, settings: UserSettings) -> anyhow::Result<UserSettings>;
}

#[derive(Default)]
struct UserData {
    meals: Vec<Meal>,
    settings: Option<UserSettings>,
}

/// Process-local store. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<Uuid, UserData>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MealStore for MemoryStore {
    async fn meals_between(&self, user_id: Uuid, start: Date, end: Date) -> anyhow::Result<Vec<Meal>> {
        let users = self.users.read().await;
        let mut meals: Vec<Meal> = users
            .get(&user_id)
            .map(|u| {
                u.meals
                    .iter()
                    .filter(|m| m.date >= start && m.date <= end)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        meals.sort_by(|a, b| b.date.cmp(&a.date).then(a.created_at.cmp(&b.created_at)));
        Ok(meals)
    }

    async fn all_meals(&self, user_id: Uuid) -> anyhow::Result<Vec<Meal>> {
        let users = self.users.read().await;
        let mut meals = users
            .get(&user_id)
            .map(|u| u.meals.clone())
            .unwrap_or_default();
        meals.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(meals)
    }

    async fn insert_meal(&self, user_id: Uuid, meal: Meal) -> anyhow::Result<Meal> {
        let mut users = self.users.write().await;
        let user = users.entry(user_id).or_default();
        anyhow::ensure!(
            user.meals.iter().all(|m| m.id != meal.id),
            "meal {} already exists",
            meal.id
        );
        user.meals.push(meal.clone());
        Ok(meal)
    }

    async fn update_meal(&self, user_id: Uuid, mut meal: Meal) -> anyhow::Result<Option<Meal>> {
        let mut users = self.users.write().await;
        let Some(slot) = users
            .get_mut(&user_id)
            .and_then(|u| u.meals.iter_mut().find(|m| m.id == meal.id))
        else {
            return Ok(None);
        };
        meal.created_at = slot.created_at;
        *slot = meal.clone();
        Ok(Some(meal))
    }

    async fn delete_meal(&self, user_id: Uuid, meal_id: Uuid) -> anyhow::Result<bool> {
        let mut users = self.users.write().await;
        let Some(user) = users.get_mut(&user_id) else {
            return Ok(false);
        };
        let before = user.meals.len();
        user.meals.retain(|m| m.id != meal_id);
        Ok(user.meals.len() != before)
    }

    async fn get_settings(&self, user_id: Uuid) -> anyhow::Result<Option<UserSettings>> {
        let users = self.users.read().await;
        Ok(users.get(&user_id).and_then(|u| u.settings.clone()))
    }

    async fn put_settings(&self, user_id: Uuid, settings: UserSettings) -> anyhow::Result<UserSettings> {
        settings
            .validate()
            .with_context(|| format!("refusing to store settings for {user_id}"))?;
        let mut users = self.users.write().await;
        users.entry(user_id).or_default().settings = Some(settings.clone());
        Ok(settings)
    }
}
