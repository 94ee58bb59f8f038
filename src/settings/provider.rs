use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{watch, RwLock};
use tracing::{debug, info};
use uuid::Uuid;

use super::dto::UserSettings;
use crate::nutrition::DailyGoals;
use crate::store::MealStore;

/// Hands out each user's current settings and notifies subscribers when they
/// change. Readers get it injected through `AppState` and either ask for the
/// current value or hold a `watch::Receiver`.
pub struct SettingsHub {
    store: Arc<dyn MealStore>,
    channels: RwLock<HashMap<Uuid, watch::Sender<UserSettings>>>,
}

impl SettingsHub {
    pub fn new(store: Arc<dyn MealStore>) -> Self {
        Self {
            store,
            channels: RwLock::new(HashMap::new()),
        }
    }

    /// Current settings; defaults when the user never saved any.
    pub async fn current(&self, user_id: Uuid) -> anyhow::Result<UserSettings> {
        let rx = self.receiver(user_id).await?;
        let current = rx.borrow().clone();
        Ok(current)
    }

    pub async fn goals(&self, user_id: Uuid) -> anyhow::Result<DailyGoals> {
        Ok(self.current(user_id).await?.goals())
    }

    /// Receiver that observes every later `save` for this user.
    pub async fn subscribe(&self, user_id: Uuid) -> anyhow::Result<watch::Receiver<UserSettings>> {
        self.receiver(user_id).await
    }

    /// Validates and persists `settings`, then notifies subscribers. The
    /// channel lock is held across both steps so overlapping saves publish in
    /// the order they were stored.
    pub async fn save(&self, user_id: Uuid, settings: UserSettings) -> anyhow::Result<UserSettings> {
        let mut channels = self.channels.write().await;
        let saved = self.store.put_settings(user_id, settings).await?;
        match channels.get(&user_id) {
            Some(tx) => {
                tx.send_replace(saved.clone());
                debug!(%user_id, receivers = tx.receiver_count(), "settings published");
            }
            None => {
                let (tx, _rx) = watch::channel(saved.clone());
                channels.insert(user_id, tx);
            }
        }
        info!(%user_id, calorie_goal = saved.calorie_goal, "settings saved");
        Ok(saved)
    }

    async fn receiver(&self, user_id: Uuid) -> anyhow::Result<watch::Receiver<UserSettings>> {
        if let Some(tx) = self.channels.read().await.get(&user_id) {
            return Ok(tx.subscribe());
        }
        let loaded = self.store.get_settings(user_id).await?.unwrap_or_default();
        let mut channels = self.channels.write().await;
        let tx = channels
            .entry(user_id)
            .or_insert_with(|| watch::channel(loaded).0);
        Ok(tx.subscribe())
    }
}
