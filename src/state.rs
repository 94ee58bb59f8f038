use crate::config::AppConfig;
use crate::parsing::{DisabledParser, NutritionParser, OpenAiParser};
use crate::settings::SettingsHub;
use crate::store::{MealStore, MemoryStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn MealStore>,
    pub settings: Arc<SettingsHub>,
    pub parser: Arc<dyn NutritionParser>,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let parser: Arc<dyn NutritionParser> = match &config.openai {
            Some(openai) => Arc::new(OpenAiParser::new(openai.clone())),
            None => {
                tracing::warn!("OPENAI_API_KEY not set; meal text parsing disabled");
                Arc::new(DisabledParser)
            }
        };

        let store = Arc::new(MemoryStore::new()) as Arc<dyn MealStore>;
        Ok(Self::from_parts(config, store, parser))
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        store: Arc<dyn MealStore>,
        parser: Arc<dyn NutritionParser>,
    ) -> Self {
        let settings = Arc::new(SettingsHub::new(store.clone()));
        Self {
            config,
            store,
            settings,
            parser,
        }
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        use crate::nutrition::FoodItem;
        use crate::parsing::ParseError;
        use async_trait::async_trait;

        /// Answers every description with one 100 kcal item named after it.
        struct FakeParser;
        #[async_trait]
        impl NutritionParser for FakeParser {
            async fn parse(&self, text: &str) -> Result<Vec<FoodItem>, ParseError> {
                Ok(vec![FoodItem {
                    id: uuid::Uuid::new_v4(),
                    name: text.to_string(),
                    calories: 100.0,
                    protein: 10.0,
                    fiber: 2.0,
                    quantity: None,
                }])
            }
        }

        let config = Arc::new(AppConfig {
            host: "127.0.0.1".into(),
            port: 0,
            openai: None,
            max_history_days: 90,
        });

        Self::from_parts(
            config,
            Arc::new(MemoryStore::new()),
            Arc::new(FakeParser),
        )
    }
}
