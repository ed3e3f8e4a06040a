use std::sync::Arc;

use crate::config::AppConfig;
use crate::meals::{JsonFileRepo, MealLogRepo};
use crate::predict::PredictClient;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub client: PredictClient,
    pub meals: Arc<dyn MealLogRepo>,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let client = PredictClient::new(config.api_base_url.clone());
        let meals =
            Arc::new(JsonFileRepo::new(config.meal_log_path.clone())) as Arc<dyn MealLogRepo>;
        Ok(Self {
            config,
            client,
            meals,
        })
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        use crate::meals::InMemoryRepo;

        let config = Arc::new(AppConfig {
            api_base_url: "http://localhost:5001".into(),
            meal_log_path: std::env::temp_dir().join("mealsnap-test.json"),
        });
        let client = PredictClient::new(config.api_base_url.clone());
        let meals = Arc::new(InMemoryRepo::default()) as Arc<dyn MealLogRepo>;
        Self {
            config,
            client,
            meals,
        }
    }
}

#[cfg(test)]
mod state_tests {
    use super::*;
    use crate::meals;
    use crate::predict::{present, PredictResponse};

    #[tokio::test]
    async fn fake_state_logs_through_the_repo_seam() {
        let state = AppState::fake();
        let resp: PredictResponse =
            serde_json::from_str(r#"{"food":"miso_soup","is_piecewise":false,"total_calories":80}"#)
                .expect("body");
        let result = present(&resp, "", None, "file:///tmp/soup.jpg");

        meals::append(state.meals.as_ref(), &result, None)
            .await
            .expect("append");
        assert_eq!(meals::list(state.meals.as_ref()).await.len(), 1);
    }
}
