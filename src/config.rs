use std::path::PathBuf;

/// Fixed host the food ML service listens on during development.
const DEV_API_BASE_URL: &str = "http://localhost:5001";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub meal_log_path: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let production = std::env::var("APP_ENV")
            .map(|v| v == "production")
            .unwrap_or(false);

        let api_base_url = match std::env::var("API_BASE_URL") {
            Ok(url) => url,
            Err(_) if production => {
                anyhow::bail!("API_BASE_URL is required when APP_ENV=production")
            }
            Err(_) => DEV_API_BASE_URL.into(),
        };

        let meal_log_path = std::env::var("MEAL_LOG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_meal_log_path());

        Ok(Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            meal_log_path,
        })
    }
}

fn default_meal_log_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mealsnap")
        .join("logged_meals.json")
}

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn default_log_path_is_under_data_dir() {
        let path = default_meal_log_path();
        assert!(path.ends_with("mealsnap/logged_meals.json"));
    }
}
