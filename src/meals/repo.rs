use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Consumption-time category attached to a logged meal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mealtime {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl Mealtime {
    pub fn label(&self) -> &'static str {
        match self {
            Mealtime::Breakfast => "Breakfast",
            Mealtime::Lunch => "Lunch",
            Mealtime::Dinner => "Dinner",
            Mealtime::Snack => "Snack",
        }
    }
}

impl std::str::FromStr for Mealtime {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "breakfast" => Ok(Mealtime::Breakfast),
            "lunch" => Ok(Mealtime::Lunch),
            "dinner" => Ok(Mealtime::Dinner),
            "snack" => Ok(Mealtime::Snack),
            other => anyhow::bail!("unknown mealtime {other:?}"),
        }
    }
}

/// Unset mealtime is stored as the empty string, matching the log format the
/// meal tracker page already reads.
mod mealtime_repr {
    use super::Mealtime;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(v: &Option<Mealtime>, s: S) -> Result<S::Ok, S::Error> {
        match v {
            Some(m) => m.serialize(s),
            None => s.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Mealtime>, D::Error> {
        let raw = String::deserialize(d)?;
        Ok(raw.parse().ok())
    }
}

/// One confirmed entry in the meal log. Immutable once written; deletion
/// belongs to the tracker page, not this client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggedMeal {
    pub id: String,
    pub food_name: String,
    pub calories: i64,
    pub protein: String,
    pub carbs: String,
    pub fats: String,
    #[serde(with = "mealtime_repr", default)]
    pub mealtime: Option<Mealtime>,
    /// Epoch milliseconds at confirmation time.
    pub timestamp: i64,
    pub image_url: String,
}

/// Persistence seam for the meal log. The log is one serialized array written
/// back whole on every append, so alternative stores (file, embedded db,
/// memory) slot in behind the same two calls.
#[async_trait]
pub trait MealLogRepo: Send + Sync {
    /// Current persisted sequence. Absent or unreadable state is an empty
    /// sequence, never an error.
    async fn load(&self) -> Vec<LoggedMeal>;

    /// Replaces the persisted sequence with `meals`. Last writer wins; there
    /// is no cross-process coordination.
    async fn save(&self, meals: &[LoggedMeal]) -> anyhow::Result<()>;
}

/// File-backed log, the native analogue of the browser's `loggedMeals` key.
pub struct JsonFileRepo {
    path: PathBuf,
}

impl JsonFileRepo {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl MealLogRepo for JsonFileRepo {
    async fn load(&self) -> Vec<LoggedMeal> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(_) => return Vec::new(),
        };
        match serde_json::from_str(&raw) {
            Ok(meals) => meals,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "meal log unreadable, starting empty");
                Vec::new()
            }
        }
    }

    async fn save(&self, meals: &[LoggedMeal]) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("create {}", parent.display()))?;
        }
        let blob = serde_json::to_string(meals).context("serialize meal log")?;
        tokio::fs::write(&self.path, blob)
            .await
            .with_context(|| format!("write {}", self.path.display()))?;
        Ok(())
    }
}

/// In-memory log for tests and fakes.
#[derive(Default)]
pub struct InMemoryRepo {
    meals: Mutex<Vec<LoggedMeal>>,
}

#[async_trait]
impl MealLogRepo for InMemoryRepo {
    async fn load(&self) -> Vec<LoggedMeal> {
        self.meals.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    async fn save(&self, meals: &[LoggedMeal]) -> anyhow::Result<()> {
        *self.meals.lock().unwrap_or_else(|e| e.into_inner()) = meals.to_vec();
        Ok(())
    }
}
