use time::OffsetDateTime;
use tracing::debug;

use super::repo::{LoggedMeal, MealLogRepo, Mealtime};
use crate::error::AppError;
use crate::predict::AnalysisResult;

/// Appends one confirmed result to the persisted log and returns the stored
/// record. Reads the whole sequence, pushes, writes it back as a single blob;
/// concurrent writers race last-writer-wins.
pub async fn append(
    repo: &dyn MealLogRepo,
    result: &AnalysisResult,
    mealtime: Option<Mealtime>,
) -> Result<LoggedMeal, AppError> {
    let mut meals = repo.load().await;

    let now_ms = epoch_millis();
    let meal = LoggedMeal {
        id: fresh_id(now_ms, &meals),
        food_name: result.food_name.clone(),
        calories: result.calories.displayed().as_integer(),
        protein: result.protein.clone(),
        carbs: result.carbs.clone(),
        fats: result.fats.clone(),
        mealtime: mealtime.or(result.mealtime),
        timestamp: now_ms,
        image_url: result.image_url.clone(),
    };
    debug!(id = %meal.id, food = %meal.food_name, "logging meal");

    meals.push(meal.clone());
    repo.save(&meals).await.map_err(AppError::Storage)?;
    Ok(meal)
}

/// Full persisted sequence, oldest first.
pub async fn list(repo: &dyn MealLogRepo) -> Vec<LoggedMeal> {
    repo.load().await
}

fn epoch_millis() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}

/// Identifier derived from the creation-time clock reading. Two confirms in
/// the same millisecond would collide, so the candidate is bumped until it is
/// distinct from every stored id.
fn fresh_id(now_ms: i64, existing: &[LoggedMeal]) -> String {
    let mut candidate = now_ms;
    loop {
        let id = candidate.to_string();
        if !existing.iter().any(|m| m.id == id) {
            return id;
        }
        candidate += 1;
    }
}
