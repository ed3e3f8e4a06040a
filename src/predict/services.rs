use super::dto::{Calories, PredictResponse};
use crate::meals::Mealtime;

/// Macro fields the endpoint may omit, with the placeholder shown in that
/// case. One table so the substitution policy lives in a single place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacroField {
    Protein,
    Carbs,
    Fats,
}

const MACRO_DEFAULTS: [(MacroField, &str); 3] = [
    (MacroField::Protein, "15g"),
    (MacroField::Carbs, "30g"),
    (MacroField::Fats, "10g"),
];

fn macro_or_default(field: MacroField, value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => MACRO_DEFAULTS
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, d)| (*d).to_string())
            .unwrap_or_default(),
    }
}

/// Display record assembled from one inference response. Immutable; discarded
/// on reset, logged on confirmation.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub food_name: String,
    pub detected_food: String,
    pub calories: Calories,
    pub protein: String,
    pub carbs: String,
    pub fats: String,
    pub mealtime: Option<Mealtime>,
    pub image_url: String,
}

impl AnalysisResult {
    /// The detected-food line appears only when an override made it differ
    /// from the display name.
    pub fn shows_detected_line(&self) -> bool {
        self.food_name != self.detected_food
    }
}

/// Maps the raw response plus user-entered overrides into the display record.
/// A non-empty override name wins; the server label is kept alongside, with
/// underscores rendered as spaces.
pub fn present(
    resp: &PredictResponse,
    name_override: &str,
    mealtime: Option<Mealtime>,
    image_url: &str,
) -> AnalysisResult {
    let detected_food = resp.food.replace('_', " ");
    let food_name = if name_override.is_empty() {
        detected_food.clone()
    } else {
        name_override.to_string()
    };

    AnalysisResult {
        food_name,
        detected_food,
        calories: Calories::from_response(resp),
        protein: macro_or_default(MacroField::Protein, resp.protein.as_deref()),
        carbs: macro_or_default(MacroField::Carbs, resp.carbs.as_deref()),
        fats: macro_or_default(MacroField::Fats, resp.fats.as_deref()),
        mealtime,
        image_url: image_url.to_string(),
    }
}
