use serde::Deserialize;

/// Raw body returned by `POST /predict`. The endpoint reports calories in one
/// of two shapes selected by `is_piecewise`; both fields may arrive as JSON
/// numbers or strings depending on the model backend.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictResponse {
    pub food: String,
    #[serde(default)]
    pub is_piecewise: bool,
    pub calories_per_piece: Option<CalorieFigure>,
    pub total_calories: Option<CalorieFigure>,
    pub protein: Option<String>,
    pub carbs: Option<String>,
    pub fats: Option<String>,
}

/// Error body the endpoint sends with non-2xx statuses.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CalorieFigure {
    Number(f64),
    Text(String),
}

impl CalorieFigure {
    /// Integer value for the persisted record. Textual figures are read the
    /// way `parseInt` reads them, leading digits only, 0 when unreadable.
    pub fn as_integer(&self) -> i64 {
        match self {
            CalorieFigure::Number(n) => n.trunc() as i64,
            CalorieFigure::Text(s) => {
                let trimmed = s.trim_start();
                let digits: String = trimmed.chars().take_while(|c| c.is_ascii_digit()).collect();
                digits.parse().unwrap_or(0)
            }
        }
    }
}

impl std::fmt::Display for CalorieFigure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CalorieFigure::Number(n) if n.fract() == 0.0 => write!(f, "{}", *n as i64),
            CalorieFigure::Number(n) => write!(f, "{n}"),
            CalorieFigure::Text(s) => f.write_str(s),
        }
    }
}

/// Calorie shape normalized into an exhaustive variant so the selection rule
/// cannot silently read the wrong field.
#[derive(Debug, Clone, PartialEq)]
pub enum Calories {
    PerPiece { amount: CalorieFigure },
    Aggregate { total: CalorieFigure },
}

impl Calories {
    pub fn from_response(resp: &PredictResponse) -> Self {
        // An absent figure on the discriminated side reads as zero rather
        // than falling back to the other shape.
        let missing = CalorieFigure::Number(0.0);
        if resp.is_piecewise {
            Calories::PerPiece {
                amount: resp.calories_per_piece.clone().unwrap_or(missing),
            }
        } else {
            Calories::Aggregate {
                total: resp.total_calories.clone().unwrap_or(missing),
            }
        }
    }

    /// The figure shown to the user, per piece or aggregate.
    pub fn displayed(&self) -> &CalorieFigure {
        match self {
            Calories::PerPiece { amount } => amount,
            Calories::Aggregate { total } => total,
        }
    }

    pub fn is_piecewise(&self) -> bool {
        matches!(self, Calories::PerPiece { .. })
    }
}

#[cfg(test)]
mod dto_tests {
    use super::*;

    #[test]
    fn response_accepts_numeric_and_string_calories() {
        let numeric: PredictResponse =
            serde_json::from_str(r#"{"food":"apple_pie","is_piecewise":false,"total_calories":320}"#)
                .expect("numeric body");
        assert_eq!(numeric.total_calories, Some(CalorieFigure::Number(320.0)));

        let text: PredictResponse = serde_json::from_str(
            r#"{"food":"samosa","is_piecewise":true,"calories_per_piece":"110"}"#,
        )
        .expect("string body");
        assert_eq!(
            text.calories_per_piece,
            Some(CalorieFigure::Text("110".into()))
        );
    }

    #[test]
    fn piecewise_discriminator_selects_per_piece_figure() {
        let resp: PredictResponse = serde_json::from_str(
            r#"{"food":"cookie","is_piecewise":true,"calories_per_piece":80,"total_calories":400}"#,
        )
        .expect("body");
        let calories = Calories::from_response(&resp);
        assert!(calories.is_piecewise());
        assert_eq!(calories.displayed(), &CalorieFigure::Number(80.0));
    }

    #[test]
    fn aggregate_ignores_per_piece_field() {
        let resp: PredictResponse = serde_json::from_str(
            r#"{"food":"lasagna","is_piecewise":false,"calories_per_piece":80,"total_calories":600}"#,
        )
        .expect("body");
        let calories = Calories::from_response(&resp);
        assert!(!calories.is_piecewise());
        assert_eq!(calories.displayed(), &CalorieFigure::Number(600.0));
    }

    #[test]
    fn integer_reading_takes_leading_digits() {
        assert_eq!(CalorieFigure::Text("250 kcal".into()).as_integer(), 250);
        assert_eq!(CalorieFigure::Text("approx".into()).as_integer(), 0);
        assert_eq!(CalorieFigure::Number(199.7).as_integer(), 199);
    }
}
