pub mod repo;
pub mod services;

pub use repo::{InMemoryRepo, JsonFileRepo, LoggedMeal, MealLogRepo, Mealtime};
pub use services::{append, list};
