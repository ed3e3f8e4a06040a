mod client;
pub mod dto;
pub mod services;

pub use client::PredictClient;
pub use dto::{Calories, PredictResponse};
pub use services::{present, AnalysisResult};
