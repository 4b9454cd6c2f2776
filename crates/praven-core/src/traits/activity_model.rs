use crate::models::WeatherConditions;

/// Trained replacement for the weather-activity heuristic.
pub trait IActivityModel: Send + Sync {
    /// Whether the model has been fitted. Untrained models are bypassed.
    fn is_trained(&self) -> bool;

    /// Predicted vocal activity in [0, 1]. Out-of-range output is clamped by the caller.
    fn predict_activity_score(&self, species: &str, weather: &WeatherConditions) -> f64;
}
