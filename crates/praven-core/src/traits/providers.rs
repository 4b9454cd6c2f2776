use chrono::{NaiveDate, NaiveTime};

use crate::errors::ServiceError;
use crate::models::{HabitatReport, WeatherConditions};

/// Historical or forecast weather at a point in time.
pub trait IWeatherProvider: Send + Sync {
    fn get(
        &self,
        lat: f64,
        lon: f64,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<WeatherConditions, ServiceError>;
}

/// Habitat composition around a point. Consulted only while a context is built.
pub trait IHabitatProvider: Send + Sync {
    fn get(&self, lat: f64, lon: f64, radius_m: u32) -> Result<HabitatReport, ServiceError>;
}
