//! Per-batch survey context: where, when, what habitat, what weather.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Habitat, WeatherConditions};
use crate::config::{PravenConfig, Thresholds};
use crate::errors::ContextError;

/// A validated WGS84 coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
}

impl Location {
    pub fn new(lat: f64, lon: f64) -> Result<Self, ContextError> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(ContextError::LatitudeOutOfRange { value: lat });
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(ContextError::LongitudeOutOfRange { value: lon });
        }
        Ok(Self { lat, lon })
    }
}

/// Everything the evaluators need to know about the survey a batch came from.
///
/// Built once per batch through [`ValidationContext::builder`] and read-only
/// while detections are evaluated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationContext {
    pub location: Location,
    pub date: NaiveDate,
    pub habitat: Habitat,
    pub weather: Option<WeatherConditions>,
    pub thresholds: Thresholds,
}

impl ValidationContext {
    pub fn builder(lat: f64, lon: f64, date: impl Into<String>) -> ValidationContextBuilder {
        ValidationContextBuilder {
            lat,
            lon,
            date: date.into(),
            habitat: HabitatInput::Unset,
            weather: None,
            thresholds: Thresholds::default(),
        }
    }

    /// Builder seeded with `config.thresholds`, so `praven.toml` and
    /// `PRAVEN_*` overrides reach evaluation.
    pub fn builder_from(
        config: &PravenConfig,
        lat: f64,
        lon: f64,
        date: impl Into<String>,
    ) -> ValidationContextBuilder {
        Self::builder(lat, lon, date).thresholds(config.thresholds.clone())
    }

    /// Copy of this context with the habitat replaced.
    pub fn with_habitat(&self, habitat: Habitat) -> Self {
        Self {
            habitat,
            ..self.clone()
        }
    }

    /// Copy of this context with weather attached.
    pub fn with_weather(&self, weather: WeatherConditions) -> Self {
        Self {
            weather: Some(weather),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone)]
enum HabitatInput {
    Unset,
    Known(Habitat),
    Named(String),
}

/// Fail-fast builder for [`ValidationContext`].
#[derive(Debug, Clone)]
pub struct ValidationContextBuilder {
    lat: f64,
    lon: f64,
    date: String,
    habitat: HabitatInput,
    weather: Option<WeatherConditions>,
    thresholds: Thresholds,
}

impl ValidationContextBuilder {
    pub fn habitat(mut self, habitat: Habitat) -> Self {
        self.habitat = HabitatInput::Known(habitat);
        self
    }

    /// Habitat by name, parsed case-insensitively at build time.
    pub fn habitat_name(mut self, name: impl Into<String>) -> Self {
        self.habitat = HabitatInput::Named(name.into());
        self
    }

    pub fn weather(mut self, weather: WeatherConditions) -> Self {
        self.weather = Some(weather);
        self
    }

    pub fn thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Validate every field. An unset habitat becomes [`Habitat::Unknown`].
    pub fn build(self) -> Result<ValidationContext, ContextError> {
        let location = Location::new(self.lat, self.lon)?;
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").map_err(|_| {
            ContextError::MalformedDate {
                value: self.date.clone(),
            }
        })?;
        let habitat = match self.habitat {
            HabitatInput::Unset => Habitat::Unknown,
            HabitatInput::Known(h) => h,
            HabitatInput::Named(name) => name.parse()?,
        };
        if let Some(w) = &self.weather {
            for (name, value) in [("weather.rain", w.rain), ("weather.fog", w.fog)] {
                if !(0.0..=1.0).contains(&value) {
                    return Err(ContextError::ThresholdOutOfRange {
                        name: name.to_string(),
                        value,
                    });
                }
            }
        }
        self.thresholds.validate()?;

        Ok(ValidationContext {
            location,
            date,
            habitat,
            weather: self.weather,
            thresholds: self.thresholds,
        })
    }
}
