use serde::{Deserialize, Serialize};

/// Weather at the time and place of a survey.
///
/// `rain` and `fog` are normalized intensities in [0, 1]. Missing temperature
/// and wind are tolerated; the activity heuristic substitutes its own defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherConditions {
    pub rain: f64,
    pub fog: f64,
    pub temperature_c: Option<f64>,
    pub wind_speed: Option<f64>,
    /// Cloud cover as a fraction in [0, 1].
    pub cloud_cover: f64,
}

impl Default for WeatherConditions {
    /// Mild, dry conditions used when no provider answered.
    fn default() -> Self {
        Self {
            rain: 0.0,
            fog: 0.0,
            temperature_c: Some(15.0),
            wind_speed: Some(5.0),
            cloud_cover: 0.5,
        }
    }
}

impl WeatherConditions {
    /// Build conditions from raw provider readings.
    ///
    /// Missing visibility counts as clear air; cloud cover arrives in percent.
    pub fn from_readings(
        temperature_c: Option<f64>,
        precipitation_mm: f64,
        visibility_m: Option<f64>,
        wind_speed: Option<f64>,
        cloud_cover_pct: f64,
    ) -> Self {
        Self {
            rain: normalize_precipitation(precipitation_mm),
            fog: normalize_visibility(visibility_m.unwrap_or(10_000.0)),
            temperature_c,
            wind_speed,
            cloud_cover: (cloud_cover_pct / 100.0).clamp(0.0, 1.0),
        }
    }
}

/// Map hourly precipitation (mm) onto a rain intensity in [0, 1].
///
/// Drizzle (<0.5mm) is 0.1, light rain rises to 0.5 at 2.5mm, moderate rain
/// to 0.8 at 10mm, and heavy rain saturates at 25mm.
pub fn normalize_precipitation(precip_mm: f64) -> f64 {
    if precip_mm <= 0.0 {
        0.0
    } else if precip_mm < 0.5 {
        0.1
    } else if precip_mm < 2.5 {
        0.2 + (precip_mm - 0.5) / 2.0 * 0.3
    } else if precip_mm < 10.0 {
        0.5 + (precip_mm - 2.5) / 7.5 * 0.3
    } else {
        (0.8 + (precip_mm - 10.0) / 15.0 * 0.2).min(1.0)
    }
}

/// Map visibility (m) onto a fog density in [0, 1]. 10km or more is clear.
pub fn normalize_visibility(visibility_m: f64) -> f64 {
    if visibility_m >= 10_000.0 {
        0.0
    } else if visibility_m >= 5_000.0 {
        0.2 * (1.0 - (visibility_m - 5_000.0) / 5_000.0)
    } else if visibility_m >= 1_000.0 {
        0.2 + 0.3 * (1.0 - (visibility_m - 1_000.0) / 4_000.0)
    } else if visibility_m >= 200.0 {
        0.5 + 0.3 * (1.0 - (visibility_m - 200.0) / 800.0)
    } else {
        (0.8 + 0.2 * (1.0 - visibility_m / 200.0)).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precipitation_scale_is_monotonic_and_bounded() {
        assert_eq!(normalize_precipitation(0.0), 0.0);
        assert_eq!(normalize_precipitation(0.3), 0.1);
        assert!((normalize_precipitation(2.5) - 0.5).abs() < 1e-9);
        assert!((normalize_precipitation(10.0) - 0.8).abs() < 1e-9);
        assert_eq!(normalize_precipitation(100.0), 1.0);
        let mut last = 0.0;
        for tenth in 0..300 {
            let v = normalize_precipitation(tenth as f64 / 10.0);
            assert!(v >= last);
            last = v;
        }
    }

    #[test]
    fn visibility_scale() {
        assert_eq!(normalize_visibility(20_000.0), 0.0);
        assert!((normalize_visibility(5_000.0) - 0.2).abs() < 1e-9);
        assert!((normalize_visibility(1_000.0) - 0.5).abs() < 1e-9);
        assert!((normalize_visibility(200.0) - 0.8).abs() < 1e-9);
        assert_eq!(normalize_visibility(0.0), 1.0);
    }

    #[test]
    fn readings_normalize_cloud_percent() {
        let w = WeatherConditions::from_readings(Some(4.0), 0.0, None, Some(3.0), 75.0);
        assert_eq!(w.rain, 0.0);
        assert_eq!(w.fog, 0.0);
        assert!((w.cloud_cover - 0.75).abs() < 1e-9);
    }
}
