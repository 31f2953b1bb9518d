//! Weather normalization
//!
//! Merges the provider payloads for one request into a single
//! [`CanonicalWeatherRecord`]. Temperature and humidity are mandatory; every
//! other field degrades to a documented default when the upstream omits it,
//! so the serialized record always carries the full field set.

use serde::Serialize;
use thiserror::Error;

use crate::metrics;
use crate::units;

pub mod open_meteo;

/// PM2.5 assumed when the air-quality feed is silent (µg/m³)
pub const DEFAULT_PM25: f64 = 10.0;
/// Visibility assumed when the hourly series is silent (meters)
pub const DEFAULT_VISIBILITY_M: f64 = 10000.0;
/// Standard sea-level pressure (hPa)
pub const DEFAULT_PRESSURE_HPA: f64 = 1013.0;

/// The primary payload lacked a field the record cannot default
#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("primary weather payload is missing mandatory field: {field}")]
    MissingField { field: &'static str },
}

/// Current surface conditions from the primary provider, provider units
#[derive(Debug, Clone, Default)]
pub struct CurrentObservation {
    pub temperature_c: Option<f64>,
    pub relative_humidity: Option<f64>,
    pub wind_speed_ms: Option<f64>,
    pub wind_gusts_ms: Option<f64>,
    pub visibility_m: Option<f64>,
    pub precipitation_mm: Option<f64>,
    pub cloud_cover_pct: Option<f64>,
    pub pressure_hpa: Option<f64>,
    pub snow_depth_mm: Option<f64>,
    pub soil_moisture: Option<f64>,
}

/// Short-range forecast temperatures (°C), oldest first
#[derive(Debug, Clone, Default)]
pub struct ForecastWindow {
    pub temperatures_c: Vec<f64>,
}

/// UV reading for the current hour
#[derive(Debug, Clone, Default)]
pub struct UvObservation {
    pub uv_index: Option<f64>,
}

/// Air-quality readings for the current hour
#[derive(Debug, Clone, Default)]
pub struct AirQualityObservation {
    pub pm25: Option<f64>,
    pub ozone: Option<f64>,
    pub no2: Option<f64>,
}

/// One fully-populated weather record, canonical units.
///
/// Built fresh per request and discarded after serialization; never cached.
#[derive(Debug, Clone, Serialize)]
pub struct CanonicalWeatherRecord {
    /// °F
    pub temperature: f64,
    /// °F, low over the next ~24 h forecast window
    pub temp_min: f64,
    /// °F, high over the next ~24 h forecast window
    pub temp_max: f64,
    /// %, 0-100
    pub humidity: f64,
    /// °F, NOAA Rothfusz apparent temperature
    pub heat_index: f64,
    pub uv_index: f64,
    /// µg/m³
    pub pm25: f64,
    /// mph
    pub wind_speed: f64,
    /// mph
    pub wind_gusts: f64,
    /// miles
    pub visibility: f64,
    /// mm/hr
    pub precipitation: f64,
    /// %
    pub cloud_cover: f64,
    /// hPa
    pub pressure: f64,
    /// mm
    pub snow_depth: f64,
    /// µg/m³
    pub ozone: f64,
    /// µg/m³
    pub no2: f64,
    /// 0-10
    pub fire_risk: u8,
    /// fraction
    pub soil_moisture: f64,
}

/// Merge the per-provider observations into one canonical record.
///
/// Fails only when temperature or humidity is absent; all other fields take
/// their documented defaults.
pub fn normalize(
    current: &CurrentObservation,
    forecast: Option<&ForecastWindow>,
    uv: &UvObservation,
    air: &AirQualityObservation,
) -> Result<CanonicalWeatherRecord, NormalizeError> {
    let temp_c = current
        .temperature_c
        .ok_or(NormalizeError::MissingField {
            field: "temperature",
        })?;
    let humidity = current
        .relative_humidity
        .ok_or(NormalizeError::MissingField { field: "humidity" })?;

    let temp_f = units::celsius_to_fahrenheit(temp_c);
    let wind_mph = units::ms_to_mph(current.wind_speed_ms.unwrap_or(0.0));
    let gusts_mph = units::ms_to_mph(current.wind_gusts_ms.unwrap_or(0.0));
    let visibility_mi =
        units::meters_to_miles(current.visibility_m.unwrap_or(DEFAULT_VISIBILITY_M));

    let (temp_min, temp_max) = forecast
        .filter(|w| !w.temperatures_c.is_empty())
        .map(|w| {
            let mut min = f64::INFINITY;
            let mut max = f64::NEG_INFINITY;
            for &t in &w.temperatures_c {
                let f = units::celsius_to_fahrenheit(t);
                min = min.min(f);
                max = max.max(f);
            }
            (min, max)
        })
        .unwrap_or((temp_f, temp_f));

    Ok(CanonicalWeatherRecord {
        temperature: units::round1(temp_f),
        temp_min: units::round1(temp_min),
        temp_max: units::round1(temp_max),
        humidity,
        heat_index: units::round1(metrics::heat_index(temp_f, humidity)),
        uv_index: uv.uv_index.unwrap_or(0.0),
        pm25: air.pm25.unwrap_or(DEFAULT_PM25),
        wind_speed: units::round1(wind_mph),
        wind_gusts: units::round1(gusts_mph),
        visibility: units::round1(visibility_mi),
        precipitation: current.precipitation_mm.unwrap_or(0.0),
        cloud_cover: current.cloud_cover_pct.unwrap_or(0.0),
        pressure: current.pressure_hpa.unwrap_or(DEFAULT_PRESSURE_HPA),
        snow_depth: current.snow_depth_mm.unwrap_or(0.0),
        ozone: air.ozone.unwrap_or(0.0),
        no2: air.no2.unwrap_or(0.0),
        fire_risk: metrics::fire_danger(temp_f, humidity, wind_mph),
        soil_moisture: current.soil_moisture.unwrap_or(0.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_current() -> CurrentObservation {
        CurrentObservation {
            temperature_c: Some(22.0),
            relative_humidity: Some(30.0),
            wind_speed_ms: Some(5.0),
            ..CurrentObservation::default()
        }
    }

    #[test]
    fn test_normalize_converts_units() {
        let record = normalize(
            &minimal_current(),
            None,
            &UvObservation::default(),
            &AirQualityObservation::default(),
        )
        .unwrap();

        assert!((record.temperature - 71.6).abs() < 0.05);
        assert!((record.wind_speed - 11.2).abs() < 0.05);
        assert_eq!(record.humidity, 30.0);
    }

    #[test]
    fn test_normalize_applies_defaults() {
        let record = normalize(
            &minimal_current(),
            None,
            &UvObservation::default(),
            &AirQualityObservation::default(),
        )
        .unwrap();

        assert_eq!(record.pm25, DEFAULT_PM25);
        assert_eq!(record.ozone, 0.0);
        assert_eq!(record.no2, 0.0);
        assert_eq!(record.uv_index, 0.0);
        assert_eq!(record.pressure, DEFAULT_PRESSURE_HPA);
        assert_eq!(record.snow_depth, 0.0);
        assert_eq!(record.soil_moisture, 0.0);
        // 10000 m default → 6.2 mi
        assert!((record.visibility - 6.2).abs() < 0.05);
    }

    #[test]
    fn test_normalize_requires_temperature() {
        let current = CurrentObservation {
            temperature_c: None,
            ..minimal_current()
        };
        let err = normalize(
            &current,
            None,
            &UvObservation::default(),
            &AirQualityObservation::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("temperature"));
    }

    #[test]
    fn test_normalize_requires_humidity() {
        let current = CurrentObservation {
            relative_humidity: None,
            ..minimal_current()
        };
        assert!(
            normalize(
                &current,
                None,
                &UvObservation::default(),
                &AirQualityObservation::default(),
            )
            .is_err()
        );
    }

    #[test]
    fn test_temp_min_max_from_forecast_window() {
        let window = ForecastWindow {
            temperatures_c: vec![20.0, 25.0, 18.0, 22.0],
        };
        let record = normalize(
            &minimal_current(),
            Some(&window),
            &UvObservation::default(),
            &AirQualityObservation::default(),
        )
        .unwrap();
        assert!((record.temp_min - 64.4).abs() < 0.05); // 18 °C
        assert!((record.temp_max - 77.0).abs() < 0.05); // 25 °C
    }

    #[test]
    fn test_temp_min_max_fall_back_to_current() {
        let record = normalize(
            &minimal_current(),
            Some(&ForecastWindow::default()),
            &UvObservation::default(),
            &AirQualityObservation::default(),
        )
        .unwrap();
        assert_eq!(record.temp_min, record.temperature);
        assert_eq!(record.temp_max, record.temperature);
    }

    #[test]
    fn test_fire_risk_derived_from_converted_values() {
        // 71.6 °F (+1), 30 % humidity (+3), 11.2 mph (+1) → 5
        let record = normalize(
            &minimal_current(),
            None,
            &UvObservation::default(),
            &AirQualityObservation::default(),
        )
        .unwrap();
        assert_eq!(record.fire_risk, 5);
    }
}
