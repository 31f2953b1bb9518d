//! Open-Meteo provider payloads and their mapping to intermediate
//! observations
//!
//! Two endpoints feed one weather response: the forecast endpoint (current
//! conditions plus hourly series) and the air-quality endpoint. Every field
//! is optional at the wire level; mapping into the intermediate observation
//! structs keeps the absences explicit, and the normalizer decides which
//! ones are mandatory.

use serde::Deserialize;

use super::{AirQualityObservation, CurrentObservation, ForecastWindow, UvObservation};

/// Forecast samples are hourly; sampling every third hour for eight samples
/// covers the next 24 hours.
const FORECAST_SAMPLE_STRIDE: usize = 3;
const FORECAST_SAMPLE_COUNT: usize = 8;

#[must_use]
pub fn forecast_url(lat: f64, lon: f64) -> String {
    format!(
        "https://api.open-meteo.com/v1/forecast?latitude={lat}&longitude={lon}\
         &current_weather=true\
         &hourly=temperature_2m,relativehumidity_2m,uv_index,windspeed_10m,visibility\
         &current=wind_gusts_10m,precipitation,cloud_cover,surface_pressure,snow_depth,soil_moisture_0_to_1cm\
         &timezone=auto&wind_speed_unit=ms"
    )
}

#[must_use]
pub fn air_quality_url(lat: f64, lon: f64) -> String {
    format!(
        "https://air-quality-api.open-meteo.com/v1/air-quality?latitude={lat}&longitude={lon}\
         &current=pm2_5,ozone,nitrogen_dioxide&timezone=auto"
    )
}

/// Forecast endpoint response
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub current_weather: Option<CurrentWeather>,
    pub hourly: Option<HourlyData>,
    pub current: Option<CurrentData>,
}

/// The `current_weather=true` block
#[derive(Debug, Deserialize)]
pub struct CurrentWeather {
    pub temperature: Option<f64>,
    /// m/s (the request sets `wind_speed_unit=ms`)
    pub windspeed: Option<f64>,
    /// ISO timestamp, keys the hourly series lookup
    pub time: Option<String>,
}

/// Hourly series from the forecast endpoint
#[derive(Debug, Deserialize)]
pub struct HourlyData {
    pub time: Vec<String>,
    #[serde(rename = "temperature_2m")]
    pub temperature: Option<Vec<Option<f64>>>,
    #[serde(rename = "relativehumidity_2m")]
    pub relative_humidity: Option<Vec<Option<f64>>>,
    pub uv_index: Option<Vec<Option<f64>>>,
    pub visibility: Option<Vec<Option<f64>>>,
}

/// The `current=` block with the secondary surface variables
#[derive(Debug, Deserialize)]
pub struct CurrentData {
    /// m/s
    #[serde(rename = "wind_gusts_10m")]
    pub wind_gusts: Option<f64>,
    pub precipitation: Option<f64>,
    pub cloud_cover: Option<f64>,
    #[serde(rename = "surface_pressure")]
    pub pressure: Option<f64>,
    pub snow_depth: Option<f64>,
    #[serde(rename = "soil_moisture_0_to_1cm")]
    pub soil_moisture: Option<f64>,
}

/// Air-quality endpoint response
#[derive(Debug, Deserialize)]
pub struct AirQualityResponse {
    pub current: Option<AirQualityCurrent>,
}

#[derive(Debug, Deserialize)]
pub struct AirQualityCurrent {
    #[serde(rename = "pm2_5")]
    pub pm25: Option<f64>,
    pub ozone: Option<f64>,
    #[serde(rename = "nitrogen_dioxide")]
    pub no2: Option<f64>,
}

impl ForecastResponse {
    /// Index into the hourly series matching the current-weather timestamp,
    /// falling back to the first sample when there is no exact match.
    fn hourly_index(&self) -> usize {
        let Some(hourly) = &self.hourly else { return 0 };
        self.current_weather
            .as_ref()
            .and_then(|cw| cw.time.as_ref())
            .and_then(|now| hourly.time.iter().position(|t| t == now))
            .unwrap_or(0)
    }

    #[must_use]
    pub fn current_observation(&self) -> CurrentObservation {
        let idx = self.hourly_index();
        let hourly_at = |series: &Option<Vec<Option<f64>>>| -> Option<f64> {
            series.as_ref().and_then(|v| v.get(idx).copied().flatten())
        };

        CurrentObservation {
            temperature_c: self.current_weather.as_ref().and_then(|cw| cw.temperature),
            relative_humidity: self
                .hourly
                .as_ref()
                .and_then(|h| hourly_at(&h.relative_humidity)),
            wind_speed_ms: self.current_weather.as_ref().and_then(|cw| cw.windspeed),
            wind_gusts_ms: self.current.as_ref().and_then(|c| c.wind_gusts),
            visibility_m: self.hourly.as_ref().and_then(|h| hourly_at(&h.visibility)),
            precipitation_mm: self.current.as_ref().and_then(|c| c.precipitation),
            cloud_cover_pct: self.current.as_ref().and_then(|c| c.cloud_cover),
            pressure_hpa: self.current.as_ref().and_then(|c| c.pressure),
            snow_depth_mm: self.current.as_ref().and_then(|c| c.snow_depth),
            soil_moisture: self.current.as_ref().and_then(|c| c.soil_moisture),
        }
    }

    #[must_use]
    pub fn uv_observation(&self) -> UvObservation {
        let idx = self.hourly_index();
        UvObservation {
            uv_index: self
                .hourly
                .as_ref()
                .and_then(|h| h.uv_index.as_ref())
                .and_then(|v| v.get(idx).copied().flatten()),
        }
    }

    /// Temperatures over the next 24 hours, sampled every three hours
    #[must_use]
    pub fn forecast_window(&self) -> ForecastWindow {
        let idx = self.hourly_index();
        let temperatures_c = self
            .hourly
            .as_ref()
            .and_then(|h| h.temperature.as_ref())
            .map(|temps| {
                temps
                    .iter()
                    .skip(idx)
                    .step_by(FORECAST_SAMPLE_STRIDE)
                    .take(FORECAST_SAMPLE_COUNT)
                    .filter_map(|t| *t)
                    .collect()
            })
            .unwrap_or_default();
        ForecastWindow { temperatures_c }
    }
}

impl AirQualityResponse {
    #[must_use]
    pub fn observation(&self) -> AirQualityObservation {
        AirQualityObservation {
            pm25: self.current.as_ref().and_then(|c| c.pm25),
            ozone: self.current.as_ref().and_then(|c| c.ozone),
            no2: self.current.as_ref().and_then(|c| c.no2),
        }
    }
}
