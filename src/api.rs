//! HTTP API handlers
//!
//! One handler per category. Each request flows throttle → fetch →
//! normalize and builds its response from scratch; nothing is cached
//! across requests.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::alerts::{AlertsResponse, CONTINENTAL_US, RegionTable, StormAlert};
use crate::config::{self, GatewayConfig};
use crate::error::GatewayError;
use crate::fetch::{Backoff, FetchClient};
use crate::fires::{self, FireRecord};
use crate::throttle::RequestThrottle;
use crate::weather::{self, CanonicalWeatherRecord, open_meteo};

const FIRES_SOURCE: &str = "NASA FIRMS VIIRS";
const STORMS_SOURCE: &str = "NWS Active Alerts";

/// Shared per-process state; the throttle is the only mutable part
pub struct AppState {
    pub config: GatewayConfig,
    /// Weather/air-quality class: 10 s timeout, exponential backoff
    pub weather_client: FetchClient,
    /// Fire/alert feed class: 20 s timeout, progressive backoff
    pub feed_client: FetchClient,
    pub throttle: RequestThrottle,
    pub regions: RegionTable,
}

impl AppState {
    pub fn new(config: GatewayConfig) -> anyhow::Result<Self> {
        let weather_client = FetchClient::new(
            config::WEATHER_TIMEOUT,
            config::MAX_RETRIES,
            Backoff::Exponential,
        )?;
        let feed_client = FetchClient::new(
            config::FEED_TIMEOUT,
            config::MAX_RETRIES,
            Backoff::Progressive {
                step: std::time::Duration::from_secs(2),
            },
        )?;
        Ok(Self {
            config,
            weather_client,
            feed_client,
            throttle: RequestThrottle::new(config::MIN_WEATHER_REQUEST_INTERVAL),
            regions: RegionTable::default(),
        })
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/weather", get(get_weather))
        .route("/fires", get(get_fires))
        .route("/storms", get(get_storms))
        .route("/geocode", get(get_geocode))
        .route("/weather-tiles/{layer}/{z}/{x}/{y}", get(get_weather_tile))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct WeatherQuery {
    lat: Option<f64>,
    lon: Option<f64>,
}

async fn get_weather(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WeatherQuery>,
) -> Result<Json<CanonicalWeatherRecord>, GatewayError> {
    let lat = query.lat.ok_or(GatewayError::missing_parameter("lat"))?;
    let lon = query.lon.ok_or(GatewayError::missing_parameter("lon"))?;

    info!("Fetching weather for {:.4}, {:.4}", lat, lon);
    state.throttle.wait().await;

    let forecast_url = open_meteo::forecast_url(lat, lon);
    let air_quality_url = open_meteo::air_quality_url(lat, lon);

    // Both fetches run concurrently and both settle before normalization.
    let (forecast, air_quality) = tokio::join!(
        state
            .weather_client
            .fetch_json::<open_meteo::ForecastResponse>(&forecast_url),
        state
            .weather_client
            .fetch_json::<open_meteo::AirQualityResponse>(&air_quality_url),
    );

    // The forecast payload carries the mandatory fields; its failure fails
    // the request. Air quality degrades to the documented defaults.
    let forecast = forecast?;
    let air = match air_quality {
        Ok(response) => response.observation(),
        Err(e) => {
            warn!("Air-quality feed unavailable, serving defaults: {}", e);
            weather::AirQualityObservation::default()
        }
    };

    let record = weather::normalize(
        &forecast.current_observation(),
        Some(&forecast.forecast_window()),
        &forecast.uv_observation(),
        &air,
    )?;
    Ok(Json(record))
}

#[derive(Debug, Serialize)]
struct FiresResponse {
    fires: Vec<FireRecord>,
    count: usize,
    source: &'static str,
    last_updated: String,
}

async fn get_fires(
    State(state): State<Arc<AppState>>,
) -> Result<Json<FiresResponse>, GatewayError> {
    let key = state.config.require_firms_key()?;
    let url = format!(
        "https://firms.modaps.eosdis.nasa.gov/api/area/csv/{key}/VIIRS_SNPP_NRT/{},{},{},{}/1",
        fires::CONUS_LON.0,
        fires::CONUS_LAT.0,
        fires::CONUS_LON.1,
        fires::CONUS_LAT.1,
    );

    let served = match state.feed_client.fetch_text(&url).await {
        Ok(feed) => {
            // Serving policy: continental box, high confidence only.
            let records: Vec<FireRecord> = fires::parse(&feed)
                .into_iter()
                .filter(FireRecord::in_continental_us)
                .filter(FireRecord::is_high_confidence)
                .collect();
            info!("Serving {} fire detections", records.len());
            records
        }
        Err(e) => {
            warn!("Fire feed unavailable, serving empty list: {}", e);
            Vec::new()
        }
    };

    Ok(Json(FiresResponse {
        count: served.len(),
        fires: served,
        source: FIRES_SOURCE,
        last_updated: Utc::now().to_rfc3339(),
    }))
}

#[derive(Debug, Serialize)]
struct StormsResponse {
    warnings: Vec<StormAlert>,
    total_alerts: usize,
    filtered_count: usize,
    timestamp: String,
    source: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

async fn get_storms(State(state): State<Arc<AppState>>) -> Json<StormsResponse> {
    let url = "https://api.weather.gov/alerts/active";

    let (warnings, total_alerts, error) = match state
        .feed_client
        .fetch_json::<AlertsResponse>(url)
        .await
    {
        Ok(response) => {
            let total = response.features.len();
            let warnings: Vec<StormAlert> = response
                .features
                .into_iter()
                .filter_map(|f| StormAlert::from_feature(f, &CONTINENTAL_US, &state.regions))
                .collect();
            info!("Retained {}/{} alerts", warnings.len(), total);
            (warnings, total, None)
        }
        Err(e) => {
            // Alerts degrade rather than failing the request.
            warn!("Alert feed unavailable, serving empty list: {}", e);
            (Vec::new(), 0, Some(e.to_string()))
        }
    };

    Json(StormsResponse {
        filtered_count: warnings.len(),
        warnings,
        total_alerts,
        timestamp: Utc::now().to_rfc3339(),
        source: STORMS_SOURCE,
        error,
    })
}

#[derive(Debug, Deserialize)]
struct GeocodeQuery {
    address: Option<String>,
}

async fn get_geocode(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GeocodeQuery>,
) -> Result<Json<Value>, GatewayError> {
    let address = query
        .address
        .filter(|a| !a.trim().is_empty())
        .ok_or(GatewayError::missing_parameter("address"))?;
    let key = state.config.require_google_maps_key()?;

    let url = format!(
        "https://maps.googleapis.com/maps/api/geocode/json?address={}&components=country:US&key={key}",
        urlencoding::encode(&address)
    );
    let payload: Value = state.weather_client.fetch_json(&url).await?;
    Ok(Json(payload))
}

async fn get_weather_tile(
    State(state): State<Arc<AppState>>,
    Path((layer, z, x, y)): Path<(String, u32, u32, String)>,
) -> Result<Response, GatewayError> {
    let key = state.config.require_openweathermap_key()?;
    let y = y.strip_suffix(".png").unwrap_or(&y);

    let url =
        format!("https://tile.openweathermap.org/map/{layer}/{z}/{x}/{y}.png?appid={key}");
    let tile = state.feed_client.fetch_bytes(&url).await?;

    Ok(([(header::CONTENT_TYPE, "image/png")], tile).into_response())
}
