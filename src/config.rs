//! Configuration for the gateway
//!
//! All settings come from environment variables. Provider credentials are
//! optional at startup; endpoints that need one fail with a descriptive 500
//! at request time when it is absent.

use std::env;
use std::time::Duration;

use crate::error::GatewayError;

/// Minimum spacing between weather-provider requests (unauthenticated tier).
pub const MIN_WEATHER_REQUEST_INTERVAL: Duration = Duration::from_millis(1500);

/// Per-attempt timeout for the weather and air-quality providers.
pub const WEATHER_TIMEOUT: Duration = Duration::from_secs(10);

/// Per-attempt timeout for the fire-detection and alert feeds.
pub const FEED_TIMEOUT: Duration = Duration::from_secs(20);

/// Additional attempts after the first failed one.
pub const MAX_RETRIES: u32 = 2;

/// Runtime configuration loaded from the environment
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Port the HTTP server listens on
    pub port: u16,
    /// OpenWeatherMap key, required for the raw tile proxy
    pub openweathermap_api_key: Option<String>,
    /// Google Maps key, required for the geocoding pass-through
    pub google_maps_api_key: Option<String>,
    /// NASA FIRMS map key, required for the fire-detection feed
    pub firms_map_key: Option<String>,
    /// Directory of static frontend files
    pub static_dir: String,
}

impl GatewayConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(5000);

        Self {
            port,
            openweathermap_api_key: non_empty(env::var("OPENWEATHERMAP_API_KEY").ok()),
            google_maps_api_key: non_empty(env::var("GOOGLE_MAPS_API_KEY").ok()),
            firms_map_key: non_empty(env::var("FIRMS_MAP_KEY").ok()),
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string()),
        }
    }

    /// Tile-proxy credential, or a descriptive configuration error
    pub fn require_openweathermap_key(&self) -> Result<&str, GatewayError> {
        self.openweathermap_api_key.as_deref().ok_or_else(|| {
            GatewayError::config("OPENWEATHERMAP_API_KEY not set; required for weather tiles")
        })
    }

    /// Geocoding credential, or a descriptive configuration error
    pub fn require_google_maps_key(&self) -> Result<&str, GatewayError> {
        self.google_maps_api_key.as_deref().ok_or_else(|| {
            GatewayError::config("GOOGLE_MAPS_API_KEY not set; required for geocoding")
        })
    }

    /// Fire-feed credential, or a descriptive configuration error
    pub fn require_firms_key(&self) -> Result<&str, GatewayError> {
        self.firms_map_key.as_deref().ok_or_else(|| {
            GatewayError::config("FIRMS_MAP_KEY not set; required for fire detections")
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
