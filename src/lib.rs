//! Environmental data gateway
//!
//! Fetches current weather, air quality, active fire detections and
//! severe-weather alerts from independent providers, normalizes their
//! schemas and units into one canonical record per category, and serves
//! the result as JSON.

pub mod alerts;
pub mod api;
pub mod config;
pub mod error;
pub mod fetch;
pub mod fires;
pub mod metrics;
pub mod throttle;
pub mod units;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use alerts::{Classification, GeoBounds, RegionTable, StormAlert};
pub use config::GatewayConfig;
pub use error::GatewayError;
pub use fetch::{Backoff, FetchClient, FetchError};
pub use fires::{Confidence, FireRecord};
pub use throttle::RequestThrottle;
pub use weather::{CanonicalWeatherRecord, NormalizeError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
