//! Resilient HTTP fetching with retry and backoff
//!
//! Every upstream call in the gateway goes through [`FetchClient`]. A call
//! retries transport failures and non-success statuses up to a fixed number
//! of additional attempts, sleeping between attempts according to the
//! backoff policy of the upstream class. A 401 is surfaced immediately as a
//! credential failure and never retried.

use std::time::Duration;

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

/// Failure modes of an upstream fetch, after retries are exhausted
#[derive(Error, Debug)]
pub enum FetchError {
    /// 401 from the provider; invalid or missing credentials, not retried
    #[error("Unauthorized (invalid credentials) from {url}")]
    Unauthorized { url: String },

    /// All attempts failed with transport errors or non-success statuses
    #[error("Upstream unavailable after {attempts} attempts: {last_error}")]
    Exhausted { attempts: u32, last_error: String },

    /// The response body could not be decoded into the expected shape
    #[error("Failed to decode upstream response: {source}")]
    Decode { source: reqwest::Error },
}

/// Delay strategy between retry attempts
#[derive(Debug, Clone, Copy)]
pub enum Backoff {
    /// `2^attempt` seconds; used for the weather and air-quality class
    Exponential,
    /// `(attempt + 1) * step`; used for the fire and alert feed class
    Progressive { step: Duration },
}

impl Backoff {
    /// Delay before retrying after the given zero-based failed attempt
    #[must_use]
    pub fn delay(&self, attempt: u32) -> Duration {
        match self {
            Backoff::Exponential => Duration::from_secs(2u64.pow(attempt)),
            Backoff::Progressive { step } => *step * (attempt + 1),
        }
    }
}

/// HTTP client with a fixed per-attempt timeout for one upstream class
#[derive(Debug, Clone)]
pub struct FetchClient {
    client: reqwest::Client,
    max_retries: u32,
    backoff: Backoff,
}

impl FetchClient {
    /// Build a client for one upstream class.
    ///
    /// `max_retries` is the number of additional attempts after the first
    /// failure; the per-attempt `timeout` is fixed for the class.
    pub fn new(timeout: Duration, max_retries: u32, backoff: Backoff) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("enviro-gateway/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            max_retries,
            backoff,
        })
    }

    /// GET a JSON payload and decode it
    pub async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let response = self.fetch(url).await?;
        response.json().await.map_err(|source| FetchError::Decode { source })
    }

    /// GET a plain-text payload (delimited feeds)
    pub async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let response = self.fetch(url).await?;
        response.text().await.map_err(|source| FetchError::Decode { source })
    }

    /// GET raw bytes (tile images)
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.fetch(url).await?;
        response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|source| FetchError::Decode { source })
    }

    async fn fetch(&self, url: &str) -> Result<reqwest::Response, FetchError> {
        let max_attempts = self.max_retries + 1;
        let mut last_error = String::new();

        for attempt in 0..max_attempts {
            debug!("API call attempt {}/{}: {}", attempt + 1, max_attempts, url);

            match self.client.get(url).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response);
                    }
                    if status.as_u16() == 401 {
                        warn!("Upstream returned 401, not retrying: {}", url);
                        return Err(FetchError::Unauthorized {
                            url: url.to_string(),
                        });
                    }
                    // 429 takes the same backoff-and-retry path as any
                    // other failing status.
                    last_error = format!("HTTP {status}");
                    warn!(
                        "Attempt {}/{} failed with {} for {}",
                        attempt + 1,
                        max_attempts,
                        status,
                        url
                    );
                }
                Err(e) => {
                    last_error = e.to_string();
                    warn!(
                        "Attempt {}/{} failed for {}: {}",
                        attempt + 1,
                        max_attempts,
                        url,
                        e
                    );
                }
            }

            if attempt + 1 < max_attempts {
                let delay = self.backoff.delay(attempt);
                debug!("Backing off {:.1}s before retry", delay.as_secs_f64());
                tokio::time::sleep(delay).await;
            }
        }

        Err(FetchError::Exhausted {
            attempts: max_attempts,
            last_error,
        })
    }
}
