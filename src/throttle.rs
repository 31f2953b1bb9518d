//! Process-wide minimum-interval gate for the weather provider
//!
//! The unauthenticated tier of the weather provider tolerates roughly one
//! request every 1.5 seconds. All weather requests funnel through a single
//! [`RequestThrottle`]; fires and alerts are not throttled.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

/// Shared minimum-interval gate.
///
/// The last-admission timestamp is the only cross-request mutable state in
/// the gateway. The mutex is held across the sleep so concurrent callers
/// are admitted strictly one interval apart; releasing it before sleeping
/// would let two callers observe the same stale timestamp.
#[derive(Debug)]
pub struct RequestThrottle {
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl RequestThrottle {
    #[must_use]
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: Mutex::new(None),
        }
    }

    /// Block until at least `min_interval` has elapsed since the previous
    /// admission, then record this call as the new last admission.
    pub async fn wait(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                let sleep_for = self.min_interval - elapsed;
                debug!("Rate limiting: sleeping {:.2}s", sleep_for.as_secs_f64());
                tokio::time::sleep(sleep_for).await;
            }
        }
        *last = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_first_call_is_immediate() {
        let throttle = RequestThrottle::new(Duration::from_secs(10));
        let start = Instant::now();
        throttle.wait().await;
        assert!(start.elapsed() < Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_sequential_calls_are_spaced() {
        let throttle = RequestThrottle::new(Duration::from_millis(100));
        let start = Instant::now();
        throttle.wait().await;
        throttle.wait().await;
        assert!(start.elapsed() >= Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_concurrent_callers_serialize() {
        let throttle = Arc::new(RequestThrottle::new(Duration::from_millis(100)));

        let a = {
            let throttle = Arc::clone(&throttle);
            tokio::spawn(async move {
                throttle.wait().await;
                Instant::now()
            })
        };
        let b = {
            let throttle = Arc::clone(&throttle);
            tokio::spawn(async move {
                throttle.wait().await;
                Instant::now()
            })
        };

        let (first, second) = (a.await.unwrap(), b.await.unwrap());
        let gap = if second > first {
            second - first
        } else {
            first - second
        };
        assert!(
            gap >= Duration::from_millis(100),
            "admissions only {gap:?} apart"
        );
    }
}
