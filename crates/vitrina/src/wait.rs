//! Polling wait primitives.
//!
//! All waiting in Vitrina goes through [`wait_until`]: a fixed-interval poll
//! up to a fixed timeout. There is no cancellation and no retry on top of it;
//! a timed-out wait surfaces as a terminal scenario failure at the caller.

use std::future::Future;
use std::time::{Duration, Instant};

use crate::locator::{DEFAULT_POLL_INTERVAL_MS, DEFAULT_TIMEOUT_MS};
use crate::result::VitrinaResult;

/// Options for wait operations
#[derive(Debug, Clone)]
pub struct WaitOptions {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitOptions {
    /// Create wait options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set polling interval in milliseconds
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Get timeout as Duration
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get poll interval as Duration
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Poll `condition` until it reports `true` or the timeout expires.
///
/// Returns `Ok(true)` on success and `Ok(false)` on timeout; the caller
/// decides which error the timeout maps to (element lookup vs. page ready).
/// Condition errors propagate immediately.
///
/// # Errors
///
/// Returns the first error produced by `condition`.
pub async fn wait_until<F, Fut>(options: &WaitOptions, mut condition: F) -> VitrinaResult<bool>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = VitrinaResult<bool>>,
{
    let deadline = Instant::now() + options.timeout();
    loop {
        if condition().await? {
            return Ok(true);
        }
        if Instant::now() >= deadline {
            return Ok(false);
        }
        tokio::time::sleep(options.poll_interval()).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::VitrinaError;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_default_options() {
        let opts = WaitOptions::default();
        assert_eq!(opts.timeout_ms, 10_000);
        assert_eq!(opts.poll_interval_ms, 250);
    }

    #[test]
    fn test_builder() {
        let opts = WaitOptions::new().with_timeout(500).with_poll_interval(10);
        assert_eq!(opts.timeout(), Duration::from_millis(500));
        assert_eq!(opts.poll_interval(), Duration::from_millis(10));
    }

    #[tokio::test]
    async fn test_immediate_success() {
        let opts = WaitOptions::new().with_timeout(100).with_poll_interval(10);
        let result = wait_until(&opts, || async { Ok(true) }).await.unwrap();
        assert!(result);
    }

    #[tokio::test]
    async fn test_success_after_polls() {
        let opts = WaitOptions::new().with_timeout(1_000).with_poll_interval(1);
        let calls = AtomicU32::new(0);
        let result = wait_until(&opts, || async {
            Ok(calls.fetch_add(1, Ordering::SeqCst) >= 3)
        })
        .await
        .unwrap();
        assert!(result);
        assert!(calls.load(Ordering::SeqCst) >= 4);
    }

    #[tokio::test]
    async fn test_timeout_returns_false() {
        let opts = WaitOptions::new().with_timeout(20).with_poll_interval(5);
        let result = wait_until(&opts, || async { Ok(false) }).await.unwrap();
        assert!(!result);
    }

    #[tokio::test]
    async fn test_condition_error_propagates() {
        let opts = WaitOptions::new().with_timeout(100).with_poll_interval(10);
        let result = wait_until(&opts, || async {
            Err(VitrinaError::Script {
                message: "boom".to_string(),
            })
        })
        .await;
        assert!(matches!(result, Err(VitrinaError::Script { .. })));
    }
}
