//! TMDB API rate limiter.

use std::collections::VecDeque;
use std::time::Duration;

use tokio::time::Instant;

/// Default maximum number of requests per window.
pub(crate) const DEFAULT_MAX_REQUESTS: usize = 30;

/// Default sliding window length.
pub(crate) const DEFAULT_WINDOW: Duration = Duration::from_secs(10);

/// Sliding-window rate limiter.
///
/// Admits at most `max_requests` requests within any rolling `window`.
/// Callers that would exceed the cap are delayed until the oldest tracked
/// request leaves the window; throttling never surfaces as an error.
#[derive(Debug)]
pub struct SlidingWindowLimiter {
    /// Maximum number of requests per window.
    max_requests: usize,
    /// Window length.
    window: Duration,
    /// Dispatch timestamps, oldest first. Never longer than `max_requests`.
    timestamps: VecDeque<Instant>,
}

impl SlidingWindowLimiter {
    /// Creates a new limiter admitting `max_requests` per `window`.
    ///
    /// A `max_requests` of zero is treated as one. The timestamp buffer
    /// grows on demand, so large limits allocate nothing up front.
    #[must_use]
    pub fn new(max_requests: usize, window: Duration) -> Self {
        let max_requests = max_requests.max(1);
        Self {
            max_requests,
            window,
            timestamps: VecDeque::new(),
        }
    }

    /// Waits until the next request is allowed, then records it.
    #[allow(clippy::arithmetic_side_effects)]
    pub async fn wait(&mut self) {
        loop {
            let now = Instant::now();
            self.evict_expired(now);

            if self.timestamps.len() < self.max_requests {
                break;
            }

            let Some(&oldest) = self.timestamps.front() else {
                break;
            };
            let wait_until = oldest + self.window;
            if now < wait_until {
                tracing::debug!(
                    delay_ms = (wait_until - now).as_millis(),
                    in_window = self.timestamps.len(),
                    "TMDB request throttled"
                );
                tokio::time::sleep_until(wait_until).await;
            }
        }

        self.timestamps.push_back(Instant::now());
    }

    /// Removes timestamps that have left the window.
    fn evict_expired(&mut self, now: Instant) {
        while self
            .timestamps
            .front()
            .is_some_and(|&t| now.saturating_duration_since(t) >= self.window)
        {
            self.timestamps.pop_front();
        }
    }
}
