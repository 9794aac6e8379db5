//! Politeness limiter
//!
//! Spaces consecutive outbound requests of one job by at least the
//! configured delay, measured between request starts. A job owns exactly one
//! limiter, and listing, discovery and enrichment requests all go through it.

use std::time::{Duration, Instant};

/// Start-to-start request spacing for a single job
#[derive(Debug)]
pub struct PoliteLimiter {
    delay: Duration,
    last_request: Option<Instant>,
}

impl PoliteLimiter {
    /// Creates a limiter enforcing the given minimum spacing
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_request: None,
        }
    }

    /// Builds a limiter from a delay in seconds
    ///
    /// NaN and negative values are treated as zero. Values too large for a
    /// `Duration` saturate.
    pub fn from_secs_f64(delay_s: f64) -> Self {
        let delay = if delay_s.is_nan() || delay_s <= 0.0 {
            Duration::ZERO
        } else {
            Duration::try_from_secs_f64(delay_s).unwrap_or(Duration::MAX)
        };
        Self::new(delay)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Returns how long a request starting at `now` must still wait
    pub fn time_until_next_request(&self, now: Instant) -> Option<Duration> {
        let last = self.last_request?;
        let elapsed = now.saturating_duration_since(last);
        (elapsed < self.delay).then(|| self.delay - elapsed)
    }

    /// Waits until the next request may start, then records its start
    ///
    /// The first request of a job never waits.
    pub async fn wait(&mut self) {
        if let Some(wait) = self.time_until_next_request(Instant::now()) {
            tracing::trace!("Polite delay: waiting {:?}", wait);
            tokio::time::sleep(wait).await;
        }
        self.last_request = Some(Instant::now());
    }
}
