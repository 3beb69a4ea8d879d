use std::time::Instant;
use tokio::time::{interval, Duration};

use crate::limiter::fixed_window::FixedWindowLimiter;

/// Periodically drops rate-limit windows that have already elapsed, so the
/// map only holds clients seen within the last window.
pub async fn start_limiter_purge_task(limiter: FixedWindowLimiter, every: Duration) {
    let mut interval = interval(every);

    loop {
        interval.tick().await;

        let removed = limiter.purge_expired(Instant::now());
        if removed > 0 {
            tracing::debug!(removed, remaining = limiter.len(), "Purged expired rate-limit windows");
        }
    }
}
