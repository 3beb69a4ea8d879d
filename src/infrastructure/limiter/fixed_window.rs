use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use dashmap::{mapref::entry::Entry, DashMap};

/// Counter for one client within its current window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateLimitEntry {
    pub count: u32,
    pub reset_at: Instant,
}

impl RateLimitEntry {
    fn open(now: Instant, window: Duration) -> Self {
        Self {
            count: 1,
            reset_at: now + window,
        }
    }

    fn is_expired(&self, now: Instant) -> bool {
        now > self.reset_at
    }
}

/// Fixed-window request counter keyed by client.
///
/// A window opens with the first request from a key and lasts `window`.
/// At most `max` requests are allowed inside it. Check-and-increment runs
/// under the entry's shard lock, so concurrent workers never over-admit.
/// State is process-local and lost on restart.
#[derive(Clone)]
pub struct FixedWindowLimiter {
    map: Arc<DashMap<String, RateLimitEntry>>,
    max: u32,
    window: Duration,
}

impl FixedWindowLimiter {
    pub fn new(max: u32, window: Duration) -> Self {
        Self {
            map: Arc::new(DashMap::new()),
            max,
            window,
        }
    }

    pub fn check(&self, key: &str) -> bool {
        self.check_at(key, Instant::now())
    }

    pub fn check_at(&self, key: &str, now: Instant) -> bool {
        match self.map.entry(key.to_string()) {
            Entry::Vacant(vacant) => {
                vacant.insert(RateLimitEntry::open(now, self.window));
                true
            }
            Entry::Occupied(mut occupied) => {
                let entry = occupied.get_mut();
                if entry.is_expired(now) {
                    *entry = RateLimitEntry::open(now, self.window);
                    true
                } else if entry.count >= self.max {
                    false
                } else {
                    entry.count += 1;
                    true
                }
            }
        }
    }

    /// Drops entries whose window has elapsed. Returns how many were removed.
    pub fn purge_expired(&self, now: Instant) -> usize {
        let before = self.map.len();
        self.map.retain(|_, entry| !entry.is_expired(now));
        before.saturating_sub(self.map.len())
    }

    pub fn entry(&self, key: &str) -> Option<RateLimitEntry> {
        self.map.get(key).map(|e| *e.value())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter() -> FixedWindowLimiter {
        FixedWindowLimiter::new(5, Duration::from_secs(60))
    }

    #[test]
    fn allows_max_then_denies() {
        let limiter = limiter();
        let start = Instant::now();

        for i in 0..5 {
            assert!(limiter.check_at("1.2.3.4", start + Duration::from_secs(i)));
        }
        assert!(!limiter.check_at("1.2.3.4", start + Duration::from_secs(10)));
    }

    #[test]
    fn denial_does_not_mutate_entry() {
        let limiter = limiter();
        let start = Instant::now();

        for _ in 0..6 {
            limiter.check_at("k", start);
        }
        let entry = limiter.entry("k").unwrap();
        assert_eq!(entry.count, 5);
        assert_eq!(entry.reset_at, start + Duration::from_secs(60));
    }

    #[test]
    fn window_reopens_only_after_reset_time() {
        let limiter = limiter();
        let start = Instant::now();

        for _ in 0..5 {
            assert!(limiter.check_at("k", start));
        }
        // reset_at itself is still inside the window
        assert!(!limiter.check_at("k", start + Duration::from_secs(60)));
        assert!(limiter.check_at("k", start + Duration::from_secs(61)));
        assert_eq!(limiter.entry("k").unwrap().count, 1);
    }

    #[test]
    fn keys_have_independent_quotas() {
        let limiter = limiter();
        let now = Instant::now();

        for _ in 0..5 {
            assert!(limiter.check_at("a", now));
        }
        assert!(!limiter.check_at("a", now));
        assert!(limiter.check_at("b", now));
    }

    #[test]
    fn purge_removes_only_elapsed_windows() {
        let limiter = limiter();
        let start = Instant::now();

        limiter.check_at("old", start);
        limiter.check_at("fresh", start + Duration::from_secs(30));

        let removed = limiter.purge_expired(start + Duration::from_secs(61));
        assert_eq!(removed, 1);
        assert!(limiter.entry("old").is_none());
        assert!(limiter.entry("fresh").is_some());
    }

    #[test]
    fn concurrent_checks_never_over_admit() {
        let limiter = limiter();
        let now = Instant::now();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let limiter = limiter.clone();
                std::thread::spawn(move || (0..10).filter(|_| limiter.check_at("shared", now)).count())
            })
            .collect();

        let allowed: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(allowed, 5);
    }
}
