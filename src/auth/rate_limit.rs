use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed,
    Limited,
}

/// In-process fixed-window counter keyed by client address. Gates the login
/// endpoint independently of the per-account lockout: one throttle per IP,
/// one per account.
#[derive(Clone)]
pub struct FixedWindowLimiter {
    max: u32,
    window: Duration,
    buckets: Arc<Mutex<HashMap<String, Bucket>>>,
}

struct Bucket {
    window_start: Instant,
    count: u32,
}

impl FixedWindowLimiter {
    pub fn new(max: u32, window: Duration) -> Self {
        Self {
            max,
            window,
            buckets: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn check(&self, key: &str) -> RateLimitDecision {
        let now = Instant::now();
        let mut buckets = match self.buckets.lock() {
            Ok(guard) => guard,
            // Counters stay usable after a panic in another holder.
            Err(poisoned) => poisoned.into_inner(),
        };

        // Dropping every lapsed bucket here keeps the map bounded by the
        // number of distinct clients seen in one window.
        buckets.retain(|_, bucket| now.duration_since(bucket.window_start) < self.window);

        let bucket = buckets.entry(key.to_string()).or_insert(Bucket {
            window_start: now,
            count: 0,
        });

        if bucket.count >= self.max {
            return RateLimitDecision::Limited;
        }

        bucket.count += 1;
        RateLimitDecision::Allowed
    }
}
