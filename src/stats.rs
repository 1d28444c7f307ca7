//! Statistics module for tracking real-time metrics.
//!
//! This module provides thread-safe atomic counters and statistics
//! collection for monitoring the FeedSim server.

use crate::errors::SimulatedFailure;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

/// Relaxed ordering for stats - we don't need strict ordering guarantees
const ORDERING: Ordering = Ordering::Relaxed;

/// Distinct handles tracked individually; later handles share `OTHER_HANDLES`
pub const MAX_TRACKED_HANDLES: usize = 10_000;

/// Bucket for requests whose handle arrived after the map filled up
pub const OTHER_HANDLES: &str = "(other)";

/// Resource served by a mock endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// /api/profile
    Profile,
    /// /api/posts
    Posts,
    /// /api/reels
    Reels,
    /// /api/analytics
    Analytics,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Profile => "profile",
            ResourceKind::Posts => "posts",
            ResourceKind::Reels => "reels",
            ResourceKind::Analytics => "analytics",
        }
    }
}

/// Global statistics tracker for the FeedSim server.
#[derive(Debug)]
pub struct Stats {
    /// Server start time
    start_time: Instant,

    // Request counters
    /// Total number of requests received
    pub total_requests: AtomicU64,
    /// Currently active (in-flight) requests
    pub active_requests: AtomicU64,
    /// Requests that arrived without a handle
    pub empty_handle_requests: AtomicU64,
    pub profile_requests: AtomicU64,
    pub posts_requests: AtomicU64,
    pub reels_requests: AtomicU64,
    pub analytics_requests: AtomicU64,

    /// Profile requests answered from the simulator after a provider failure
    pub fallbacks: AtomicU64,

    // Failure counters
    /// Total injected failures surfaced to the client
    pub total_failures: AtomicU64,
    /// User-not-found failures (404)
    pub not_found_failures: AtomicU64,
    /// Upstream failures (500)
    pub upstream_failures: AtomicU64,
    /// Empty-media answers
    pub empty_media_failures: AtomicU64,

    // Per-handle request counts, bounded by MAX_TRACKED_HANDLES
    handle_requests: RwLock<HashMap<String, u64>>,

    // Latency tracking (in microseconds)
    /// Total latency for calculating average
    total_latency_us: AtomicU64,
    /// Count of completed requests (for average calculation)
    completed_requests: AtomicU64,
    /// Minimum latency seen
    min_latency_us: AtomicU64,
    /// Maximum latency seen
    max_latency_us: AtomicU64,

    // Rolling window for RPS calculation
    request_times: RwLock<Vec<Instant>>,
}

impl Default for Stats {
    fn default() -> Self {
        Self::new()
    }
}

impl Stats {
    /// Create a new Stats instance
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            total_requests: AtomicU64::new(0),
            active_requests: AtomicU64::new(0),
            empty_handle_requests: AtomicU64::new(0),
            profile_requests: AtomicU64::new(0),
            posts_requests: AtomicU64::new(0),
            reels_requests: AtomicU64::new(0),
            analytics_requests: AtomicU64::new(0),
            fallbacks: AtomicU64::new(0),
            total_failures: AtomicU64::new(0),
            not_found_failures: AtomicU64::new(0),
            upstream_failures: AtomicU64::new(0),
            empty_media_failures: AtomicU64::new(0),
            handle_requests: RwLock::new(HashMap::new()),
            total_latency_us: AtomicU64::new(0),
            completed_requests: AtomicU64::new(0),
            min_latency_us: AtomicU64::new(u64::MAX),
            max_latency_us: AtomicU64::new(0),
            request_times: RwLock::new(Vec::new()),
        }
    }

    /// Record the start of a new request. `handle` is None when the client
    /// supplied no username.
    pub fn record_request_start(&self, kind: ResourceKind, handle: Option<&str>) {
        self.total_requests.fetch_add(1, ORDERING);
        self.active_requests.fetch_add(1, ORDERING);

        match kind {
            ResourceKind::Profile => self.profile_requests.fetch_add(1, ORDERING),
            ResourceKind::Posts => self.posts_requests.fetch_add(1, ORDERING),
            ResourceKind::Reels => self.reels_requests.fetch_add(1, ORDERING),
            ResourceKind::Analytics => self.analytics_requests.fetch_add(1, ORDERING),
        };

        match handle {
            Some(handle) => {
                if let Ok(mut map) = self.handle_requests.write() {
                    let key = if map.contains_key(handle) || map.len() < MAX_TRACKED_HANDLES {
                        handle
                    } else {
                        OTHER_HANDLES
                    };
                    *map.entry(key.to_string()).or_insert(0) += 1;
                }
            }
            None => {
                self.empty_handle_requests.fetch_add(1, ORDERING);
            }
        }

        // Add to rolling window
        if let Ok(mut times) = self.request_times.write() {
            times.push(Instant::now());
            // Keep only last 60 seconds of requests
            let cutoff = Instant::now() - Duration::from_secs(60);
            times.retain(|t| *t > cutoff);
        }
    }

    /// Record the completion of a request
    pub fn record_request_end(&self, latency: Duration) {
        self.active_requests.fetch_sub(1, ORDERING);
        self.completed_requests.fetch_add(1, ORDERING);

        let latency_us = latency.as_micros() as u64;
        self.total_latency_us.fetch_add(latency_us, ORDERING);
        self.min_latency_us.fetch_min(latency_us, ORDERING);
        self.max_latency_us.fetch_max(latency_us, ORDERING);
    }

    /// Record a profile served from the simulator after a provider failure
    pub fn record_fallback(&self) {
        self.fallbacks.fetch_add(1, ORDERING);
    }

    /// Record a request that ended in an injected failure
    pub fn record_failure(&self, failure: SimulatedFailure) {
        self.total_failures.fetch_add(1, ORDERING);
        self.active_requests.fetch_sub(1, ORDERING);

        match failure {
            SimulatedFailure::UserNotFound => {
                self.not_found_failures.fetch_add(1, ORDERING);
            }
            SimulatedFailure::UpstreamError => {
                self.upstream_failures.fetch_add(1, ORDERING);
            }
            SimulatedFailure::EmptyMedia => {
                self.empty_media_failures.fetch_add(1, ORDERING);
            }
        }
    }

    /// Get the uptime of the server
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Get requests per second (over the last 60 seconds)
    pub fn requests_per_second(&self) -> f64 {
        if let Ok(times) = self.request_times.read() {
            let now = Instant::now();
            let cutoff = now - Duration::from_secs(60);
            let recent: Vec<&Instant> = times.iter().filter(|t| **t > cutoff).collect();

            if let Some(oldest) = recent.iter().min() {
                let window = now.duration_since(**oldest).as_secs_f64();
                if window > 0.0 {
                    return recent.len() as f64 / window;
                }
            }
        }
        0.0
    }

    /// Get average latency in milliseconds
    pub fn avg_latency_ms(&self) -> f64 {
        let completed = self.completed_requests.load(ORDERING);
        if completed == 0 {
            return 0.0;
        }
        let total_us = self.total_latency_us.load(ORDERING);
        (total_us as f64 / completed as f64) / 1000.0
    }

    /// Get minimum latency in milliseconds
    pub fn min_latency_ms(&self) -> Option<f64> {
        let min = self.min_latency_us.load(ORDERING);
        if min == u64::MAX {
            None
        } else {
            Some(min as f64 / 1000.0)
        }
    }

    /// Get maximum latency in milliseconds
    pub fn max_latency_ms(&self) -> Option<f64> {
        let max = self.max_latency_us.load(ORDERING);
        if max == 0 {
            None
        } else {
            Some(max as f64 / 1000.0)
        }
    }

    /// Get per-handle request counts
    pub fn handle_requests(&self) -> HashMap<String, u64> {
        self.handle_requests
            .read()
            .map(|m| m.clone())
            .unwrap_or_default()
    }

    /// Get a snapshot of all stats for serialization
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            uptime_secs: self.uptime().as_secs(),
            total_requests: self.total_requests.load(ORDERING),
            active_requests: self.active_requests.load(ORDERING),
            empty_handle_requests: self.empty_handle_requests.load(ORDERING),
            profile_requests: self.profile_requests.load(ORDERING),
            posts_requests: self.posts_requests.load(ORDERING),
            reels_requests: self.reels_requests.load(ORDERING),
            analytics_requests: self.analytics_requests.load(ORDERING),
            fallbacks: self.fallbacks.load(ORDERING),
            total_failures: self.total_failures.load(ORDERING),
            not_found_failures: self.not_found_failures.load(ORDERING),
            upstream_failures: self.upstream_failures.load(ORDERING),
            empty_media_failures: self.empty_media_failures.load(ORDERING),
            requests_per_second: self.requests_per_second(),
            avg_latency_ms: self.avg_latency_ms(),
            min_latency_ms: self.min_latency_ms(),
            max_latency_ms: self.max_latency_ms(),
            handle_requests: self.handle_requests(),
        }
    }
}

/// A serializable snapshot of statistics
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct StatsSnapshot {
    pub uptime_secs: u64,
    pub total_requests: u64,
    pub active_requests: u64,
    pub empty_handle_requests: u64,
    pub profile_requests: u64,
    pub posts_requests: u64,
    pub reels_requests: u64,
    pub analytics_requests: u64,
    pub fallbacks: u64,
    pub total_failures: u64,
    pub not_found_failures: u64,
    pub upstream_failures: u64,
    pub empty_media_failures: u64,
    pub requests_per_second: f64,
    pub avg_latency_ms: f64,
    pub min_latency_ms: Option<f64>,
    pub max_latency_ms: Option<f64>,
    pub handle_requests: HashMap<String, u64>,
}

/// Shared stats handle for use across threads
pub type SharedStats = Arc<Stats>;

/// Create a new shared stats instance
pub fn new_shared_stats() -> SharedStats {
    Arc::new(Stats::new())
}
