// Upstream Failure Injection Module
// Simulates the ways the live data provider fails so the dashboard's
// fallback and error paths can be exercised against the mock server.

use rand::Rng;

/// Configuration for failure injection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FailureConfig {
    /// Probability that the provider cannot resolve the handle (0.0-1.0)
    pub user_not_found_rate: f64,
    /// Probability that the provider call errors out (0.0-1.0)
    pub upstream_error_rate: f64,
    /// Probability that the provider answers with no media (0.0-1.0)
    pub empty_media_rate: f64,
}

impl FailureConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config with no failures (for normal operation)
    pub fn none() -> Self {
        Self::default()
    }

    /// Create a config for an unreliable provider
    pub fn flaky() -> Self {
        Self {
            user_not_found_rate: 0.05,
            upstream_error_rate: 0.1,
            empty_media_rate: 0.05,
        }
    }

    pub fn with_user_not_found_rate(mut self, rate: f64) -> Self {
        self.user_not_found_rate = rate.clamp(0.0, 1.0);
        self
    }

    pub fn with_upstream_error_rate(mut self, rate: f64) -> Self {
        self.upstream_error_rate = rate.clamp(0.0, 1.0);
        self
    }

    pub fn with_empty_media_rate(mut self, rate: f64) -> Self {
        self.empty_media_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Get the total probability of any failure occurring
    pub fn total_failure_rate(&self) -> f64 {
        (self.user_not_found_rate + self.upstream_error_rate + self.empty_media_rate).min(1.0)
    }
}

/// Kinds of simulated provider failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulatedFailure {
    /// Handle lookup returned no user (HTTP 404)
    UserNotFound,
    /// Provider request failed (HTTP 500)
    UpstreamError,
    /// Provider answered, but with zero media items
    EmptyMedia,
}

impl SimulatedFailure {
    /// HTTP status a media route answers with for this failure
    pub fn status_code(&self) -> u16 {
        match self {
            SimulatedFailure::UserNotFound => 404,
            SimulatedFailure::UpstreamError => 500,
            SimulatedFailure::EmptyMedia => 200,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SimulatedFailure::UserNotFound => "user_not_found",
            SimulatedFailure::UpstreamError => "upstream_error",
            SimulatedFailure::EmptyMedia => "empty_media",
        }
    }
}

/// Decides per request whether the provider "fails".
///
/// Uses the thread RNG, never the content stream, so injected failures do not
/// disturb generated data.
pub struct FailureInjector {
    config: FailureConfig,
}

impl FailureInjector {
    pub fn new(config: FailureConfig) -> Self {
        Self { config }
    }

    /// Returns None if no failure should be injected
    pub fn maybe_inject(&self) -> Option<SimulatedFailure> {
        if !self.is_enabled() {
            return None;
        }

        let roll: f64 = rand::rng().random();
        let mut threshold = 0.0;

        threshold += self.config.user_not_found_rate;
        if roll < threshold {
            return Some(SimulatedFailure::UserNotFound);
        }

        threshold += self.config.upstream_error_rate;
        if roll < threshold {
            return Some(SimulatedFailure::UpstreamError);
        }

        threshold += self.config.empty_media_rate;
        if roll < threshold {
            return Some(SimulatedFailure::EmptyMedia);
        }

        None
    }

    /// Check if failure injection is enabled (any rate > 0)
    pub fn is_enabled(&self) -> bool {
        self.config.total_failure_rate() > 0.0
    }
}

impl Default for FailureInjector {
    fn default() -> Self {
        Self::new(FailureConfig::default())
    }
}
