// Application State Module

use super::config::Config;
use crate::errors::FailureInjector;
use crate::generator::{ContentSource, SimulatedSource};
use crate::stats::SharedStats;
use std::sync::Arc;

/// Shared application state
pub struct AppState {
    pub stats: SharedStats,
    pub source: Arc<dyn ContentSource>,
    pub injector: FailureInjector,
}

impl AppState {
    pub fn new(config: &Config, stats: SharedStats) -> Self {
        Self {
            stats,
            source: Arc::new(SimulatedSource::new()),
            injector: FailureInjector::new(config.failure_config()),
        }
    }
}
