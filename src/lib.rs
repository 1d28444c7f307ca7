//! # FeedSim - Social Feed Simulator
//!
//! Deterministic stand-in for a social-media data provider. Every handle maps
//! to a reproducible profile, ten posts, five reels and an analytics report,
//! so dashboards can be developed and tested without the live API.
//!
//! ## Features
//!
//! - Seeded xorshift content stream: same handle, same data, in every process
//! - Keyword caption classifier (tags, vibe, quality tier)
//! - Analytics derived from the generated posts
//! - Mock HTTP server mirroring the dashboard's data routes
//! - Provider failure injection for exercising fallback paths
//!
//! ## Usage
//!
//! ### As a CLI
//!
//! ```bash
//! # Start the server
//! feedsim serve --port 8080
//!
//! # Print simulated data
//! feedsim generate @jane_smith --kind analytics
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use feedsim::{analytics_for, posts_for, profile_for};
//!
//! let profile = profile_for("john.doe");
//! assert_eq!(profile.name, "John Doe");
//! assert_eq!(profile.username, "@john.doe");
//!
//! let posts = posts_for("john.doe");
//! assert_eq!(posts.len(), 10);
//! assert!(posts.iter().all(|p| p.profile_id == profile.id));
//!
//! let analytics = analytics_for("john.doe");
//! assert_eq!(analytics.trend.len(), posts.len());
//! ```

// Core library modules
pub mod classifier;
pub mod errors;
pub mod generator;
pub mod rng;
pub mod stats;
pub mod types;

// CLI module (for `feedsim serve` command)
pub mod cli;

// Re-export commonly used types
pub use classifier::{analyze_caption, CaptionAnalysis, PostVibe, Quality, ReelVibe};
pub use errors::{FailureConfig, FailureInjector, SimulatedFailure};
pub use generator::{
    analytics_for, posts_for, profile_for, reels_for, ContentSource, SimulatedSource,
    DEMO_HANDLE,
};
pub use rng::{seed_from, XorShift32};
pub use stats::{new_shared_stats, ResourceKind, SharedStats, Stats, StatsSnapshot};
pub use types::{Analytics, Demographics, Post, Profile, Reel, TrendPoint};
