// Content Generator Module
// Deterministic profiles, posts, reels and analytics derived from a handle.

use crate::classifier::{analyze_caption, reel_vibe_from_tags};
use crate::rng::{seed_from, XorShift32, REEL_STREAM_SALT};
use crate::types::{Analytics, Demographics, Post, Profile, Reel, TrendPoint};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Handle used wherever demo data is needed without user input
pub const DEMO_HANDLE: &str = "@avasummers";

/// Number of posts generated per profile
pub const POSTS_PER_PROFILE: usize = 10;

/// Number of reels generated per profile
pub const REELS_PER_PROFILE: usize = 5;

const AVATAR_PLACEHOLDER: &str = "/diverse-user-avatars.png";
const UNKNOWN_USER: &str = "Unknown User";

const POST_CAPTIONS: [&str; POSTS_PER_PROFILE] = [
    "Sunset vibes at the beach",
    "Cozy coffee morning",
    "Luxury staycation weekend",
    "Street style fit check",
    "Outdoor hike with friends",
    "Aesthetic brunch in town",
    "Travel diary: Rome edition",
    "Party night with the crew",
    "Minimal desk setup goals",
    "Energetic workout session",
];

const REEL_CAPTIONS: [&str; REELS_PER_PROFILE] = [
    "Dance floor party",
    "City night drive",
    "Luxury unboxing",
    "Beach day reel",
    "Workout challenge",
];

// Characters left alone by JavaScript's encodeURIComponent
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Source of dashboard content for a handle.
///
/// The HTTP layer talks to this trait so alternative sources can sit behind
/// the same routes.
pub trait ContentSource: Send + Sync {
    fn profile(&self, handle: &str) -> Profile;

    fn posts(&self, handle: &str) -> Vec<Post>;

    fn reels(&self, handle: &str) -> Vec<Reel>;

    fn analytics(&self, handle: &str) -> Analytics;

    /// Get a name for this source (for logging/debugging)
    fn name(&self) -> &str;
}

/// Deterministic simulator backed by the free functions in this module
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedSource;

impl SimulatedSource {
    pub fn new() -> Self {
        Self
    }
}

impl ContentSource for SimulatedSource {
    fn profile(&self, handle: &str) -> Profile {
        profile_for(handle)
    }

    fn posts(&self, handle: &str) -> Vec<Post> {
        posts_for(handle)
    }

    fn reels(&self, handle: &str) -> Vec<Reel> {
        reels_for(handle)
    }

    fn analytics(&self, handle: &str) -> Analytics {
        analytics_for(handle)
    }

    fn name(&self) -> &str {
        "simulated"
    }
}

/// Prefix a handle with `@` unless it already has one
pub fn normalize_handle(handle: &str) -> String {
    if handle.starts_with('@') {
        handle.to_string()
    } else {
        format!("@{}", handle)
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Guess a display name from a normalized handle: `@john.doe` -> `John Doe`
pub fn display_name(username: &str) -> String {
    let bare = username.replacen('@', "", 1);
    let name = bare
        .split(|c: char| matches!(c, '.' | '_' | '-'))
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ");
    if name.is_empty() {
        UNKNOWN_USER.to_string()
    } else {
        name
    }
}

fn placeholder_image(query: &str) -> String {
    format!(
        "/placeholder.svg?height=420&width=420&query={}",
        utf8_percent_encode(query, URI_COMPONENT)
    )
}

/// Build the profile for a handle.
///
/// Counters are taken straight from the seed of the normalized handle, not
/// from a PRNG stream.
pub fn profile_for(handle: &str) -> Profile {
    let username = normalize_handle(handle);
    let seed = seed_from(&username) as u64;

    Profile {
        id: format!("profile_{}", username.replacen('@', "", 1)),
        name: display_name(&username),
        profile_pic: AVATAR_PLACEHOLDER.to_string(),
        followers: 10_000 + seed % 500_000,
        following: 100 + seed % 1_000,
        posts_count: 50 + seed % 800,
        username,
    }
}

/// Generate the ten posts of a handle.
///
/// The stream is seeded from the profile id. Each post draws likes first,
/// then comments.
pub fn posts_for(handle: &str) -> Vec<Post> {
    let profile = profile_for(handle);
    let mut rng = XorShift32::from_str_seed(&profile.id);

    POST_CAPTIONS
        .iter()
        .enumerate()
        .map(|(i, caption)| {
            let analysis = analyze_caption(caption);
            let likes = (1500.0 + rng.next_f64() * 20_000.0).floor() as u64;
            let comments = (30.0 + rng.next_f64() * 800.0).floor() as u64;
            Post {
                id: format!("{}_post_{}", profile.id, i + 1),
                profile_id: profile.id.clone(),
                image_url: placeholder_image(caption),
                caption: caption.to_string(),
                likes,
                comments,
                tags: analysis.tags,
                vibe: analysis.vibe,
                quality: analysis.quality,
            }
        })
        .collect()
}

/// Generate the five reels of a handle.
///
/// Draw order per reel is likes, comments, then the views multiplier. The
/// multiplier is at least 8, so views > likes > comments always holds.
pub fn reels_for(handle: &str) -> Vec<Reel> {
    let profile = profile_for(handle);
    let mut rng = XorShift32::new(seed_from(&profile.id) ^ REEL_STREAM_SALT);

    REEL_CAPTIONS
        .iter()
        .enumerate()
        .map(|(i, caption)| {
            let tags = analyze_caption(caption).tags;
            let likes = (3000.0 + rng.next_f64() * 30_000.0).floor() as u64;
            let comments = (50.0 + rng.next_f64() * 900.0).floor() as u64;
            let views = (likes as f64 * (8.0 + rng.next_f64() * 18.0)).floor() as u64;
            Reel {
                id: format!("{}_reel_{}", profile.id, i + 1),
                profile_id: profile.id.clone(),
                thumbnail_url: placeholder_image(&format!("{} reel", caption)),
                caption: caption.to_string(),
                views,
                likes,
                comments,
                vibe: reel_vibe_from_tags(&tags),
                tags,
            }
        })
        .collect()
}

/// Round half up to the nearest integer
fn round_half_up(value: f64) -> u64 {
    (value + 0.5).floor() as u64
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Derive the analytics report of a handle from its generated posts
pub fn analytics_for(handle: &str) -> Analytics {
    let profile = profile_for(handle);
    let posts = posts_for(handle);
    let count = posts.len() as f64;

    let avg_likes = round_half_up(posts.iter().map(|p| p.likes).sum::<u64>() as f64 / count);
    let avg_comments =
        round_half_up(posts.iter().map(|p| p.comments).sum::<u64>() as f64 / count);
    let engagement_rate =
        round2((avg_likes + avg_comments) as f64 / profile.followers as f64 * 100.0);

    let trend = posts
        .iter()
        .enumerate()
        .map(|(i, p)| TrendPoint {
            index: i + 1,
            likes: p.likes,
            comments: p.comments,
        })
        .collect();

    Analytics {
        avg_likes,
        avg_comments,
        engagement_rate,
        trend,
        demographics: Some(Demographics::simulated()),
    }
}
