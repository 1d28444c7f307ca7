// View Types Module
// Value objects served to the dashboard. Field names follow its JSON shape.

use crate::classifier::{PostVibe, Quality, ReelVibe};
use serde::{Deserialize, Serialize};

/// Profile summary card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub name: String,
    /// Normalized handle, always `@`-prefixed
    pub username: String,
    pub profile_pic: String,
    pub followers: u64,
    pub following: u64,
    pub posts_count: u64,
}

/// A feed post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub profile_id: String,
    pub image_url: String,
    pub caption: String,
    pub likes: u64,
    pub comments: u64,
    pub tags: Vec<String>,
    pub vibe: PostVibe,
    pub quality: Quality,
}

/// A short-form video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reel {
    pub id: String,
    pub profile_id: String,
    pub thumbnail_url: String,
    pub caption: String,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub tags: Vec<String>,
    pub vibe: ReelVibe,
}

/// Engagement snapshot for one post, indexed from 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub index: usize,
    pub likes: u64,
    pub comments: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenderSplit {
    pub male: u32,
    pub female: u32,
    pub other: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeBracket {
    pub range: String,
    pub percent: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoShare {
    pub country: String,
    pub percent: u32,
}

/// Audience breakdown. Each of the three distributions sums to 100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Demographics {
    pub gender: GenderSplit,
    pub age: Vec<AgeBracket>,
    pub geography: Vec<GeoShare>,
}

fn ages(table: &[(&str, u32)]) -> Vec<AgeBracket> {
    table
        .iter()
        .map(|(range, percent)| AgeBracket {
            range: range.to_string(),
            percent: *percent,
        })
        .collect()
}

fn countries(table: &[(&str, u32)]) -> Vec<GeoShare> {
    table
        .iter()
        .map(|(country, percent)| GeoShare {
            country: country.to_string(),
            percent: *percent,
        })
        .collect()
}

impl Demographics {
    /// Fixed audience attached to every simulated analytics report
    pub fn simulated() -> Self {
        Self {
            gender: GenderSplit {
                male: 40,
                female: 58,
                other: 2,
            },
            age: ages(&[
                ("13-17", 5),
                ("18-24", 30),
                ("25-34", 37),
                ("35-44", 18),
                ("45+", 10),
            ]),
            geography: countries(&[
                ("US", 32),
                ("UK", 12),
                ("IN", 18),
                ("BR", 8),
                ("DE", 7),
                ("Other", 23),
            ]),
        }
    }

    /// Audience served when no handle was supplied
    pub fn placeholder() -> Self {
        Self {
            gender: GenderSplit {
                male: 45,
                female: 52,
                other: 3,
            },
            age: ages(&[
                ("18-24", 25),
                ("25-34", 35),
                ("35-44", 22),
                ("45-54", 12),
                ("55+", 6),
            ]),
            geography: countries(&[
                ("United States", 35),
                ("India", 20),
                ("Brazil", 15),
                ("United Kingdom", 10),
                ("Other", 20),
            ]),
        }
    }

    pub fn gender_total(&self) -> u32 {
        self.gender.male + self.gender.female + self.gender.other
    }

    pub fn age_total(&self) -> u32 {
        self.age.iter().map(|a| a.percent).sum()
    }

    pub fn geography_total(&self) -> u32 {
        self.geography.iter().map(|g| g.percent).sum()
    }
}

/// Engagement report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub avg_likes: u64,
    pub avg_comments: u64,
    /// Percentage, two decimals (e.g. 3.62)
    pub engagement_rate: f64,
    pub trend: Vec<TrendPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demographics: Option<Demographics>,
}

impl Analytics {
    /// Zeroed report with no audience data
    pub fn empty() -> Self {
        Self {
            avg_likes: 0,
            avg_comments: 0,
            engagement_rate: 0.0,
            trend: Vec::new(),
            demographics: None,
        }
    }

    /// Zeroed report carrying the placeholder audience
    pub fn placeholder() -> Self {
        Self {
            demographics: Some(Demographics::placeholder()),
            ..Self::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demographics_sum_to_100() {
        for d in [Demographics::simulated(), Demographics::placeholder()] {
            assert_eq!(d.gender_total(), 100);
            assert_eq!(d.age_total(), 100);
            assert_eq!(d.geography_total(), 100);
        }
    }

    #[test]
    fn test_profile_json_shape() {
        let profile = Profile {
            id: "profile_x".to_string(),
            name: "X".to_string(),
            username: "@x".to_string(),
            profile_pic: "/diverse-user-avatars.png".to_string(),
            followers: 1,
            following: 2,
            posts_count: 3,
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["profilePic"], "/diverse-user-avatars.png");
        assert_eq!(json["postsCount"], 3);
    }

    #[test]
    fn test_empty_analytics_omits_demographics() {
        let json = serde_json::to_value(Analytics::empty()).unwrap();
        assert_eq!(json["avgLikes"], 0);
        assert_eq!(json["engagementRate"], 0.0);
        assert!(json.get("demographics").is_none());

        let json = serde_json::to_value(Analytics::placeholder()).unwrap();
        assert_eq!(json["demographics"]["gender"]["male"], 45);
        assert_eq!(json["trend"], serde_json::json!([]));
    }
}
