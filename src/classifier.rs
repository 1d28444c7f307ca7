// Caption Classifier Module
// Keyword-driven tagging of captions into tags, vibe and quality tier.

use serde::{Deserialize, Serialize};

/// Ordered keyword table. Each entry lists the substrings that trigger it and
/// the tag pair it contributes.
const KEYWORD_TAGS: &[(&[&str], [&str; 2])] = &[
    (&["beach"], ["travel", "outdoor"]),
    (&["coffee"], ["food", "cozy"]),
    (&["luxury"], ["luxury", "lifestyle"]),
    (&["street"], ["fashion", "streetwear"]),
    (&["hike"], ["outdoor", "fitness"]),
    (&["brunch"], ["food", "aesthetic"]),
    (&["travel", "rome"], ["travel", "culture"]),
    (&["party"], ["nightlife", "party"]),
    (&["desk"], ["aesthetic", "minimal"]),
    (&["workout"], ["fitness", "energetic"]),
];

/// Mood label attached to a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostVibe {
    Casual,
    Luxury,
    Aesthetic,
    Energetic,
}

/// Mood label attached to a reel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReelVibe {
    Nightlife,
    Lavish,
    Casual,
}

/// Content quality tier derived from how many tags a caption earned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Low,
    Medium,
    High,
}

impl Quality {
    fn from_tag_count(count: usize) -> Self {
        match count {
            0 | 1 => Quality::Low,
            2 => Quality::Medium,
            _ => Quality::High,
        }
    }
}

impl PostVibe {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostVibe::Casual => "casual",
            PostVibe::Luxury => "luxury",
            PostVibe::Aesthetic => "aesthetic",
            PostVibe::Energetic => "energetic",
        }
    }
}

impl ReelVibe {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReelVibe::Nightlife => "nightlife",
            ReelVibe::Lavish => "lavish",
            ReelVibe::Casual => "casual",
        }
    }
}

/// Result of classifying one caption
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionAnalysis {
    /// Deduplicated tags in order of first occurrence
    pub tags: Vec<String>,
    pub vibe: PostVibe,
    pub quality: Quality,
}

/// Classify a caption by case-insensitive keyword matching.
///
/// Quality is graded on the raw number of contributed tags, before
/// duplicates collapse.
pub fn analyze_caption(caption: &str) -> CaptionAnalysis {
    let lowered = caption.to_lowercase();

    let raw: Vec<&str> = KEYWORD_TAGS
        .iter()
        .filter(|(keywords, _)| keywords.iter().any(|k| lowered.contains(k)))
        .flat_map(|(_, tags)| tags.iter().copied())
        .collect();

    let has = |tag: &str| raw.contains(&tag);
    let vibe = if has("luxury") {
        PostVibe::Luxury
    } else if has("aesthetic") {
        PostVibe::Aesthetic
    } else if has("energetic") || has("fitness") {
        PostVibe::Energetic
    } else {
        PostVibe::Casual
    };

    let quality = Quality::from_tag_count(raw.len());

    let mut tags: Vec<String> = Vec::with_capacity(raw.len());
    for tag in raw {
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }

    CaptionAnalysis {
        tags,
        vibe,
        quality,
    }
}

/// Map classifier tags onto the reel vibe vocabulary
pub fn reel_vibe_from_tags(tags: &[String]) -> ReelVibe {
    let has = |tag: &str| tags.iter().any(|t| t == tag);
    if has("nightlife") || has("party") {
        ReelVibe::Nightlife
    } else if has("luxury") {
        ReelVibe::Lavish
    } else {
        ReelVibe::Casual
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_keywords() {
        let analysis = analyze_caption("Just another day");
        assert!(analysis.tags.is_empty());
        assert_eq!(analysis.vibe, PostVibe::Casual);
        assert_eq!(analysis.quality, Quality::Low);
    }

    #[test]
    fn test_single_keyword() {
        let analysis = analyze_caption("Cozy coffee morning");
        assert_eq!(analysis.tags, vec!["food", "cozy"]);
        assert_eq!(analysis.vibe, PostVibe::Casual);
        assert_eq!(analysis.quality, Quality::Medium);
    }

    #[test]
    fn test_case_insensitive() {
        let analysis = analyze_caption("LUXURY Staycation");
        assert_eq!(analysis.tags, vec!["luxury", "lifestyle"]);
        assert_eq!(analysis.vibe, PostVibe::Luxury);
    }

    #[test]
    fn test_rome_triggers_travel_group_once() {
        let analysis = analyze_caption("Travel diary: Rome edition");
        assert_eq!(analysis.tags, vec!["travel", "culture"]);
        assert_eq!(analysis.quality, Quality::Medium);
    }

    #[test]
    fn test_dedup_keeps_first_occurrence_and_grades_raw_count() {
        // beach -> travel, outdoor; hike -> outdoor, fitness
        let analysis = analyze_caption("Beach hike");
        assert_eq!(analysis.tags, vec!["travel", "outdoor", "fitness"]);
        assert_eq!(analysis.quality, Quality::High);
        assert_eq!(analysis.vibe, PostVibe::Energetic);

        // beach + travel both contribute "travel"; four raw tags
        let analysis = analyze_caption("beach travel");
        assert_eq!(analysis.tags, vec!["travel", "outdoor", "culture"]);
        assert_eq!(analysis.quality, Quality::High);
    }

    #[test]
    fn test_vibe_priority() {
        assert_eq!(
            analyze_caption("luxury desk workout").vibe,
            PostVibe::Luxury
        );
        assert_eq!(analyze_caption("desk workout").vibe, PostVibe::Aesthetic);
        assert_eq!(analyze_caption("workout").vibe, PostVibe::Energetic);
        assert_eq!(analyze_caption("hike").vibe, PostVibe::Energetic);
        assert_eq!(analyze_caption("party").vibe, PostVibe::Casual);
    }

    #[test]
    fn test_reel_vibes() {
        let tags = |c: &str| analyze_caption(c).tags;
        assert_eq!(reel_vibe_from_tags(&tags("Dance floor party")), ReelVibe::Nightlife);
        assert_eq!(reel_vibe_from_tags(&tags("Luxury unboxing")), ReelVibe::Lavish);
        assert_eq!(reel_vibe_from_tags(&tags("City night drive")), ReelVibe::Casual);
        assert_eq!(reel_vibe_from_tags(&tags("luxury party")), ReelVibe::Nightlife);
    }

    #[test]
    fn test_vibe_serialization() {
        assert_eq!(
            serde_json::to_string(&PostVibe::Aesthetic).unwrap(),
            "\"aesthetic\""
        );
        assert_eq!(
            serde_json::to_string(&ReelVibe::Lavish).unwrap(),
            "\"lavish\""
        );
        assert_eq!(serde_json::to_string(&Quality::High).unwrap(), "\"high\"");
        assert_eq!(PostVibe::Energetic.as_str(), "energetic");
        assert_eq!(ReelVibe::Nightlife.as_str(), "nightlife");
    }
}
