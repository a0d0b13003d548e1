//! Interest tag lookup tables.
//!
//! Interests are free-form survey tags. Two fixed tables map them onto the
//! coarse categories the normalizer counts and onto game categories the
//! heuristic scorer matches.

use crate::catalog::Category;
use serde::{Deserialize, Serialize};

/// Coarse interest buckets counted by the profile normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureCategory {
    /// Science.
    Science,
    /// Technology.
    Technology,
    /// Arts.
    Arts,
    /// Language.
    Language,
    /// Nature.
    Nature,
}

impl FeatureCategory {
    /// Every bucket, in feature-vector order.
    pub const ALL: [FeatureCategory; 5] = [
        FeatureCategory::Science,
        FeatureCategory::Technology,
        FeatureCategory::Arts,
        FeatureCategory::Language,
        FeatureCategory::Nature,
    ];

    /// Stable label.
    pub fn label(&self) -> &'static str {
        match self {
            FeatureCategory::Science => "science",
            FeatureCategory::Technology => "technology",
            FeatureCategory::Arts => "arts",
            FeatureCategory::Language => "language",
            FeatureCategory::Nature => "nature",
        }
    }

    /// Buckets an interest tag. A tag that already names a bucket maps to it.
    ///
    /// ```
    /// use learnhub_core::FeatureCategory;
    ///
    /// assert_eq!(FeatureCategory::for_interest("space"), Some(FeatureCategory::Science));
    /// assert_eq!(FeatureCategory::for_interest("nature"), Some(FeatureCategory::Nature));
    /// assert_eq!(FeatureCategory::for_interest("sports"), None);
    /// ```
    pub fn for_interest(interest: &str) -> Option<FeatureCategory> {
        let tag = interest.trim().to_lowercase();
        let mapped = match tag.as_str() {
            "animals" | "plants" => FeatureCategory::Nature,
            "space" | "dinosaurs" => FeatureCategory::Science,
            "music" | "drawing" => FeatureCategory::Arts,
            "reading" | "writing" => FeatureCategory::Language,
            "coding" | "robots" => FeatureCategory::Technology,
            other => return Self::ALL.into_iter().find(|c| c.label() == other),
        };
        Some(mapped)
    }
}

/// Maps an interest tag to the game category it suggests, if any.
pub fn game_category_for_interest(interest: &str) -> Option<Category> {
    match interest.trim().to_lowercase().as_str() {
        "animals" | "space" | "nature" | "dinosaurs" => Some(Category::Science),
        "music" | "cooking" | "superheroes" => Some(Category::Arts),
        "sports" | "vehicles" => Some(Category::Motor),
        "history" | "fantasy" => Some(Category::Language),
        "technology" => Some(Category::Logic),
        _ => None,
    }
}
