//! Profile normalization into a fixed-width numeric feature vector.
//!
//! Layout (21 entries, every value in [0, 1]):
//!
//! | index  | feature                                                          |
//! |--------|------------------------------------------------------------------|
//! | 0      | age group position                                               |
//! | 1..=5  | learning style one-hot (visual, auditory, reading, kinesthetic, multimodal) |
//! | 6..=10 | special needs multi-hot (none, adhd, autism, dyslexia, dyscalculia) |
//! | 11..=15| interest buckets (science, technology, arts, language, nature)   |
//! | 16     | attention span position                                          |
//! | 17     | experience position                                              |
//! | 18..=20| colors, pace, interactivity positions                            |
//!
//! Missing or unrecognized values sit at the scale midpoint (0.5).

use learnhub_core::{
    AgeGroup, AttentionSpan, ColorIntensity, Experience, FeatureCategory, Interactivity,
    LearningStyle, Pace, Profile, SpecialNeed,
};
use serde::Serialize;

/// Width of every feature vector.
pub const FEATURE_LEN: usize = 21;

/// Feature names in vector order, for diagnostics.
pub const FEATURE_NAMES: [&str; FEATURE_LEN] = [
    "age",
    "style.visual",
    "style.auditory",
    "style.reading",
    "style.kinesthetic",
    "style.multimodal",
    "needs.none",
    "needs.adhd",
    "needs.autism",
    "needs.dyslexia",
    "needs.dyscalculia",
    "interest.science",
    "interest.technology",
    "interest.arts",
    "interest.language",
    "interest.nature",
    "attention",
    "experience",
    "ui.colors",
    "ui.pace",
    "ui.interactivity",
];

const MIDPOINT: f64 = 0.5;
const INTEREST_NORMALIZER_CAP: usize = 3;

const STYLES: [LearningStyle; 5] = [
    LearningStyle::Visual,
    LearningStyle::Auditory,
    LearningStyle::Reading,
    LearningStyle::Kinesthetic,
    LearningStyle::Multimodal,
];

const NEEDS: [SpecialNeed; 5] = [
    SpecialNeed::NoneDeclared,
    SpecialNeed::Adhd,
    SpecialNeed::Autism,
    SpecialNeed::Dyslexia,
    SpecialNeed::Dyscalculia,
];

/// Normalized profile features.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureVector([f64; FEATURE_LEN]);

impl FeatureVector {
    /// Feature values in layout order.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Number of features (always [`FEATURE_LEN`]).
    pub fn len(&self) -> usize {
        FEATURE_LEN
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Value at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }
}

/// Map a profile onto the fixed feature layout. Never fails.
pub fn normalize(profile: &Profile) -> FeatureVector {
    let mut values = [0.0; FEATURE_LEN];

    values[0] = profile.age_group.map(age_position).unwrap_or(MIDPOINT);

    for (slot, style) in values[1..=5].iter_mut().zip(STYLES) {
        *slot = flag(profile.learning_style == Some(style));
    }

    let needs = profile.effective_special_needs();
    for (slot, need) in values[6..=10].iter_mut().zip(NEEDS) {
        *slot = flag(needs.contains(&need));
    }

    let counts = interest_counts(&profile.interests);
    values[11..=15].copy_from_slice(&counts);

    values[16] = profile
        .attention_span
        .map(attention_position)
        .unwrap_or(MIDPOINT);
    values[17] = profile
        .previous_experience
        .map(experience_position)
        .unwrap_or(MIDPOINT);

    let prefs = profile.preferences.unwrap_or_default();
    values[18] = prefs.colors.map(color_position).unwrap_or(MIDPOINT);
    values[19] = prefs.pace.map(pace_position).unwrap_or(MIDPOINT);
    values[20] = prefs
        .interactivity
        .map(interactivity_position)
        .unwrap_or(MIDPOINT);

    FeatureVector(values)
}

fn flag(on: bool) -> f64 {
    if on {
        1.0
    } else {
        0.0
    }
}

/// Interest bucket counts divided by `min(3, total)` and capped at 1.0.
fn interest_counts(interests: &[String]) -> [f64; 5] {
    let mut counts = [0usize; 5];
    if interests.is_empty() {
        return [0.0; 5];
    }
    for interest in interests {
        if let Some(category) = FeatureCategory::for_interest(interest) {
            if let Some(idx) = FeatureCategory::ALL.iter().position(|c| *c == category) {
                counts[idx] += 1;
            }
        }
    }
    let divisor = interests.len().min(INTEREST_NORMALIZER_CAP) as f64;
    counts.map(|c| (c as f64 / divisor).min(1.0))
}

fn age_position(group: AgeGroup) -> f64 {
    match group {
        AgeGroup::FourToSeven => 0.0,
        AgeGroup::EightToTwelve => 1.0 / 3.0,
        AgeGroup::ThirteenToSixteen => 2.0 / 3.0,
        AgeGroup::SeventeenPlus => 1.0,
    }
}

fn attention_position(span: AttentionSpan) -> f64 {
    match span {
        AttentionSpan::Short => 0.0,
        AttentionSpan::Medium => 0.5,
        AttentionSpan::Variable => 0.75,
        AttentionSpan::Long => 1.0,
    }
}

fn experience_position(experience: Experience) -> f64 {
    match experience {
        Experience::Beginner => 0.0,
        Experience::Intermediate => 0.5,
        Experience::Advanced => 1.0,
    }
}

fn color_position(colors: ColorIntensity) -> f64 {
    match colors {
        ColorIntensity::Muted => 0.0,
        ColorIntensity::Moderate => 0.5,
        ColorIntensity::Bright => 1.0,
    }
}

fn pace_position(pace: Pace) -> f64 {
    match pace {
        Pace::Slow => 0.0,
        Pace::Medium => 0.5,
        Pace::Fast => 1.0,
    }
}

fn interactivity_position(level: Interactivity) -> f64 {
    match level {
        Interactivity::Low => 0.0,
        Interactivity::Medium => 0.5,
        Interactivity::High => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use learnhub_core::UiPreferences;

    #[test]
    fn test_empty_profile_uses_midpoints_and_none_sentinel() {
        let v = normalize(&Profile::default());
        assert_eq!(v.get(0), Some(0.5));
        assert!(v.as_slice()[1..=5].iter().all(|x| *x == 0.0));
        assert_eq!(v.get(6), Some(1.0), "none sentinel defaults on");
        assert!(v.as_slice()[7..=15].iter().all(|x| *x == 0.0));
        assert!(v.as_slice()[16..].iter().all(|x| *x == 0.5));
    }

    #[test]
    fn test_full_profile_layout() {
        let profile = Profile::builder()
            .age_group(AgeGroup::ThirteenToSixteen)
            .learning_style(LearningStyle::Kinesthetic)
            .special_need(SpecialNeed::Adhd)
            .special_need(SpecialNeed::Dyscalculia)
            .interest("space")
            .interest("robots")
            .attention_span(AttentionSpan::Variable)
            .experience(Experience::Advanced)
            .preferences(UiPreferences {
                colors: Some(ColorIntensity::Muted),
                pace: Some(Pace::Fast),
                interactivity: Some(Interactivity::High),
                ..Default::default()
            })
            .build();
        let v = normalize(&profile);
        let s = v.as_slice();

        assert!((s[0] - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(&s[1..=5], &[0.0, 0.0, 0.0, 1.0, 0.0]);
        assert_eq!(&s[6..=10], &[0.0, 1.0, 0.0, 0.0, 1.0]);
        assert_eq!(&s[11..=15], &[0.5, 0.5, 0.0, 0.0, 0.0]);
        assert_eq!(s[16], 0.75);
        assert_eq!(s[17], 1.0);
        assert_eq!(&s[18..], &[0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_interest_counts_are_capped() {
        let profile = Profile::builder()
            .interest("space")
            .interest("dinosaurs")
            .interest("science")
            .interest("space")
            .interest("sports")
            .build();
        let v = normalize(&profile);
        // 4 science hits over min(3, 5) = 3 would be 1.33; capped to 1.0.
        assert_eq!(v.get(11), Some(1.0));
    }

    #[test]
    fn test_names_match_layout() {
        assert_eq!(FEATURE_NAMES.len(), FEATURE_LEN);
        assert_eq!(normalize(&Profile::default()).len(), FEATURE_LEN);
    }
}
