//! The survey profile handed to the core by the onboarding flow.
//!
//! Profiles are always partially specified: the survey may be abandoned after
//! the first step, so every field is optional and deserialization never fails
//! on unknown values. Unknown enum strings become "unset" and unknown
//! special-needs tags are dropped.

use crate::catalog::AgeRange;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A closed set of survey answers with stable string tags.
pub trait SurveyTag: Sized + Copy + 'static {
    /// Every variant, in declaration order.
    const ALL: &'static [Self];

    /// Stable tag used in storage and explanations.
    fn as_str(&self) -> &'static str;

    /// Parses a tag case-insensitively, accepting known aliases.
    fn parse(raw: &str) -> Option<Self>;
}

macro_rules! survey_tag {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $tag:literal $(| $alias:literal)*
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl SurveyTag for $name {
            const ALL: &'static [Self] = &[$( $name::$variant ),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $tag, )+
                }
            }

            fn parse(raw: &str) -> Option<Self> {
                let raw = raw.trim();
                $(
                    if raw.eq_ignore_ascii_case($tag) $(|| raw.eq_ignore_ascii_case($alias))* {
                        return Some($name::$variant);
                    }
                )+
                None
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                <$name as SurveyTag>::parse(&raw).ok_or_else(|| {
                    serde::de::Error::custom(format!(
                        "unknown {} `{}`",
                        stringify!($name),
                        raw
                    ))
                })
            }
        }
    };
}

survey_tag! {
    /// Age bucket chosen on the first survey step.
    pub enum AgeGroup {
        /// Ages 4 to 7.
        FourToSeven => "4-7",
        /// Ages 8 to 12.
        EightToTwelve => "8-12",
        /// Ages 13 to 16.
        ThirteenToSixteen => "13-16",
        /// Ages 17 and up.
        SeventeenPlus => "17+",
    }
}

impl AgeGroup {
    /// Inclusive year range covered by this bucket.
    pub fn years(&self) -> AgeRange {
        match self {
            AgeGroup::FourToSeven => AgeRange::new(4, 7),
            AgeGroup::EightToTwelve => AgeRange::new(8, 12),
            AgeGroup::ThirteenToSixteen => AgeRange::new(13, 16),
            AgeGroup::SeventeenPlus => AgeRange::new(17, 100),
        }
    }
}

survey_tag! {
    /// Preferred way of taking in new material.
    pub enum LearningStyle {
        /// Images, diagrams and spatial layout.
        Visual => "visual",
        /// Listening and verbal instruction.
        Auditory => "auditory",
        /// Reading and writing activities.
        Reading => "reading" | "reading/writing",
        /// Hands-on activities and movement.
        Kinesthetic => "kinesthetic",
        /// A mix of styles.
        Multimodal => "multimodal",
    }
}

survey_tag! {
    /// Declared learning consideration.
    pub enum SpecialNeed {
        /// Sentinel for "no specific considerations".
        NoneDeclared => "none",
        /// Attention-deficit/hyperactivity disorder.
        Adhd => "adhd",
        /// Autism spectrum.
        Autism => "autism" | "asd",
        /// Reading difficulty.
        Dyslexia => "dyslexia",
        /// Math learning difficulty.
        Dyscalculia => "dyscalculia",
        /// Sensory processing sensitivities.
        Sensory => "sensory",
        /// Anxiety or stress management needs.
        Anxiety => "anxiety",
        /// Advanced learning capabilities.
        Gifted => "gifted",
    }
}

survey_tag! {
    /// How long the learner can stay focused on one activity.
    pub enum AttentionSpan {
        /// Under five minutes.
        Short => "short",
        /// Five to fifteen minutes.
        Medium => "medium",
        /// Fifteen minutes or more.
        Long => "long",
        /// Depends on interest level.
        Variable => "variable",
    }
}

survey_tag! {
    /// Prior exposure to educational games.
    pub enum Experience {
        /// New to most educational games.
        Beginner => "beginner",
        /// Some experience.
        Intermediate => "intermediate",
        /// Experienced with many educational games.
        Advanced => "advanced",
    }
}

survey_tag! {
    /// Color intensity preference.
    pub enum ColorIntensity {
        /// Muted palette.
        Muted => "muted",
        /// Moderate palette.
        Moderate => "moderate",
        /// Bright palette.
        Bright => "bright",
    }
}

survey_tag! {
    /// Sound level preference.
    pub enum SoundLevel {
        /// No sound.
        Silent => "none",
        /// Minimal sound.
        Minimal => "minimal",
        /// Moderate sound.
        Moderate => "moderate",
    }
}

survey_tag! {
    /// Visual complexity preference.
    pub enum VisualComplexity {
        /// Simple layouts.
        Simple => "simple",
        /// Medium detail.
        Medium => "medium",
        /// Detailed layouts.
        Detailed => "detailed",
    }
}

survey_tag! {
    /// Activity pace preference.
    pub enum Pace {
        /// Slow pace.
        Slow => "slow",
        /// Medium pace.
        Medium => "medium",
        /// Fast pace.
        Fast => "fast",
    }
}

survey_tag! {
    /// Interactivity preference.
    pub enum Interactivity {
        /// Low interactivity.
        Low => "low",
        /// Medium interactivity.
        Medium => "medium",
        /// High interactivity.
        High => "high",
    }
}

/// UI preferences sub-record of the survey.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiPreferences {
    /// Color intensity.
    #[serde(default, deserialize_with = "lenient_tag", skip_serializing_if = "Option::is_none")]
    pub colors: Option<ColorIntensity>,
    /// Sound level.
    #[serde(default, deserialize_with = "lenient_tag", skip_serializing_if = "Option::is_none")]
    pub sounds: Option<SoundLevel>,
    /// Visual complexity.
    #[serde(default, deserialize_with = "lenient_tag", skip_serializing_if = "Option::is_none")]
    pub complexity: Option<VisualComplexity>,
    /// Pace.
    #[serde(default, deserialize_with = "lenient_tag", skip_serializing_if = "Option::is_none")]
    pub pace: Option<Pace>,
    /// Interactivity.
    #[serde(default, deserialize_with = "lenient_tag", skip_serializing_if = "Option::is_none")]
    pub interactivity: Option<Interactivity>,
}

/// The survey result. Immutable input to the core.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Display name, if given.
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Age bucket.
    #[serde(default, deserialize_with = "lenient_tag", skip_serializing_if = "Option::is_none")]
    pub age_group: Option<AgeGroup>,
    /// Learning-goal tags (math, reading, science, ...).
    #[serde(default, deserialize_with = "lenient_strings")]
    pub learning_goals: Vec<String>,
    /// Interest tags (animals, space, music, ...).
    #[serde(default, deserialize_with = "lenient_strings")]
    pub interests: Vec<String>,
    /// Preferred learning style.
    #[serde(default, deserialize_with = "lenient_tag", skip_serializing_if = "Option::is_none")]
    pub learning_style: Option<LearningStyle>,
    /// Declared special needs. Empty means nothing was declared.
    #[serde(default, deserialize_with = "lenient_tags")]
    pub special_needs: Vec<SpecialNeed>,
    /// Attention span.
    #[serde(default, deserialize_with = "lenient_tag", skip_serializing_if = "Option::is_none")]
    pub attention_span: Option<AttentionSpan>,
    /// Previous experience with educational games.
    #[serde(default, deserialize_with = "lenient_tag", skip_serializing_if = "Option::is_none")]
    pub previous_experience: Option<Experience>,
    /// UI preferences.
    #[serde(default, deserialize_with = "lenient_preferences", skip_serializing_if = "Option::is_none")]
    pub preferences: Option<UiPreferences>,
}

impl Profile {
    /// Start building a profile.
    pub fn builder() -> ProfileBuilder {
        ProfileBuilder::default()
    }

    /// Year range used for age matching; unbounded when no age group was given.
    pub fn age_years(&self) -> AgeRange {
        self.age_group
            .map(|g| g.years())
            .unwrap_or(AgeRange::new(0, 100))
    }

    /// Special needs with the `none` sentinel filled in when nothing was declared.
    pub fn effective_special_needs(&self) -> Vec<SpecialNeed> {
        if self.special_needs.is_empty() {
            vec![SpecialNeed::NoneDeclared]
        } else {
            self.special_needs.clone()
        }
    }

    /// Declared needs excluding the `none` sentinel.
    ///
    /// Returns an empty list whenever the sentinel is present, matching the
    /// survey's exclusive "None" option.
    pub fn declared_special_needs(&self) -> Vec<SpecialNeed> {
        if self.special_needs.contains(&SpecialNeed::NoneDeclared) {
            return Vec::new();
        }
        self.special_needs.clone()
    }
}

/// Builder for [`Profile`], mostly used by callers assembling profiles in code.
#[derive(Debug, Default)]
pub struct ProfileBuilder {
    profile: Profile,
}

impl ProfileBuilder {
    /// Set the display name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.profile.name = Some(name.into());
        self
    }

    /// Set the age group.
    pub fn age_group(mut self, group: AgeGroup) -> Self {
        self.profile.age_group = Some(group);
        self
    }

    /// Add a learning-goal tag.
    pub fn learning_goal(mut self, goal: impl Into<String>) -> Self {
        self.profile.learning_goals.push(normalize_tag(&goal.into()));
        self
    }

    /// Add an interest tag.
    pub fn interest(mut self, interest: impl Into<String>) -> Self {
        self.profile.interests.push(normalize_tag(&interest.into()));
        self
    }

    /// Set the learning style.
    pub fn learning_style(mut self, style: LearningStyle) -> Self {
        self.profile.learning_style = Some(style);
        self
    }

    /// Add a special need.
    pub fn special_need(mut self, need: SpecialNeed) -> Self {
        if !self.profile.special_needs.contains(&need) {
            self.profile.special_needs.push(need);
        }
        self
    }

    /// Set the attention span.
    pub fn attention_span(mut self, span: AttentionSpan) -> Self {
        self.profile.attention_span = Some(span);
        self
    }

    /// Set the previous experience.
    pub fn experience(mut self, experience: Experience) -> Self {
        self.profile.previous_experience = Some(experience);
        self
    }

    /// Set the UI preferences.
    pub fn preferences(mut self, preferences: UiPreferences) -> Self {
        self.profile.preferences = Some(preferences);
        self
    }

    /// Finish building.
    pub fn build(self) -> Profile {
        self.profile
    }
}

fn normalize_tag(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Text(String),
    Other(IgnoredAny),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawList {
    Many(Vec<RawScalar>),
    One(RawScalar),
}

impl RawList {
    fn into_texts(self) -> Vec<String> {
        let items = match self {
            RawList::Many(items) => items,
            RawList::One(item) => vec![item],
        };
        items
            .into_iter()
            .filter_map(|item| match item {
                RawScalar::Text(text) => Some(text),
                RawScalar::Other(_) => None,
            })
            .collect()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPreferences {
    Record(UiPreferences),
    Other(IgnoredAny),
}

fn lenient_tag<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: SurveyTag,
{
    Ok(match Option::<RawScalar>::deserialize(deserializer)? {
        Some(RawScalar::Text(text)) => T::parse(&text),
        _ => None,
    })
}

fn lenient_tags<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: SurveyTag + PartialEq,
{
    let mut tags: Vec<T> = Vec::new();
    for text in Option::<RawList>::deserialize(deserializer)?
        .map(RawList::into_texts)
        .unwrap_or_default()
    {
        if let Some(tag) = T::parse(&text) {
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }
    }
    Ok(tags)
}

fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawList>::deserialize(deserializer)?
        .map(RawList::into_texts)
        .unwrap_or_default()
        .iter()
        .map(|s| normalize_tag(s))
        .filter(|s| !s.is_empty())
        .collect())
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawScalar>::deserialize(deserializer)? {
        Some(RawScalar::Text(text)) if !text.trim().is_empty() => Some(text),
        _ => None,
    })
}

fn lenient_preferences<'de, D>(deserializer: D) -> Result<Option<UiPreferences>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawPreferences>::deserialize(deserializer)? {
        Some(RawPreferences::Record(prefs)) => Some(prefs),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive_with_aliases() {
        assert_eq!(AgeGroup::parse("17+"), Some(AgeGroup::SeventeenPlus));
        assert_eq!(SpecialNeed::parse("ASD"), Some(SpecialNeed::Autism));
        assert_eq!(LearningStyle::parse(" Visual "), Some(LearningStyle::Visual));
        assert_eq!(Experience::parse("expert"), None);
    }

    #[test]
    fn test_age_years() {
        assert_eq!(AgeGroup::EightToTwelve.years(), AgeRange::new(8, 12));
        assert_eq!(AgeGroup::SeventeenPlus.years(), AgeRange::new(17, 100));
        assert_eq!(Profile::default().age_years(), AgeRange::new(0, 100));
    }

    #[test]
    fn test_full_survey_payload() {
        let json = r#"{
            "name": "Sam",
            "ageGroup": "8-12",
            "learningGoals": ["math", "Science"],
            "interests": ["space", "animals"],
            "learningStyle": "visual",
            "specialNeeds": ["asd", "dyslexia"],
            "attentionSpan": "medium",
            "previousExperience": "beginner",
            "preferences": {"colors": "bright", "sounds": "moderate", "complexity": "medium",
                            "pace": "medium", "interactivity": "high"}
        }"#;
        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.age_group, Some(AgeGroup::EightToTwelve));
        assert_eq!(profile.learning_goals, vec!["math", "science"]);
        assert_eq!(
            profile.special_needs,
            vec![SpecialNeed::Autism, SpecialNeed::Dyslexia]
        );
        let prefs = profile.preferences.unwrap();
        assert_eq!(prefs.interactivity, Some(Interactivity::High));
        assert_eq!(prefs.sounds, Some(SoundLevel::Moderate));
    }

    #[test]
    fn test_age_only_profile() {
        let profile: Profile = serde_json::from_str(r#"{"ageGroup": "4-7"}"#).unwrap();
        assert_eq!(profile.age_group, Some(AgeGroup::FourToSeven));
        assert!(profile.interests.is_empty());
        assert!(profile.preferences.is_none());
        assert_eq!(profile.effective_special_needs(), vec![SpecialNeed::NoneDeclared]);
    }

    #[test]
    fn test_unknown_values_degrade_instead_of_failing() {
        let json = r#"{
            "ageGroup": "99-100",
            "learningStyle": 42,
            "specialNeeds": ["adhd", "unknown", 7],
            "interests": "space",
            "attentionSpan": null,
            "preferences": "loud"
        }"#;
        let profile: Profile = serde_json::from_str(json).unwrap();
        assert!(profile.age_group.is_none());
        assert!(profile.learning_style.is_none());
        assert_eq!(profile.special_needs, vec![SpecialNeed::Adhd]);
        assert_eq!(profile.interests, vec!["space"]);
        assert!(profile.attention_span.is_none());
        assert!(profile.preferences.is_none());
    }

    #[test]
    fn test_declared_needs_respect_none_sentinel() {
        let profile = Profile::builder()
            .special_need(SpecialNeed::NoneDeclared)
            .special_need(SpecialNeed::Adhd)
            .build();
        assert!(profile.declared_special_needs().is_empty());

        let profile = Profile::builder().special_need(SpecialNeed::Adhd).build();
        assert_eq!(profile.declared_special_needs(), vec![SpecialNeed::Adhd]);
    }

    #[test]
    fn test_serialize_round_trips_through_storage_shape() {
        let profile = Profile::builder()
            .age_group(AgeGroup::ThirteenToSixteen)
            .interest("Music")
            .learning_style(LearningStyle::Auditory)
            .build();
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["ageGroup"], "13-16");
        assert_eq!(json["interests"][0], "music");
        assert!(json.get("attentionSpan").is_none());
        let back: Profile = serde_json::from_value(json).unwrap();
        assert_eq!(back, profile);
    }
}
