//! Shared domain model for the learnhub recommendation engine.
//!
//! This crate provides:
//! - The survey [`Profile`] and its small enumerations, deserialized leniently.
//! - The static game [`Catalog`] with per-game feature profiles.
//! - Interest lookup tables used by both the normalizer and the heuristic scorer.
//! - The [`HubError`] taxonomy shared by every core crate.
//!
//! # Examples
//!
//! ```
//! use learnhub_core::{default_catalog, AgeGroup, Profile};
//!
//! let profile = Profile::builder().age_group(AgeGroup::EightToTwelve).build();
//! let catalog = default_catalog();
//!
//! assert_eq!(catalog.len(), 12);
//! assert!(profile.learning_style.is_none());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

/// Game catalog and feature profiles.
pub mod catalog;
/// Error taxonomy.
pub mod error;
/// Interest tag lookup tables.
pub mod interests;
/// Survey profile model.
pub mod profile;

pub use catalog::{default_catalog, AgeRange, Catalog, Category, Difficulty, Game, GameFeatures};
pub use error::{HubError, Result};
pub use interests::{game_category_for_interest, FeatureCategory};
pub use profile::{
    AgeGroup, AttentionSpan, ColorIntensity, Experience, Interactivity, LearningStyle, Pace,
    Profile, ProfileBuilder, SoundLevel, SpecialNeed, SurveyTag, UiPreferences, VisualComplexity,
};
