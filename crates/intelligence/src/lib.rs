//! Game recommendations driven by the survey profile.
//!
//! This crate provides:
//! - Profile normalization into a fixed-width feature vector
//! - Heuristic and learned scoring behind one [`Scorer`] interface
//! - Ranking with transparent fallback from the learned scorer to the heuristic
//! - Human-readable explanations for the selected games

pub mod features;
pub mod recommend;
mod types;

pub use features::{normalize, FeatureVector, FEATURE_LEN, FEATURE_NAMES};
pub use recommend::{
    explain, load_model, rank, rank_with_fallback, recommend, select_top,
    summarize_recommendations, DenseLayer, Explanation, HeuristicScorer, LearnedModel,
    LearnedScorer, Ranking, Recommendation, ScoreBreakdown, ScoredGame, Scorer, ScoringStrategy,
    DEFAULT_TOP_K,
};
pub use types::Confidence;
