//! Game recommendations combining scoring, ranking and explanation.

mod explainer;
mod learned;
mod ranker;
mod scorer;

pub use explainer::{explain, summarize_recommendations};
pub use learned::{load_model, DenseLayer, LearnedModel, LearnedScorer};
pub use ranker::{rank, rank_with_fallback, select_top};
pub use scorer::{HeuristicScorer, ScoreBreakdown, Scorer};

use learnhub_core::{Catalog, Game, Profile, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Number of games unlocked by a profile-driven recommendation cycle.
pub const DEFAULT_TOP_K: usize = 3;

/// Which scoring strategy produced a ranking.
///
/// Scores from different strategies live on different scales and are never
/// compared with each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringStrategy {
    /// Additive rule-based scorer, roughly [-10, +20].
    Heuristic,
    /// Learned scorer, [0, 1].
    Learned,
}

impl ScoringStrategy {
    /// Short label for logs and summaries.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Heuristic => "heuristic",
            Self::Learned => "learned",
        }
    }
}

/// A game with its relevance score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredGame {
    /// The catalog entry.
    pub game: Game,
    /// Relevance score on the producing strategy's scale.
    pub score: f64,
}

/// A ranked catalog and the strategy that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ranking {
    /// Strategy used for every score in `games`.
    pub strategy: ScoringStrategy,
    /// True when the learned scorer was requested but the heuristic was used.
    pub fell_back: bool,
    /// Games sorted by descending score, ties in catalog order.
    pub games: Vec<ScoredGame>,
}

/// Human-readable rationale for one recommended game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explanation {
    /// Game identifier.
    pub game_id: String,
    /// Matched reasons, in fixed dimension order.
    pub reasons: Vec<String>,
    /// Reasons joined into one sentence.
    pub text: String,
}

/// Output of one profile-driven recommendation cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    /// Full ranking.
    pub ranking: Ranking,
    /// Top-K games to unlock.
    pub top: Vec<Game>,
    /// One explanation per top game.
    pub explanations: Vec<Explanation>,
    /// One-line summary.
    pub summary: String,
}

/// Run one recommendation cycle: rank, select the top `top_k`, explain.
///
/// Uses `learned` when given and working; otherwise the heuristic scorer.
pub fn recommend(
    profile: &Profile,
    catalog: &Catalog,
    learned: Option<&dyn Scorer>,
    top_k: usize,
) -> Result<Recommendation> {
    let ranking = rank_with_fallback(profile, catalog, learned)?;
    let top = select_top(&ranking.games, top_k);
    let explanations = explain(profile, &top);
    let summary = summarize_recommendations(top.len(), ranking.strategy, ranking.fell_back);

    info!(
        strategy = ranking.strategy.label(),
        fell_back = ranking.fell_back,
        top = ?top.iter().map(|g| g.id.as_str()).collect::<Vec<_>>(),
        "recommendation cycle complete"
    );

    Ok(Recommendation {
        ranking,
        top,
        explanations,
        summary,
    })
}
