//! Rule-based relevance scoring.

use super::ScoringStrategy;
use learnhub_core::{game_category_for_interest, Catalog, Category, Game, Profile, Result};
use serde::{Deserialize, Serialize};

/// Weights for the heuristic signals.
const GOAL_MATCH_WEIGHT: i32 = 10;
const INTEREST_MATCH_WEIGHT: i32 = 8;
const AGE_OVERLAP_WEIGHT: i32 = 5;
const AGE_CONTAINED_BONUS: i32 = 3;
const AGE_MISMATCH_PENALTY: i32 = -10;

/// Trait for computing game relevance scores.
///
/// Implementations must be pure functions of `(profile, game)`.
pub trait Scorer {
    /// Which strategy this scorer implements.
    fn strategy(&self) -> ScoringStrategy;

    /// Score one game for a profile.
    fn score(&self, profile: &Profile, game: &Game) -> Result<f64>;

    /// Score every catalog game, in catalog order.
    fn score_all(&self, profile: &Profile, catalog: &Catalog) -> Result<Vec<f64>> {
        catalog.iter().map(|game| self.score(profile, game)).collect()
    }
}

/// Breakdown of heuristic score components.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Category matches a learning goal.
    pub goal_score: i32,
    /// An interest maps to the game's category.
    pub interest_score: i32,
    /// Age overlap bonus, containment bonus, or mismatch penalty.
    pub age_score: i32,
}

impl ScoreBreakdown {
    /// Calculate total score.
    pub fn total(&self) -> i32 {
        self.goal_score + self.interest_score + self.age_score
    }
}

/// Deterministic, explainable scorer that never needs a model.
///
/// Negative scores are valid; they push unsuitable games down without
/// removing them from the ranking.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicScorer;

impl HeuristicScorer {
    /// Create a new scorer.
    pub fn new() -> Self {
        Self
    }

    /// Compute the additive score components for one game.
    pub fn breakdown(&self, profile: &Profile, game: &Game) -> ScoreBreakdown {
        let mut breakdown = ScoreBreakdown::default();

        if profile
            .learning_goals
            .iter()
            .any(|goal| Category::parse(goal) == Some(game.category))
        {
            breakdown.goal_score += GOAL_MATCH_WEIGHT;
        }

        if profile
            .interests
            .iter()
            .any(|interest| game_category_for_interest(interest) == Some(game.category))
        {
            breakdown.interest_score += INTEREST_MATCH_WEIGHT;
        }

        let user = profile.age_years();
        if game.age_range.overlaps(&user) {
            breakdown.age_score += AGE_OVERLAP_WEIGHT;
            if game.age_range.contains(&user) {
                breakdown.age_score += AGE_CONTAINED_BONUS;
            }
        } else {
            breakdown.age_score += AGE_MISMATCH_PENALTY;
        }

        breakdown
    }
}

impl Scorer for HeuristicScorer {
    fn strategy(&self) -> ScoringStrategy {
        ScoringStrategy::Heuristic
    }

    fn score(&self, profile: &Profile, game: &Game) -> Result<f64> {
        Ok(f64::from(self.breakdown(profile, game).total()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use learnhub_core::{AgeGroup, AgeRange};

    fn math_game() -> Game {
        Game::new("math", "Math", Category::Math, AgeRange::new(7, 12))
    }

    fn cooking_game() -> Game {
        Game::new("cooking", "Cooking", Category::Arts, AgeRange::new(13, 18))
    }

    fn scenario_profile() -> Profile {
        Profile::builder()
            .age_group(AgeGroup::EightToTwelve)
            .learning_goal("math")
            .interest("space")
            .build()
    }

    #[test]
    fn test_empty_profile_only_scores_age() {
        let scorer = HeuristicScorer::new();
        let rec = scorer.breakdown(&Profile::default(), &math_game());

        // No age group means [0, 100]: overlap but no containment.
        assert_eq!(rec.goal_score, 0);
        assert_eq!(rec.interest_score, 0);
        assert_eq!(rec.age_score, AGE_OVERLAP_WEIGHT);
    }

    #[test]
    fn test_goal_and_full_containment() {
        let scorer = HeuristicScorer::new();
        let rec = scorer.breakdown(&scenario_profile(), &math_game());

        assert_eq!(rec.goal_score, GOAL_MATCH_WEIGHT);
        assert_eq!(rec.interest_score, 0);
        assert_eq!(rec.age_score, AGE_OVERLAP_WEIGHT + AGE_CONTAINED_BONUS);
        assert_eq!(rec.total(), 18);
    }

    #[test]
    fn test_age_mismatch_penalty() {
        let scorer = HeuristicScorer::new();
        let score = scorer.score(&scenario_profile(), &cooking_game()).unwrap();
        assert!(score <= -10.0);
    }

    #[test]
    fn test_partial_overlap_gets_no_bonus() {
        let scorer = HeuristicScorer::new();
        let game = Game::new("sci", "Science", Category::Science, AgeRange::new(9, 14));
        let rec = scorer.breakdown(&scenario_profile(), &game);
        // space maps to science.
        assert_eq!(rec.interest_score, INTEREST_MATCH_WEIGHT);
        assert_eq!(rec.age_score, AGE_OVERLAP_WEIGHT);
    }

    #[test]
    fn test_interest_matches_once_per_game() {
        let scorer = HeuristicScorer::new();
        let profile = Profile::builder()
            .interest("space")
            .interest("animals")
            .interest("dinosaurs")
            .build();
        let game = Game::new("sci", "Science", Category::Science, AgeRange::new(9, 14));
        assert_eq!(
            scorer.breakdown(&profile, &game).interest_score,
            INTEREST_MATCH_WEIGHT
        );
    }

    #[test]
    fn test_art_goal_matches_arts_category() {
        let scorer = HeuristicScorer::new();
        let profile = Profile::builder().learning_goal("art").build();
        let game = Game::new("paint", "Paint", Category::Arts, AgeRange::new(5, 12));
        assert_eq!(scorer.breakdown(&profile, &game).goal_score, GOAL_MATCH_WEIGHT);
    }

    #[test]
    fn test_score_is_deterministic() {
        let scorer = HeuristicScorer::new();
        let profile = scenario_profile();
        let game = math_game();
        assert_eq!(
            scorer.score(&profile, &game).unwrap(),
            scorer.score(&profile, &game).unwrap()
        );
    }

    #[test]
    fn test_score_all_preserves_catalog_order() {
        let scorer = HeuristicScorer::new();
        let catalog = Catalog::new(vec![cooking_game(), math_game()]).unwrap();
        let scores = scorer.score_all(&scenario_profile(), &catalog).unwrap();
        assert_eq!(scores, vec![-10.0, 18.0]);
    }
}
