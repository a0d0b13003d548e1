//! Catalog ranking and top-K selection.

use super::scorer::{HeuristicScorer, Scorer};
use super::{Ranking, ScoredGame};
use learnhub_core::{Catalog, Game, HubError, Profile, Result};
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Score every catalog game and sort by descending score.
///
/// The sort is stable, so equal scores keep catalog order. A scorer that
/// returns the wrong number of scores or a non-finite score is reported as
/// [`HubError::ModelUnavailable`].
pub fn rank(profile: &Profile, catalog: &Catalog, scorer: &dyn Scorer) -> Result<Vec<ScoredGame>> {
    if catalog.is_empty() {
        return Err(HubError::Validation("catalog is empty".into()));
    }

    let scores = scorer.score_all(profile, catalog)?;
    if scores.len() != catalog.len() {
        return Err(HubError::ModelUnavailable(format!(
            "{} scorer returned {} scores for {} games",
            scorer.strategy().label(),
            scores.len(),
            catalog.len()
        )));
    }
    if let Some(pos) = scores.iter().position(|s| !s.is_finite()) {
        return Err(HubError::ModelUnavailable(format!(
            "{} scorer returned a non-finite score for `{}`",
            scorer.strategy().label(),
            catalog.games()[pos].id
        )));
    }

    let mut ranked: Vec<ScoredGame> = catalog
        .iter()
        .zip(scores)
        .map(|(game, score)| ScoredGame {
            game: game.clone(),
            score,
        })
        .collect();
    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    debug!(
        strategy = scorer.strategy().label(),
        games = ranked.len(),
        best = ranked.first().map(|s| s.game.id.as_str()),
        "ranked catalog"
    );
    Ok(ranked)
}

/// Rank with `learned` when available, else with the heuristic scorer.
///
/// A recoverable learned-scorer failure switches the whole pass to the
/// heuristic; the two scales are never mixed within one ranking.
pub fn rank_with_fallback(
    profile: &Profile,
    catalog: &Catalog,
    learned: Option<&dyn Scorer>,
) -> Result<Ranking> {
    let heuristic = HeuristicScorer::new();

    let Some(scorer) = learned else {
        return Ok(Ranking {
            strategy: heuristic.strategy(),
            fell_back: false,
            games: rank(profile, catalog, &heuristic)?,
        });
    };

    match rank(profile, catalog, scorer) {
        Ok(games) => Ok(Ranking {
            strategy: scorer.strategy(),
            fell_back: false,
            games,
        }),
        Err(err) if err.is_recoverable() => {
            warn!(error = %err, "learned scoring failed, using heuristic");
            Ok(Ranking {
                strategy: heuristic.strategy(),
                fell_back: true,
                games: rank(profile, catalog, &heuristic)?,
            })
        }
        Err(err) => Err(err),
    }
}

/// First `k` distinct games of a ranking. Returns `min(k, len)` games.
pub fn select_top(ranked: &[ScoredGame], k: usize) -> Vec<Game> {
    let mut seen = HashSet::new();
    ranked
        .iter()
        .filter(|s| seen.insert(s.game.id.as_str()))
        .take(k)
        .map(|s| s.game.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommend::ScoringStrategy;
    use learnhub_core::{default_catalog, AgeGroup, AgeRange, Category};

    /// Always fails with a recoverable error.
    struct BrokenModel;

    impl Scorer for BrokenModel {
        fn strategy(&self) -> ScoringStrategy {
            ScoringStrategy::Learned
        }

        fn score(&self, _: &Profile, _: &Game) -> Result<f64> {
            Err(HubError::ModelUnavailable("model returned no data".into()))
        }
    }

    /// Returns a constant score.
    struct Flat(f64);

    impl Scorer for Flat {
        fn strategy(&self) -> ScoringStrategy {
            ScoringStrategy::Learned
        }

        fn score(&self, _: &Profile, _: &Game) -> Result<f64> {
            Ok(self.0)
        }
    }

    fn two_games() -> Catalog {
        Catalog::new(vec![
            Game::new("cooking", "Cooking", Category::Arts, AgeRange::new(13, 18)),
            Game::new("math", "Math", Category::Math, AgeRange::new(7, 12)),
        ])
        .unwrap()
    }

    fn scenario_profile() -> Profile {
        Profile::builder()
            .age_group(AgeGroup::EightToTwelve)
            .learning_goal("math")
            .interest("space")
            .build()
    }

    #[test]
    fn test_rank_sorts_descending() {
        let ranked = rank(&scenario_profile(), &two_games(), &HeuristicScorer::new()).unwrap();
        let ids: Vec<_> = ranked.iter().map(|s| s.game.id.as_str()).collect();
        assert_eq!(ids, vec!["math", "cooking"]);
        assert_eq!(ranked[0].score, 18.0);
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let catalog = default_catalog();
        let ranked = rank(&Profile::default(), &catalog, &Flat(0.4)).unwrap();
        let ids: Vec<_> = ranked.iter().map(|s| s.game.id.clone()).collect();
        let expected: Vec<_> = catalog.iter().map(|g| g.id.clone()).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_empty_catalog_is_validation_error() {
        let empty = Catalog::new(vec![]).unwrap();
        let err = rank(&Profile::default(), &empty, &HeuristicScorer::new()).unwrap_err();
        assert!(matches!(err, HubError::Validation(_)));
        assert!(rank_with_fallback(&Profile::default(), &empty, Some(&BrokenModel)).is_err());
    }

    #[test]
    fn test_non_finite_score_is_model_unavailable() {
        let err = rank(&Profile::default(), &two_games(), &Flat(f64::NAN)).unwrap_err();
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_fallback_uses_heuristic_for_whole_pass() {
        let ranking =
            rank_with_fallback(&scenario_profile(), &two_games(), Some(&BrokenModel)).unwrap();
        assert_eq!(ranking.strategy, ScoringStrategy::Heuristic);
        assert!(ranking.fell_back);
        assert_eq!(ranking.games[0].game.id, "math");
    }

    #[test]
    fn test_working_learned_scorer_is_used() {
        let ranking = rank_with_fallback(&scenario_profile(), &two_games(), Some(&Flat(0.9))).unwrap();
        assert_eq!(ranking.strategy, ScoringStrategy::Learned);
        assert!(!ranking.fell_back);
        assert!(ranking.games.iter().all(|s| s.score == 0.9));
    }

    #[test]
    fn test_no_learned_scorer_is_not_a_fallback() {
        let ranking = rank_with_fallback(&scenario_profile(), &two_games(), None).unwrap();
        assert_eq!(ranking.strategy, ScoringStrategy::Heuristic);
        assert!(!ranking.fell_back);
    }

    #[test]
    fn test_select_top_dedups_and_bounds() {
        let game = Game::new("a", "A", Category::Math, AgeRange::new(4, 9));
        let other = Game::new("b", "B", Category::Math, AgeRange::new(4, 9));
        let ranked = vec![
            ScoredGame { game: game.clone(), score: 3.0 },
            ScoredGame { game: game.clone(), score: 2.0 },
            ScoredGame { game: other, score: 1.0 },
        ];
        let top = select_top(&ranked, 3);
        let ids: Vec<_> = top.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert!(select_top(&ranked, 0).is_empty());
        assert!(select_top(&[], 3).is_empty());
    }
}
