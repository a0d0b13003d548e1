use crate::unlock::UnlockState;
use learnhub_core::{Catalog, Game};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

/// Result of one spin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SpinOutcome {
    /// A locked game was unlocked.
    Unlocked {
        /// The newly unlocked game.
        game: Game,
    },
    /// The spin counter is at zero.
    NoSpinsLeft,
    /// Every catalog game is already unlocked.
    AllUnlocked,
}

impl SpinOutcome {
    /// True for [`SpinOutcome::Unlocked`].
    pub fn is_success(&self) -> bool {
        matches!(self, SpinOutcome::Unlocked { .. })
    }
}

impl fmt::Display for SpinOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpinOutcome::Unlocked { game } => write!(f, "You unlocked {}!", game.name),
            SpinOutcome::NoSpinsLeft => f.write_str("No spins left today!"),
            SpinOutcome::AllUnlocked => f.write_str("All games are already unlocked!"),
        }
    }
}

/// Spin the wheel: unlock one locked game chosen uniformly at random.
///
/// On failure the returned state equals `state`.
pub fn spin<R: Rng + ?Sized>(
    catalog: &Catalog,
    state: &UnlockState,
    rng: &mut R,
) -> (UnlockState, SpinOutcome) {
    if state.spins_left == 0 {
        debug!("spin refused: no spins left");
        return (state.clone(), SpinOutcome::NoSpinsLeft);
    }

    let locked = state.locked(catalog);
    let Some(&game) = locked.choose(rng) else {
        debug!("spin refused: everything unlocked");
        return (state.clone(), SpinOutcome::AllUnlocked);
    };

    let mut next = state.clone();
    next.insert(game.id.clone());
    next.spins_left -= 1;
    next.last_spin = Some(game.id.clone());

    info!(game = %game.id, spins_left = next.spins_left, "spin unlocked a game");
    (
        next,
        SpinOutcome::Unlocked {
            game: game.clone(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use learnhub_test_utils::numbered_catalog;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    #[test]
    fn test_no_spins_left_leaves_state_alone() {
        let catalog = numbered_catalog(4);
        let state = UnlockState::new(["g0"], 0);
        let (next, outcome) = spin(&catalog, &state, &mut StdRng::seed_from_u64(1));
        assert_eq!(outcome, SpinOutcome::NoSpinsLeft);
        assert_eq!(next, state);
        assert_eq!(outcome.to_string(), "No spins left today!");
    }

    #[test]
    fn test_all_unlocked_leaves_state_alone() {
        let catalog = numbered_catalog(2);
        let state = UnlockState::new(["g0", "g1"], 3);
        let (next, outcome) = spin(&catalog, &state, &mut StdRng::seed_from_u64(1));
        assert_eq!(outcome, SpinOutcome::AllUnlocked);
        assert_eq!(next, state);
    }

    #[test]
    fn test_last_locked_game_is_chosen() {
        let catalog = numbered_catalog(3);
        let state = UnlockState::new(["g0", "g2"], 1);
        for seed in 0..10 {
            let (next, outcome) = spin(&catalog, &state, &mut StdRng::seed_from_u64(seed));
            assert!(matches!(&outcome, SpinOutcome::Unlocked { game } if game.id == "g1"));
            assert_eq!(next.spins_left, 0);
            assert_eq!(next.last_spin.as_deref(), Some("g1"));
        }
    }

    #[test]
    fn test_selection_is_roughly_uniform() {
        let catalog = numbered_catalog(4);
        let state = UnlockState::new(Vec::<String>::new(), 1);
        let mut rng = StdRng::seed_from_u64(99);
        let mut counts: HashMap<String, usize> = HashMap::new();
        for _ in 0..4000 {
            if let (_, SpinOutcome::Unlocked { game }) = spin(&catalog, &state, &mut rng) {
                *counts.entry(game.id).or_default() += 1;
            }
        }
        assert_eq!(counts.len(), 4);
        assert!(counts.values().all(|&c| (800..1200).contains(&c)), "{counts:?}");
    }

    #[test]
    fn test_spin_ignores_ids_outside_catalog() {
        let catalog = numbered_catalog(2);
        let state = UnlockState::new(["stale"], 1);
        let (next, outcome) = spin(&catalog, &state, &mut StdRng::seed_from_u64(4));
        assert!(outcome.is_success());
        assert_eq!(next.unlocked().len(), 2);
    }
}

/// Property-based checks on the spin wheel.
#[cfg(test)]
mod proptest_tests {
    use super::*;
    use learnhub_test_utils::numbered_catalog;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    proptest! {
        /// Property: each successful spin adds exactly one new id and spends one spin.
        #[test]
        fn spins_add_unique_ids(seed in any::<u64>(), games in 1usize..10, spins in 0u32..12) {
            let catalog = numbered_catalog(games);
            let mut rng = StdRng::seed_from_u64(seed);
            let mut state = UnlockState::new(Vec::<String>::new(), spins);

            for _ in 0..15 {
                let (next, outcome) = spin(&catalog, &state, &mut rng);
                if outcome.is_success() {
                    prop_assert_eq!(next.unlocked().len(), state.unlocked().len() + 1);
                    prop_assert_eq!(next.spins_left + 1, state.spins_left);
                } else {
                    prop_assert_eq!(&next, &state);
                }
                state = next;
            }

            let unique: HashSet<_> = state.unlocked().iter().collect();
            prop_assert_eq!(unique.len(), state.unlocked().len());
            prop_assert_eq!(state.unlocked().len(), games.min(spins as usize));
        }

        /// Property: with zero spins nothing ever changes.
        #[test]
        fn zero_spins_always_refuses(seed in any::<u64>(), games in 1usize..10) {
            let catalog = numbered_catalog(games);
            let state = UnlockState::new(Vec::<String>::new(), 0);
            let (next, outcome) = spin(&catalog, &state, &mut StdRng::seed_from_u64(seed));
            prop_assert_eq!(outcome, SpinOutcome::NoSpinsLeft);
            prop_assert_eq!(next, state);
        }
    }
}
