//! Spin sessions from a fresh allotment to exhaustion.

use learnhub_core::default_catalog;
use learnhub_rewards::{
    apply_recommendation_unlocks, reset_spins_for_new_recommendations, spin, SpinOutcome,
    UnlockState, SPIN_ALLOTMENT,
};
use learnhub_test_utils::numbered_catalog;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

#[test]
fn three_spins_then_refusal() {
    let catalog = numbered_catalog(5);
    let mut rng = StdRng::seed_from_u64(11);
    let mut state = UnlockState::new(Vec::<String>::new(), SPIN_ALLOTMENT);

    for _ in 0..3 {
        let (next, outcome) = spin(&catalog, &state, &mut rng);
        assert!(outcome.is_success());
        state = next;
    }
    assert_eq!(state.spins_left, 0);
    assert_eq!(state.unlocked().len(), 3);
    assert_eq!(state.unlocked().iter().collect::<HashSet<_>>().len(), 3);

    let (after, outcome) = spin(&catalog, &state, &mut rng);
    assert_eq!(outcome, SpinOutcome::NoSpinsLeft);
    assert_eq!(after, state);
}

#[test]
fn fully_unlocked_catalog_refuses() {
    let catalog = default_catalog();
    let state = UnlockState::new(catalog.iter().map(|g| g.id.clone()), 2);
    let (after, outcome) = spin(&catalog, &state, &mut StdRng::seed_from_u64(0));
    assert_eq!(outcome, SpinOutcome::AllUnlocked);
    assert_eq!(after, state);
}

#[test]
fn survey_retake_restarts_discovery() {
    let catalog = default_catalog();
    let mut rng = StdRng::seed_from_u64(3);
    let mut state = UnlockState::restore(&catalog, None, None);
    for _ in 0..3 {
        state = spin(&catalog, &state, &mut rng).0;
    }
    assert_eq!(state.unlocked().len(), 6);

    let top = catalog.games()[6..9].to_vec();
    let state = reset_spins_for_new_recommendations(&apply_recommendation_unlocks(&state, &top));
    assert_eq!(state.unlocked().len(), 3);
    assert_eq!(state.spins_left, SPIN_ALLOTMENT);
    assert!(top.iter().all(|g| state.is_unlocked(&g.id)));
}
