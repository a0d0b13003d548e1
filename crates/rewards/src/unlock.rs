use learnhub_core::{Catalog, Game};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Spins granted by every profile-driven recommendation cycle.
pub const SPIN_ALLOTMENT: u32 = 3;

/// Catalog positions unlocked for a first-time user.
pub const STARTER_POSITIONS: [usize; 3] = [0, 1, 3];

/// Caller-held unlock progress.
///
/// Ids are unique; insertion order is kept for display only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockState {
    unlocked: Vec<String>,
    /// Spins remaining, never negative.
    pub spins_left: u32,
    /// Id unlocked by the most recent successful spin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_spin: Option<String>,
}

impl Default for UnlockState {
    fn default() -> Self {
        Self {
            unlocked: Vec::new(),
            spins_left: SPIN_ALLOTMENT,
            last_spin: None,
        }
    }
}

impl UnlockState {
    /// Build a state, collapsing duplicate ids.
    pub fn new<I, S>(unlocked: I, spins_left: u32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut state = Self {
            unlocked: Vec::new(),
            spins_left,
            last_spin: None,
        };
        for id in unlocked {
            state.insert(id.into());
        }
        state
    }

    /// Rebuild state from stored values, repairing whatever is inconsistent.
    ///
    /// Ids unknown to `catalog` are dropped. When nothing usable remains the
    /// starter games are unlocked. A missing or negative spin count becomes
    /// [`SPIN_ALLOTMENT`].
    pub fn restore(catalog: &Catalog, stored_ids: Option<Vec<String>>, stored_spins: Option<i64>) -> Self {
        let stored_len = stored_ids.as_ref().map_or(0, Vec::len);
        let known: Vec<String> = stored_ids
            .unwrap_or_default()
            .into_iter()
            .filter(|id| catalog.contains(id))
            .collect();

        let unlocked = if known.is_empty() {
            debug!(stored = stored_len, "no usable unlocked ids, granting starter games");
            starter_unlocks(catalog)
        } else {
            known
        };

        let spins_left = match stored_spins {
            Some(n) if n >= 0 => u32::try_from(n).unwrap_or(u32::MAX),
            _ => SPIN_ALLOTMENT,
        };

        Self::new(unlocked, spins_left)
    }

    /// Unlocked ids in insertion order.
    pub fn unlocked(&self) -> &[String] {
        &self.unlocked
    }

    /// True when `id` is unlocked.
    pub fn is_unlocked(&self, id: &str) -> bool {
        self.unlocked.iter().any(|u| u == id)
    }

    /// Catalog games that are still locked, in catalog order.
    pub fn locked<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Game> {
        catalog.iter().filter(|g| !self.is_unlocked(&g.id)).collect()
    }

    pub(crate) fn insert(&mut self, id: String) -> bool {
        if self.is_unlocked(&id) {
            return false;
        }
        self.unlocked.push(id);
        true
    }
}

/// Ids of the starter games present in `catalog`.
pub fn starter_unlocks(catalog: &Catalog) -> Vec<String> {
    STARTER_POSITIONS
        .iter()
        .filter_map(|&idx| catalog.games().get(idx))
        .map(|g| g.id.clone())
        .collect()
}

/// Restore the spin allotment after a recommendation cycle.
#[must_use]
pub fn reset_spins_for_new_recommendations(state: &UnlockState) -> UnlockState {
    UnlockState {
        spins_left: SPIN_ALLOTMENT,
        ..state.clone()
    }
}

/// Replace the unlocked set with the recommended games.
///
/// Games unlocked by earlier spins are dropped; a retaken survey starts
/// discovery over.
#[must_use]
pub fn apply_recommendation_unlocks(state: &UnlockState, top: &[Game]) -> UnlockState {
    let next = UnlockState::new(top.iter().map(|g| g.id.clone()), state.spins_left);
    info!(unlocked = ?next.unlocked, replaced = state.unlocked.len(), "applied recommendation unlocks");
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use learnhub_core::default_catalog;

    #[test]
    fn test_new_collapses_duplicates() {
        let state = UnlockState::new(["a", "b", "a"], 2);
        assert_eq!(state.unlocked(), &["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_first_time_user_gets_starters() {
        let catalog = default_catalog();
        let state = UnlockState::restore(&catalog, None, None);
        assert_eq!(
            state.unlocked(),
            &["math-puzzle".to_string(), "word-explorer".to_string(), "memory-match".to_string()]
        );
        assert_eq!(state.spins_left, SPIN_ALLOTMENT);
    }

    #[test]
    fn test_restore_drops_unknown_ids() {
        let catalog = default_catalog();
        let state = UnlockState::restore(
            &catalog,
            Some(vec!["paint-studio".into(), "retired-game".into(), "paint-studio".into()]),
            Some(1),
        );
        assert_eq!(state.unlocked(), &["paint-studio".to_string()]);
        assert_eq!(state.spins_left, 1);
    }

    #[test]
    fn test_restore_with_only_unknown_ids_grants_starters() {
        let catalog = default_catalog();
        let state = UnlockState::restore(&catalog, Some(vec!["gone".into()]), Some(0));
        assert_eq!(state.unlocked().len(), 3);
        assert_eq!(state.spins_left, 0);
    }

    #[test]
    fn test_restore_negative_spins_uses_allotment() {
        let state = UnlockState::restore(&default_catalog(), None, Some(-4));
        assert_eq!(state.spins_left, SPIN_ALLOTMENT);
    }

    #[test]
    fn test_starters_skip_missing_positions() {
        let catalog = Catalog::new(default_catalog().games()[..2].to_vec()).unwrap();
        assert_eq!(starter_unlocks(&catalog).len(), 2);
        assert!(starter_unlocks(&Catalog::default()).is_empty());
    }

    #[test]
    fn test_recommendation_unlocks_replace_and_spins_reset() {
        let catalog = default_catalog();
        let before = UnlockState::new(["paint-studio", "science-lab"], 0);
        let top: Vec<Game> = catalog.games()[..3].to_vec();

        let after = reset_spins_for_new_recommendations(&apply_recommendation_unlocks(&before, &top));
        let ids: Vec<_> = top.iter().map(|g| g.id.clone()).collect();
        assert_eq!(after.unlocked(), ids.as_slice());
        assert!(!after.is_unlocked("paint-studio"));
        assert_eq!(after.spins_left, SPIN_ALLOTMENT);
    }

    #[test]
    fn test_locked_excludes_unlocked() {
        let catalog = default_catalog();
        let state = UnlockState::new(["math-puzzle"], 3);
        let locked = state.locked(&catalog);
        assert_eq!(locked.len(), catalog.len() - 1);
        assert!(locked.iter().all(|g| g.id != "math-puzzle"));
    }

    #[test]
    fn test_serde_shape() {
        let state = UnlockState::new(["a"], 2);
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, r#"{"unlocked":["a"],"spins_left":2}"#);
    }
}
