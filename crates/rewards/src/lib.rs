//! Game unlocks for learnhub.
//!
//! The unlocked set and the spin counter live in an [`UnlockState`] value
//! owned by the caller. Every operation takes the current state and returns
//! the next one; running out of spins or games is an outcome, not an error.

#![deny(unsafe_code)]
#![warn(missing_docs)]

/// Unlocked set, starter games and recommendation unlocks.
pub mod unlock;
/// The spin wheel.
pub mod wheel;

pub use unlock::{
    apply_recommendation_unlocks, reset_spins_for_new_recommendations, starter_unlocks,
    UnlockState, SPIN_ALLOTMENT, STARTER_POSITIONS,
};
pub use wheel::{spin, SpinOutcome};
