use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Consecutive-day activity streak.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    /// Days in a row, counting the last active day.
    pub current: u32,
    /// Last day the user was active.
    pub last_active: Option<NaiveDate>,
}

impl Streak {
    /// Record activity on `today`.
    ///
    /// First use starts at 1, the same day is unchanged, the next day adds
    /// one, and any gap (or a last-active date in the future) restarts at 1.
    #[must_use]
    pub fn touch(self, today: NaiveDate) -> Streak {
        let current = match self.last_active {
            None => 1,
            Some(last) => match (today - last).num_days() {
                0 => return self,
                1 => self.current.saturating_add(1).max(1),
                _ => 1,
            },
        };
        debug!(%today, current, "streak updated");
        Streak {
            current,
            last_active: Some(today),
        }
    }
}

/// Tasks newly completed between two observations of today's plan.
///
/// Un-completing a task never reduces the lifetime total.
pub fn record_completions(previous_completed: usize, current_completed: usize) -> u64 {
    current_completed.saturating_sub(previous_completed) as u64
}
