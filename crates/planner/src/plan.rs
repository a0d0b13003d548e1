use crate::focus::{focus_for_date, task_templates, DailyFocus};
use crate::message::compose_message;
use chrono::NaiveDate;
use learnhub_core::{HubError, Profile, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Fewest tasks in a plan.
pub const MIN_TASKS: usize = 3;
/// Most tasks in a plan.
pub const MAX_TASKS: usize = 5;
/// Games suggested alongside a day's tasks.
pub const DAILY_GAMES: usize = 3;

/// One concrete activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Identifier, unique within the plan.
    pub id: String,
    /// What to do.
    pub text: String,
    /// Focus area the task came from.
    pub area: String,
    /// Completion flag.
    #[serde(default)]
    pub completed: bool,
}

/// Tasks for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPlan {
    /// Local calendar date the plan belongs to.
    pub date: NaiveDate,
    /// Weekday name.
    #[serde(default)]
    pub day: String,
    /// Theme of the day.
    pub focus: String,
    /// Focus areas tasks are drawn from.
    #[serde(default)]
    pub areas: Vec<String>,
    /// Personalized message for the day.
    #[serde(default)]
    pub message: String,
    /// Between three and five tasks.
    pub tasks: Vec<Task>,
    /// Percentage of tasks completed, 0..=100.
    #[serde(default)]
    pub progress: f64,
    /// Game ids suggested for the day. Filled by the caller from its
    /// unlocked games; plan generation leaves it empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub games: Vec<String>,
}

impl DailyPlan {
    /// Number of completed tasks.
    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    /// True when the plan was generated for `date`.
    pub fn is_for(&self, date: NaiveDate) -> bool {
        self.date == date
    }

    /// Replace the day's games with the first [`DAILY_GAMES`] of `ids`.
    #[must_use]
    pub fn with_games<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.games = ids.into_iter().take(DAILY_GAMES).map(Into::into).collect();
        self
    }

    fn recompute_progress(&mut self) {
        self.progress = if self.tasks.is_empty() {
            0.0
        } else {
            100.0 * self.completed_count() as f64 / self.tasks.len() as f64
        };
    }
}

/// Today's plan: `existing` when it belongs to `date`, otherwise a fresh one.
pub fn generate_plan<R: Rng + ?Sized>(
    profile: &Profile,
    date: NaiveDate,
    existing: Option<&DailyPlan>,
    rng: &mut R,
) -> DailyPlan {
    match existing {
        Some(plan) if plan.is_for(date) => {
            debug!(%date, "reusing today's plan");
            plan.clone()
        }
        _ => build_plan(profile, date, rng),
    }
}

/// Discard any stored plan and generate a new one for `date`.
pub fn reset_plan<R: Rng + ?Sized>(profile: &Profile, date: NaiveDate, rng: &mut R) -> DailyPlan {
    build_plan(profile, date, rng)
}

/// Flip one task's completion flag and recompute progress.
pub fn toggle_task(plan: &DailyPlan, task_id: &str) -> Result<DailyPlan> {
    let mut next = plan.clone();
    let task = next
        .tasks
        .iter_mut()
        .find(|t| t.id == task_id)
        .ok_or_else(|| HubError::Validation(format!("no task `{task_id}` in today's plan")))?;
    task.completed = !task.completed;
    next.recompute_progress();
    Ok(next)
}

fn build_plan<R: Rng + ?Sized>(profile: &Profile, date: NaiveDate, rng: &mut R) -> DailyPlan {
    let focus = focus_for_date(date);
    let mut picked: Vec<(&str, &str)> = Vec::with_capacity(MAX_TASKS);

    for &area in focus.areas {
        if picked.len() >= MAX_TASKS {
            break;
        }
        if let Some(text) = pick_unused(area, &picked, rng) {
            picked.push((area, text));
        }
    }

    // Top up from the day's own areas so every task stays on theme.
    while picked.len() < MIN_TASKS {
        let pool = unused_in_focus(focus, &picked);
        match pool.choose(rng) {
            Some(&choice) => picked.push(choice),
            None => break,
        }
    }

    let tasks = picked
        .into_iter()
        .enumerate()
        .map(|(idx, (area, text))| Task {
            id: format!("{date}-{}", idx + 1),
            text: text.to_string(),
            area: area.to_string(),
            completed: false,
        })
        .collect::<Vec<_>>();

    info!(%date, focus = focus.focus, tasks = tasks.len(), "generated daily plan");

    DailyPlan {
        date,
        day: focus.day.to_string(),
        focus: focus.focus.to_string(),
        areas: focus.areas.iter().map(|a| a.to_string()).collect(),
        message: compose_message(profile, focus),
        tasks,
        progress: 0.0,
        games: Vec::new(),
    }
}

fn pick_unused<R: Rng + ?Sized>(
    area: &str,
    picked: &[(&str, &str)],
    rng: &mut R,
) -> Option<&'static str> {
    let phrases = task_templates(area)?;
    let fresh: Vec<&'static str> = phrases
        .iter()
        .copied()
        .filter(|p| !picked.iter().any(|(_, text)| text == p))
        .collect();
    fresh.choose(rng).copied()
}

fn unused_in_focus(focus: &DailyFocus, picked: &[(&str, &str)]) -> Vec<(&'static str, &'static str)> {
    focus
        .areas
        .iter()
        .filter_map(|area| task_templates(area).map(|phrases| (*area, phrases)))
        .flat_map(|(area, phrases)| phrases.iter().map(move |p| (area, *p)))
        .filter(|(_, p)| !picked.iter().any(|(_, text)| text == p))
        .collect()
}
