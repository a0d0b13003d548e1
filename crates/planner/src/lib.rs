//! Daily learning plans.
//!
//! This crate provides:
//! - The fixed day-of-week focus table and the per-area task templates
//! - [`DailyPlan`] generation, task toggling and explicit reset
//! - The personalized daily message
//! - Login streak and lifetime task counters
//!
//! Every function takes the current date as an argument and draws randomness
//! from a caller-supplied generator; nothing here reads the clock.

#![deny(unsafe_code)]
#![warn(missing_docs)]

/// Day-of-week focus table and task templates.
pub mod focus;
/// Personalized daily message.
pub mod message;
/// Plan generation and task toggling.
pub mod plan;
/// Streak and lifetime counters.
pub mod progress;

pub use focus::{focus_for_date, task_templates, DailyFocus, DAILY_FOCUS, TASK_TEMPLATES};
pub use message::{compose_message, progress_message};
pub use plan::{
    generate_plan, reset_plan, toggle_task, DailyPlan, Task, DAILY_GAMES, MAX_TASKS, MIN_TASKS,
};
pub use progress::{record_completions, Streak};
