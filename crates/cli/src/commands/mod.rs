//! Command handlers. Each loads what it needs from the session, calls the
//! engine, saves what changed and prints the result.

mod plan;
mod recommend;
mod spin;
mod status;

pub(crate) use plan::{handle_plan_command, handle_toggle_command};
pub(crate) use recommend::{handle_recommend_command, handle_survey_command};
pub(crate) use spin::handle_spin_command;
pub(crate) use status::handle_status_command;

use anyhow::{Context, Result};
use serde_json::Value;

fn print_json(value: &Value) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("failed to render JSON output")?;
    println!("{text}");
    Ok(())
}
