//! Handlers for `plan` and `toggle`.

use super::print_json;
use crate::cli::OutputFormat;
use crate::session::Session;
use anyhow::Result;
use learnhub_planner::{
    generate_plan, progress_message, record_completions, reset_plan, toggle_task, DailyPlan,
};
use learnhub_state::Snapshot;
use serde_json::json;

/// Handle the `plan` command.
pub(crate) fn handle_plan_command(session: &mut Session, reset: bool) -> Result<()> {
    let plan = if reset {
        let profile = session.profile_or_default();
        reset_plan(&profile, session.today, &mut session.rng)
    } else {
        todays_plan(session)
    };
    let plan = with_unlocked_games(session, plan);
    save_plan(session, &plan)?;
    print_plan(session, &plan)
}

/// Handle the `toggle` command.
pub(crate) fn handle_toggle_command(session: &mut Session, task_id: &str) -> Result<()> {
    let plan = todays_plan(session);
    let plan = with_unlocked_games(session, plan);
    let before = plan.completed_count();
    let plan = toggle_task(&plan, task_id)?;

    let gained = record_completions(before, plan.completed_count());
    if gained > 0 {
        let total = session.snapshot.total_completed.saturating_add(gained);
        Snapshot::save_total_completed(&mut session.store, total)?;
        session.snapshot.total_completed = total;
    }
    save_plan(session, &plan)?;
    print_plan(session, &plan)
}

fn todays_plan(session: &mut Session) -> DailyPlan {
    let profile = session.profile_or_default();
    generate_plan(
        &profile,
        session.today,
        session.snapshot.plan.as_ref(),
        &mut session.rng,
    )
}

/// The day's games are the first unlocked ones, refreshed on every run.
fn with_unlocked_games(session: &Session, plan: DailyPlan) -> DailyPlan {
    let state = session.unlock_state();
    plan.with_games(state.unlocked().iter().cloned())
}

fn save_plan(session: &mut Session, plan: &DailyPlan) -> Result<()> {
    if session.snapshot.plan.as_ref() != Some(plan) {
        Snapshot::save_plan(&mut session.store, plan)?;
        session.snapshot.plan = Some(plan.clone());
    }
    Ok(())
}

fn print_plan(session: &Session, plan: &DailyPlan) -> Result<()> {
    match session.format {
        OutputFormat::Json => print_json(&json!({
            "plan": plan,
            "progress_message": progress_message(plan.progress),
        })),
        OutputFormat::Text => {
            println!("{} ({}): focus on {}", plan.day, plan.date, plan.focus);
            if !plan.message.is_empty() {
                println!("{}", plan.message);
            }
            println!();
            for task in &plan.tasks {
                let mark = if task.completed { "x" } else { " " };
                println!("  [{mark}] {:<14} {} ({})", task.id, task.text, task.area);
            }
            if !plan.games.is_empty() {
                let names: Vec<&str> = plan
                    .games
                    .iter()
                    .map(|id| session.catalog.get(id).map_or(id.as_str(), |g| g.name.as_str()))
                    .collect();
                println!("\nGames for today: {}", names.join(", "));
            }
            println!(
                "\nProgress: {:.0}% - {}",
                plan.progress,
                progress_message(plan.progress)
            );
            Ok(())
        }
    }
}
