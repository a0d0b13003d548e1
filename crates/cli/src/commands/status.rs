//! Handler for `status`.

use super::print_json;
use crate::cli::OutputFormat;
use crate::session::Session;
use anyhow::Result;
use learnhub_planner::progress_message;
use serde_json::json;

/// Handle the `status` command.
pub(crate) fn handle_status_command(session: &Session) -> Result<()> {
    let state = session.unlock_state();
    let plan = session
        .snapshot
        .plan
        .as_ref()
        .filter(|p| p.is_for(session.today));
    let unlocked: Vec<&str> = state
        .unlocked()
        .iter()
        .filter_map(|id| session.catalog.get(id))
        .map(|g| g.name.as_str())
        .collect();
    let streak = session.snapshot.streak;

    match session.format {
        OutputFormat::Json => print_json(&json!({
            "profile": session.snapshot.profile,
            "unlocked": state.unlocked(),
            "locked": state.locked(&session.catalog).len(),
            "spins_left": state.spins_left,
            "today": session.today,
            "progress": plan.map(|p| p.progress),
            "total_completed": session.snapshot.total_completed,
            "streak": streak,
        })),
        OutputFormat::Text => {
            match session.snapshot.profile.as_ref().and_then(|p| p.name.as_deref()) {
                Some(name) => println!("Learner: {name}"),
                None if session.snapshot.profile.is_some() => println!("Learner: (unnamed)"),
                None => println!("Learner: no survey yet"),
            }
            println!(
                "Unlocked games ({}/{}): {}",
                unlocked.len(),
                session.catalog.len(),
                unlocked.join(", ")
            );
            println!("Spins left: {}", state.spins_left);
            match plan {
                Some(p) => println!(
                    "Today: {}/{} tasks, {:.0}% - {}",
                    p.completed_count(),
                    p.tasks.len(),
                    p.progress,
                    progress_message(p.progress)
                ),
                None => println!("Today: no plan yet; run `learnhub plan`"),
            }
            println!("Tasks completed overall: {}", session.snapshot.total_completed);
            println!("Streak: {} day(s)", streak.current);
            Ok(())
        }
    }
}
