//! Handler for `spin`.

use super::print_json;
use crate::cli::OutputFormat;
use crate::session::Session;
use anyhow::Result;
use learnhub_rewards::spin;
use serde_json::json;

/// Handle the `spin` command.
pub(crate) fn handle_spin_command(session: &mut Session) -> Result<()> {
    let state = session.unlock_state();
    let (next, outcome) = spin(&session.catalog, &state, &mut session.rng);
    session.save_unlocks(&next)?;

    match session.format {
        OutputFormat::Json => print_json(&json!({
            "result": outcome,
            "spins_left": next.spins_left,
            "unlocked": next.unlocked(),
        })),
        OutputFormat::Text => {
            println!("{outcome}");
            println!("Spins left: {}", next.spins_left);
            Ok(())
        }
    }
}
