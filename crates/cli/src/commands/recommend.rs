//! Handlers for `survey` and `recommend`.

use super::print_json;
use crate::cli::OutputFormat;
use crate::session::Session;
use anyhow::{Context, Result};
use learnhub_core::Profile;
use learnhub_intelligence::{recommend, Recommendation, Scorer};
use learnhub_rewards::{apply_recommendation_unlocks, reset_spins_for_new_recommendations};
use learnhub_state::Snapshot;
use serde_json::json;
use std::path::Path;

/// Handle the `survey` command.
pub(crate) fn handle_survey_command(session: &mut Session, profile_path: &Path) -> Result<()> {
    let text = std::fs::read_to_string(profile_path)
        .with_context(|| format!("failed to read profile: {}", profile_path.display()))?;
    let profile: Profile = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse profile: {}", profile_path.display()))?;
    // Nothing is stored until the cycle succeeds.
    let rec = run_cycle(session, &profile)?;

    let state = session.unlock_state();
    let state = reset_spins_for_new_recommendations(&apply_recommendation_unlocks(&state, &rec.top));
    Snapshot::save_profile(&mut session.store, &profile)?;
    session.save_unlocks(&state)?;
    session.snapshot.profile = Some(profile);

    match session.format {
        OutputFormat::Json => print_json(&json!({
            "recommendation": rec,
            "unlocked": state.unlocked(),
            "spins_left": state.spins_left,
        })),
        OutputFormat::Text => {
            print_recommendation(&rec, false);
            println!(
                "\nUnlocked: {}. You have {} spins.",
                rec.top
                    .iter()
                    .map(|g| g.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
                state.spins_left
            );
            Ok(())
        }
    }
}

/// Handle the `recommend` command.
pub(crate) fn handle_recommend_command(session: &Session) -> Result<()> {
    let Some(profile) = session.snapshot.profile.as_ref() else {
        anyhow::bail!("no survey profile stored; run `learnhub survey --profile <FILE>` first");
    };
    let rec = run_cycle(session, profile)?;

    match session.format {
        OutputFormat::Json => print_json(&json!({ "recommendation": rec })),
        OutputFormat::Text => {
            print_recommendation(&rec, true);
            Ok(())
        }
    }
}

fn run_cycle(session: &Session, profile: &Profile) -> Result<Recommendation> {
    let learned = session.learned_scorer()?;
    let scorer = learned.as_ref().map(|s| s as &dyn Scorer);
    recommend(profile, &session.catalog, scorer, session.config.top_k)
        .context("recommendation failed")
}

fn print_recommendation(rec: &Recommendation, full_ranking: bool) {
    println!("{}", rec.summary);
    if full_ranking {
        println!("\nRanking ({}):", rec.ranking.strategy.label());
        for (idx, scored) in rec.ranking.games.iter().enumerate() {
            println!(
                "  {:>2}. {:<24} {:>7.2}",
                idx + 1,
                scored.game.name,
                scored.score
            );
        }
    }
    println!("\nWhy these games:");
    for explanation in &rec.explanations {
        println!("  - {}", explanation.text);
    }
}
