//! Calling layer for the learnhub engine.
//!
//! Owns every side effect: reading configuration, loading and saving state,
//! the clock, entropy, and printing. The engine crates stay pure.

mod cli;
mod commands;
mod session;

pub use cli::{Cli, Commands, GlobalArgs, OutputFormat};

use anyhow::Result;
use clap::Parser;

/// Parse arguments, install logging and dispatch the command.
pub fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut session = session::Session::open(&cli.global)?;

    match cli.command {
        Commands::Survey { profile } => commands::handle_survey_command(&mut session, &profile),
        Commands::Recommend => commands::handle_recommend_command(&session),
        Commands::Spin => commands::handle_spin_command(&mut session),
        Commands::Plan { reset } => commands::handle_plan_command(&mut session, reset),
        Commands::Toggle { task_id } => commands::handle_toggle_command(&mut session, &task_id),
        Commands::Status => commands::handle_status_command(&session),
    }
}
