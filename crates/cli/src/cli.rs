use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// How command results are printed.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Options shared by every command.
#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Local date to act on (YYYY-MM-DD); defaults to today.
    #[arg(long, global = true, value_name = "DATE")]
    pub date: Option<NaiveDate>,
    /// Fixed RNG seed for spins and plans (overrides `LEARNHUB_SEED`).
    #[arg(long, global = true, value_name = "SEED")]
    pub seed: Option<u64>,
    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Command-line interface for the `learnhub` application.
#[derive(Debug, Parser)]
#[command(
    name = "learnhub",
    version,
    about = "Personalized game recommendations, daily plans and game unlocks"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,
    #[command(subcommand)]
    pub command: Commands,
}

/// Available `learnhub` commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Stores a survey profile, recommends games and unlocks them.
    Survey {
        /// Survey answers as a JSON file.
        #[arg(long, value_name = "FILE")]
        profile: PathBuf,
    },
    /// Shows the ranking for the stored profile without changing anything.
    Recommend,
    /// Spins the wheel to unlock a random locked game.
    Spin,
    /// Shows today's plan, generating it when needed.
    Plan {
        /// Discards today's plan and generates a new one.
        #[arg(long, default_value_t = false)]
        reset: bool,
    },
    /// Marks a task in today's plan done or not done.
    Toggle {
        /// Task id as shown by `learnhub plan`.
        #[arg(required = true)]
        task_id: String,
    },
    /// Summarizes unlocks, spins, today's progress and streak.
    Status,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "learnhub", "plan", "--reset", "--date", "2024-03-04", "--seed", "7", "--format", "json",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Plan { reset: true }));
        assert_eq!(cli.global.date, NaiveDate::from_ymd_opt(2024, 3, 4));
        assert_eq!(cli.global.seed, Some(7));
        assert_eq!(cli.global.format, OutputFormat::Json);
    }

    #[test]
    fn test_toggle_requires_task_id() {
        assert!(Cli::try_parse_from(["learnhub", "toggle"]).is_err());
    }

    #[test]
    fn test_rejects_bad_date() {
        assert!(Cli::try_parse_from(["learnhub", "status", "--date", "tomorrow"]).is_err());
    }
}
