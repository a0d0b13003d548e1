//! Command-line interface for the `learnhub` application.
//!
//! This crate serves as the main entry point for the executable, delegating
//! its functionality to [`learnhub::run`].

fn main() -> anyhow::Result<()> {
    learnhub::run()
}
