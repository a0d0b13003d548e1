//! Per-invocation context: config, store, catalog, clock and entropy.

use crate::cli::{GlobalArgs, OutputFormat};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use learnhub_core::{default_catalog, Catalog, Profile};
use learnhub_intelligence::{load_model, LearnedScorer};
use learnhub_planner::Streak;
use learnhub_rewards::UnlockState;
use learnhub_state::{Config, JsonFileStore, Snapshot};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;
use tracing::{debug, warn};

pub(crate) struct Session {
    pub config: Config,
    pub store: JsonFileStore,
    pub catalog: Catalog,
    pub snapshot: Snapshot,
    pub today: NaiveDate,
    pub rng: StdRng,
    pub format: OutputFormat,
}

impl Session {
    pub fn open(global: &GlobalArgs) -> Result<Session> {
        let config = Config::resolve().context("failed to resolve configuration")?;
        let store = JsonFileStore::open(JsonFileStore::default_path(&config.state_dir))?;
        let catalog = load_catalog(config.catalog_path.as_deref())?;
        let snapshot = Snapshot::load(&store).context("failed to load stored state")?;
        let today = global
            .date
            .unwrap_or_else(|| chrono::Local::now().date_naive());
        let rng = match global.seed.or(config.seed) {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        debug!(
            state_dir = %config.state_dir.display(),
            %today,
            games = catalog.len(),
            "session opened"
        );

        let mut session = Session {
            config,
            store,
            catalog,
            snapshot,
            today,
            rng,
            format: global.format,
        };
        session.touch_streak()?;
        Ok(session)
    }

    /// Stored profile, or an empty one for plan-only use.
    pub fn profile_or_default(&self) -> Profile {
        self.snapshot.profile.clone().unwrap_or_default()
    }

    /// Unlock state repaired against the catalog.
    pub fn unlock_state(&self) -> UnlockState {
        UnlockState::restore(
            &self.catalog,
            self.snapshot.unlocked.clone(),
            self.snapshot.spins_left,
        )
    }

    pub fn save_unlocks(&mut self, state: &UnlockState) -> Result<()> {
        Snapshot::save_unlocks(&mut self.store, state.unlocked(), state.spins_left)?;
        self.snapshot.unlocked = Some(state.unlocked().to_vec());
        self.snapshot.spins_left = Some(i64::from(state.spins_left));
        Ok(())
    }

    /// Load the learned scorer when one is configured. Failures fall back to
    /// the heuristic and are only logged.
    pub fn learned_scorer(&self) -> Result<Option<LearnedScorer>> {
        let Some(path) = self.config.model_path.as_deref() else {
            return Ok(None);
        };
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        match rt.block_on(load_model(path, self.config.model_timeout)) {
            Ok(scorer) => Ok(Some(scorer)),
            Err(e) => {
                warn!(error = %e, "learned scorer unavailable, using heuristic");
                Ok(None)
            }
        }
    }

    fn touch_streak(&mut self) -> Result<()> {
        let next: Streak = self.snapshot.streak.touch(self.today);
        if next != self.snapshot.streak {
            Snapshot::save_streak(&mut self.store, &next)?;
            self.snapshot.streak = next;
        }
        Ok(())
    }
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    let Some(path) = path else {
        return Ok(default_catalog());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog: {}", path.display()))?;
    Catalog::from_toml_str(&text)
        .with_context(|| format!("failed to load catalog: {}", path.display()))
}
