//! Key-value persistence boundary.
//!
//! The engine itself never touches storage. The caller loads a [`Snapshot`]
//! from a [`KeyValueStore`], drives the pure core with it, and saves the
//! values that changed.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use learnhub_core::{HubError, Profile};
use learnhub_planner::{DailyPlan, Streak};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Logical storage keys.
pub mod keys {
    /// Survey profile (JSON).
    pub const SURVEY_DATA: &str = "surveyData";
    /// Unlocked game ids (JSON array).
    pub const UNLOCKED_GAMES: &str = "unlockedGames";
    /// Remaining spins (integer).
    pub const SPINS_LEFT: &str = "spinsLeft";
    /// Today's plan (JSON).
    pub const DAILY_TASKS: &str = "dailyTasks";
    /// Date of the stored plan (`YYYY-MM-DD`).
    pub const DAILY_TASKS_DATE: &str = "dailyTasksDate";
    /// Lifetime completed tasks (integer).
    pub const TOTAL_TASKS_COMPLETED: &str = "totalTasksCompleted";
    /// Current streak (integer).
    pub const CURRENT_STREAK: &str = "currentStreak";
    /// Last active date (`YYYY-MM-DD`).
    pub const LAST_ACTIVE_DATE: &str = "lastActiveDate";

    /// Every key, in storage order.
    pub const ALL: [&str; 8] = [
        SURVEY_DATA,
        UNLOCKED_GAMES,
        SPINS_LEFT,
        DAILY_TASKS,
        DAILY_TASKS_DATE,
        TOTAL_TASKS_COMPLETED,
        CURRENT_STREAK,
        LAST_ACTIVE_DATE,
    ];
}

/// Single-key string storage. No cross-key transactions.
pub trait KeyValueStore {
    /// Read a value.
    fn get(&self, key: &str) -> Result<Option<String>>;
    /// Write a value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    /// Delete a value. Missing keys are not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Store backed by one JSON object file, rewritten on every change.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open (or lazily create) the store at `path`.
    ///
    /// A file that is not a JSON object of strings is logged and treated as empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = read_entries(&path)
            .with_context(|| format!("failed to initialize store from: {}", path.display()))?;
        Ok(Self { path, entries })
    }

    /// Default store file inside `dir`.
    pub fn default_path(dir: &Path) -> PathBuf {
        dir.join("state.json")
    }

    /// Backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create store directory: {}", parent.display())
            })?;
        }
        let data =
            serde_json::to_string_pretty(&self.entries).context("failed to serialize state")?;

        // Write to a sibling temp file, then rename over the original.
        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, &data)
            .with_context(|| format!("failed to write temp file: {}", temp_path.display()))?;
        fs::rename(&temp_path, &self.path)
            .with_context(|| format!("failed to rename temp file to: {}", self.path.display()))?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.persist()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }
}

fn read_entries(path: &Path) -> Result<BTreeMap<String, String>> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read store file: {}", path.display()))?;
    match serde_json::from_str(&text) {
        Ok(entries) => Ok(entries),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "store file is corrupt, starting empty");
            Ok(BTreeMap::new())
        }
    }
}

/// Everything the engine persists, decoded leniently.
///
/// Unlock data stays raw here; repairing it against the catalog is the
/// rewards crate's job.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    /// Stored survey profile.
    pub profile: Option<Profile>,
    /// Stored unlocked ids, unvalidated.
    pub unlocked: Option<Vec<String>>,
    /// Stored spin count, possibly negative.
    pub spins_left: Option<i64>,
    /// Stored daily plan.
    pub plan: Option<DailyPlan>,
    /// Lifetime completed tasks.
    pub total_completed: u64,
    /// Login streak.
    pub streak: Streak,
}

impl Snapshot {
    /// Read every key. Missing or corrupt values become defaults; only
    /// store failures are errors.
    pub fn load(store: &dyn KeyValueStore) -> Result<Snapshot> {
        let mut plan: Option<DailyPlan> = read_json(store, keys::DAILY_TASKS)?;
        let plan_date: Option<NaiveDate> = read_date(store, keys::DAILY_TASKS_DATE)?;
        if let (Some(p), Some(d)) = (plan.as_ref(), plan_date) {
            if p.date != d {
                warn!(plan = %p.date, stamp = %d, "plan date stamp disagrees, discarding plan");
                plan = None;
            }
        }

        let snapshot = Snapshot {
            profile: read_json(store, keys::SURVEY_DATA)?,
            unlocked: read_json(store, keys::UNLOCKED_GAMES)?,
            spins_left: read_parsed(store, keys::SPINS_LEFT)?,
            plan,
            total_completed: read_parsed(store, keys::TOTAL_TASKS_COMPLETED)?.unwrap_or(0),
            streak: Streak {
                current: read_parsed(store, keys::CURRENT_STREAK)?.unwrap_or(0),
                last_active: read_date(store, keys::LAST_ACTIVE_DATE)?,
            },
        };
        debug!(
            has_profile = snapshot.profile.is_some(),
            has_plan = snapshot.plan.is_some(),
            "loaded snapshot"
        );
        Ok(snapshot)
    }

    /// Write the profile.
    pub fn save_profile(store: &mut dyn KeyValueStore, profile: &Profile) -> Result<()> {
        let json = serde_json::to_string(profile).context("failed to serialize profile")?;
        store.set(keys::SURVEY_DATA, &json)
    }

    /// Write the unlocked ids and spin count.
    pub fn save_unlocks(
        store: &mut dyn KeyValueStore,
        unlocked: &[String],
        spins_left: u32,
    ) -> Result<()> {
        let json = serde_json::to_string(unlocked).context("failed to serialize unlocked ids")?;
        store.set(keys::UNLOCKED_GAMES, &json)?;
        store.set(keys::SPINS_LEFT, &spins_left.to_string())
    }

    /// Write the plan and its date stamp.
    pub fn save_plan(store: &mut dyn KeyValueStore, plan: &DailyPlan) -> Result<()> {
        let json = serde_json::to_string(plan).context("failed to serialize plan")?;
        store.set(keys::DAILY_TASKS, &json)?;
        store.set(keys::DAILY_TASKS_DATE, &plan.date.to_string())
    }

    /// Write the lifetime completed counter.
    pub fn save_total_completed(store: &mut dyn KeyValueStore, total: u64) -> Result<()> {
        store.set(keys::TOTAL_TASKS_COMPLETED, &total.to_string())
    }

    /// Write the streak.
    pub fn save_streak(store: &mut dyn KeyValueStore, streak: &Streak) -> Result<()> {
        store.set(keys::CURRENT_STREAK, &streak.current.to_string())?;
        match streak.last_active {
            Some(day) => store.set(keys::LAST_ACTIVE_DATE, &day.to_string()),
            None => store.remove(keys::LAST_ACTIVE_DATE),
        }
    }
}

fn read_raw(store: &dyn KeyValueStore, key: &str) -> Result<Option<String>> {
    store.get(key).map_err(|e| {
        HubError::StorageRead {
            key: key.to_string(),
            reason: format!("{e:#}"),
        }
        .into()
    })
}

fn read_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>> {
    let Some(raw) = read_raw(store, key)? else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            warn!(key, error = %e, "ignoring corrupt stored value");
            Ok(None)
        }
    }
}

fn read_parsed<T: std::str::FromStr>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>> {
    let Some(raw) = read_raw(store, key)? else {
        return Ok(None);
    };
    match raw.trim().parse() {
        Ok(value) => Ok(Some(value)),
        Err(_) => {
            warn!(key, value = %raw, "ignoring unparsable stored value");
            Ok(None)
        }
    }
}

fn read_date(store: &dyn KeyValueStore, key: &str) -> Result<Option<NaiveDate>> {
    read_parsed(store, key)
}
