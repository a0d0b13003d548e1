use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

const DEFAULT_MODEL_TIMEOUT_MS: u64 = 2_000;
const DEFAULT_TOP_K: usize = 3;
const SETTINGS_FILE: &str = "settings.toml";

/// Returns the user's home directory.
pub fn home_dir() -> Result<PathBuf> {
    #[cfg(unix)]
    if let Ok(home) = std::env::var("HOME") {
        return Ok(PathBuf::from(home));
    }
    dirs::home_dir().ok_or_else(|| anyhow::anyhow!("home directory not found"))
}

/// Directory holding the state file and `settings.toml`.
///
/// `LEARNHUB_HOME` wins; otherwise `~/.learnhub`.
pub fn state_dir() -> Result<PathBuf> {
    if let Ok(custom) = std::env::var("LEARNHUB_HOME") {
        if !custom.trim().is_empty() {
            return Ok(PathBuf::from(custom));
        }
    }
    Ok(home_dir()?.join(".learnhub"))
}

/// Path of the optional settings file inside `dir`.
pub fn settings_file(dir: &Path) -> PathBuf {
    dir.join(SETTINGS_FILE)
}

/// Returns the learned model path from `LEARNHUB_MODEL`.
pub fn env_model_path() -> Option<PathBuf> {
    std::env::var("LEARNHUB_MODEL")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from)
}

/// Returns the model load timeout from `LEARNHUB_MODEL_TIMEOUT_MS`.
pub fn env_model_timeout_ms() -> Option<u64> {
    std::env::var("LEARNHUB_MODEL_TIMEOUT_MS")
        .ok()
        .and_then(|s| s.trim().parse().ok())
}

/// Returns the recommendation count from `LEARNHUB_TOP_K` (zero is ignored).
pub fn env_top_k() -> Option<usize> {
    std::env::var("LEARNHUB_TOP_K")
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .filter(|k| *k > 0)
}

/// Returns the fixed RNG seed from `LEARNHUB_SEED`.
pub fn env_seed() -> Option<u64> {
    std::env::var("LEARNHUB_SEED")
        .ok()
        .and_then(|s| s.trim().parse().ok())
}

/// Settings parsed from `settings.toml`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Learned model document.
    #[serde(default)]
    pub model: Option<PathBuf>,
    /// Bounded wait for model loading.
    #[serde(default)]
    pub model_timeout_ms: Option<u64>,
    /// Number of recommended games.
    #[serde(default)]
    pub top_k: Option<usize>,
    /// Fixed RNG seed.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Catalog document replacing the built-in games.
    #[serde(default)]
    pub catalog: Option<PathBuf>,
}

/// Loads `settings.toml` from `dir` if present.
///
/// A malformed file is logged and ignored.
pub fn load_settings(dir: &Path) -> Result<Settings> {
    let path = settings_file(dir);
    if !path.exists() {
        return Ok(Settings::default());
    }
    let text = fs::read_to_string(&path)
        .with_context(|| format!("failed to read settings: {}", path.display()))?;
    match toml::from_str::<Settings>(&text) {
        Ok(settings) => Ok(settings),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring malformed settings file");
            Ok(Settings::default())
        }
    }
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// State directory.
    pub state_dir: PathBuf,
    /// Learned model document, if any.
    pub model_path: Option<PathBuf>,
    /// Bounded wait for model loading.
    pub model_timeout: Duration,
    /// Number of recommended games.
    pub top_k: usize,
    /// Fixed RNG seed, if any.
    pub seed: Option<u64>,
    /// Catalog document, if any.
    pub catalog_path: Option<PathBuf>,
}

impl Config {
    /// Resolve environment first, then `settings.toml`, then defaults.
    pub fn resolve() -> Result<Config> {
        let state_dir = state_dir()?;
        let settings = load_settings(&state_dir)?;
        Ok(Self::from_parts(state_dir, settings))
    }

    fn from_parts(state_dir: PathBuf, settings: Settings) -> Config {
        let relative = |p: PathBuf| {
            if p.is_relative() {
                state_dir.join(p)
            } else {
                p
            }
        };
        Config {
            model_path: env_model_path().or(settings.model.map(&relative)),
            model_timeout: Duration::from_millis(
                env_model_timeout_ms()
                    .or(settings.model_timeout_ms)
                    .unwrap_or(DEFAULT_MODEL_TIMEOUT_MS),
            ),
            top_k: env_top_k()
                .or(settings.top_k.filter(|k| *k > 0))
                .unwrap_or(DEFAULT_TOP_K),
            seed: env_seed().or(settings.seed),
            catalog_path: settings.catalog.map(&relative),
            state_dir,
        }
    }
}
