//! Shared test utilities for learnhub crates.
//!
//! Provides env-var guards, a temporary state directory, and the small
//! profiles and catalogs that recur across the workspace's tests.

use learnhub_core::{AgeGroup, AgeRange, Catalog, Category, Game, Profile};
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};

/// Serialize tests that mutate process-global state (env vars, cwd, etc).
///
/// Acquire this guard at the start of any test that modifies environment
/// variables to prevent race conditions between parallel tests.
pub fn env_guard() -> MutexGuard<'static, ()> {
    static TEST_SERIAL: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));
    TEST_SERIAL.lock().unwrap_or_else(|e| e.into_inner())
}

/// RAII guard for environment variables - restores original value on drop.
pub struct EnvVarGuard {
    key: &'static str,
    previous: Option<String>,
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        match &self.previous {
            Some(v) => std::env::set_var(self.key, v),
            None => std::env::remove_var(self.key),
        }
    }
}

/// Set an environment variable and return a guard that restores the original on drop.
///
/// # Example
/// ```
/// let _guard = learnhub_test_utils::set_env_var("LEARNHUB_TOP_K", Some("5"));
/// // LEARNHUB_TOP_K is "5" until _guard drops
/// ```
pub fn set_env_var(key: &'static str, value: Option<&str>) -> EnvVarGuard {
    let previous = std::env::var(key).ok();
    match value {
        Some(val) => std::env::set_var(key, val),
        None => std::env::remove_var(key),
    }
    EnvVarGuard { key, previous }
}

/// Temporary learnhub home directory.
///
/// The tempdir is removed when this struct is dropped.
pub struct TestFixture {
    pub tempdir: tempfile::TempDir,
    /// Directory to use as `LEARNHUB_HOME`.
    pub home: PathBuf,
}

impl TestFixture {
    /// Create a fixture with an empty `learnhub` directory inside a tempdir.
    ///
    /// Does NOT set `LEARNHUB_HOME`; use [`TestFixture::home_guard`] for that.
    pub fn new() -> std::io::Result<Self> {
        let tempdir = tempfile::tempdir()?;
        let home = tempdir.path().join("learnhub");
        std::fs::create_dir_all(&home)?;
        Ok(Self { tempdir, home })
    }

    /// The state directory.
    pub fn home_path(&self) -> &Path {
        &self.home
    }

    /// Point `LEARNHUB_HOME` at this fixture until the guard drops.
    pub fn home_guard(&self) -> EnvVarGuard {
        set_env_var("LEARNHUB_HOME", self.home.to_str())
    }

    /// Write a survey profile as JSON and return its path.
    pub fn write_profile(&self, name: &str, profile: &Profile) -> std::io::Result<PathBuf> {
        let path = self.tempdir.path().join(name);
        let json = serde_json::to_string_pretty(profile).map_err(std::io::Error::other)?;
        std::fs::write(&path, json)?;
        Ok(path)
    }

    /// Write an arbitrary file relative to the state directory.
    pub fn write_file(&self, name: &str, content: &str) -> std::io::Result<PathBuf> {
        let path = self.home.join(name);
        std::fs::write(&path, content)?;
        Ok(path)
    }
}

/// An 8-12 year old who wants math and likes space.
pub fn math_space_profile() -> Profile {
    Profile::builder()
        .name("Sam")
        .age_group(AgeGroup::EightToTwelve)
        .learning_goal("math")
        .interest("space")
        .build()
}

/// A math game for ages 7-12 and an arts game for ages 13-18, arts first.
pub fn two_game_catalog() -> Catalog {
    catalog_of(vec![
        Game::new("cooking", "Cooking Club", Category::Arts, AgeRange::new(13, 18)),
        Game::new("math", "Math Quest", Category::Math, AgeRange::new(7, 12)),
    ])
}

/// `count` math games `g0..g{count-1}` for ages 4-16.
pub fn numbered_catalog(count: usize) -> Catalog {
    catalog_of(
        (0..count)
            .map(|i| {
                Game::new(
                    format!("g{i}"),
                    format!("Game {i}"),
                    Category::Math,
                    AgeRange::new(4, 16),
                )
            })
            .collect(),
    )
}

fn catalog_of(games: Vec<Game>) -> Catalog {
    match Catalog::new(games) {
        Ok(catalog) => catalog,
        Err(e) => panic!("fixture catalog is invalid: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_guard_serializes_tests() {
        let _g = env_guard();
    }

    #[test]
    fn test_set_env_var_sets_and_restores() {
        let _g = env_guard();

        const KEY: &str = "LEARNHUB_TEST_UTILS_TEST_VAR";
        std::env::remove_var(KEY);

        {
            let _guard = set_env_var(KEY, Some("test_value"));
            assert_eq!(std::env::var(KEY).ok(), Some("test_value".to_string()));
        }
        assert!(std::env::var(KEY).is_err());
    }

    #[test]
    fn test_set_env_var_removes_when_none() {
        let _g = env_guard();

        const KEY: &str = "LEARNHUB_TEST_REMOVE_VAR";
        std::env::set_var(KEY, "exists");

        {
            let _guard = set_env_var(KEY, None);
            assert!(std::env::var(KEY).is_err());
        }
        assert_eq!(std::env::var(KEY).ok(), Some("exists".to_string()));

        std::env::remove_var(KEY);
    }

    #[test]
    fn test_fixture_creates_home() {
        let fixture = TestFixture::new().expect("fixture creation");
        assert!(fixture.home_path().is_dir());
    }

    #[test]
    fn test_fixture_home_guard() {
        let _g = env_guard();
        let fixture = TestFixture::new().expect("fixture creation");

        let original = std::env::var("LEARNHUB_HOME").ok();
        {
            let _home = fixture.home_guard();
            assert_eq!(
                std::env::var("LEARNHUB_HOME").unwrap(),
                fixture.home_path().to_str().unwrap()
            );
        }
        assert_eq!(std::env::var("LEARNHUB_HOME").ok(), original);
    }

    #[test]
    fn test_write_profile_is_readable() {
        let fixture = TestFixture::new().expect("fixture creation");
        let path = fixture
            .write_profile("profile.json", &math_space_profile())
            .expect("write profile");
        let text = std::fs::read_to_string(path).unwrap();
        let back: Profile = serde_json::from_str(&text).unwrap();
        assert_eq!(back, math_space_profile());
    }

    #[test]
    fn test_settings_file_lands_in_home() {
        let fixture = TestFixture::new().expect("fixture creation");
        let path = fixture
            .write_file("settings.toml", "top_k = 4\n")
            .expect("write settings");
        let parsed: toml::Value = toml::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(parsed["top_k"].as_integer(), Some(4));
    }

    #[test]
    fn test_catalog_fixtures() {
        assert_eq!(two_game_catalog().games()[0].id, "cooking");
        assert_eq!(numbered_catalog(5).len(), 5);
    }
}
