//! Manages learnhub configuration and persisted state.
//!
//! This crate provides utilities for:
//! - Resolving configuration from `LEARNHUB_*` environment variables and `settings.toml`.
//! - A small key-value store boundary with in-memory and JSON-file backends.
//! - Loading and saving a tolerant [`Snapshot`] of everything the engine persists.

pub mod env;
pub mod persistence;

pub use env::{
    env_model_path, env_model_timeout_ms, env_seed, env_top_k, home_dir, load_settings,
    settings_file, state_dir, Config, Settings,
};
pub use persistence::{keys, JsonFileStore, KeyValueStore, MemoryStore, Snapshot};
