//! # vp-config
//!
//! Layered configuration loading for Valoparc using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`VALOPARC_*` prefix, `__` as separator)
//! 2. Project-level `.valoparc/config.toml`
//! 3. User-level `~/.config/valoparc/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `VALOPARC_DATABASE__PATH` -> `database.path`,
//! `VALOPARC_BACKUP__BUCKET_NAME` -> `backup.bucket_name`, etc. The `__`
//! (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use vp_config::VpConfig;
//!
//! // Load from all sources (dotenvy + TOML + env):
//! let config = VpConfig::load_with_dotenv().expect("config");
//!
//! // Or without dotenvy (env vars must already be set):
//! let config = VpConfig::load().expect("config");
//!
//! if config.backup.is_configured() {
//!     println!("Backup bucket: {}", config.backup.bucket_name);
//! }
//! ```

mod backup;
mod database;
mod documents;
mod error;

pub use backup::BackupConfig;
pub use database::DatabaseConfig;
pub use documents::DocumentsConfig;
pub use error::ConfigError;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct VpConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub documents: DocumentsConfig,
    #[serde(default)]
    pub backup: BackupConfig,
}

impl VpConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`load_with_dotenv`] if you need `.env`
    /// file loading.
    ///
    /// Precedence (highest to lowest):
    /// 1. Environment variables (`VALOPARC_*` prefix)
    /// 2. `.valoparc/config.toml` (project-local)
    /// 3. `~/.config/valoparc/config.toml` (user-global)
    /// 4. Default values
    ///
    /// [`load_with_dotenv`]: Self::load_with_dotenv
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Calls `dotenvy` to load the `.env` file from the workspace root before
    /// building the figment. This is the typical entry point for tools and tests.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".valoparc/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment = figment.merge(Env::prefixed("VALOPARC_").split("__"));

        figment
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("valoparc").join("config.toml"))
    }

    /// Load `.env` from the workspace root.
    ///
    /// Walks up from `CARGO_MANIFEST_DIR` (if available) or current dir looking
    /// for a `.env` file. Silently does nothing if no `.env` is found.
    fn load_dotenv_from_workspace() {
        // In tests/build: CARGO_MANIFEST_DIR points to the crate dir.
        // Walk up to find workspace root's .env.
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // Walk up at most 3 levels (crate -> crates/ -> workspace root)
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        // Fallback: try current directory
        let _ = dotenvy::dotenv();
    }
}
