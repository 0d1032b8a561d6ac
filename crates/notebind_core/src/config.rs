//! Process configuration resolved from the environment.
//!
//! # Responsibility
//! - Resolve log level, optional log directory and database path.
//! - Cache the resolved values once per process.
//!
//! # Invariants
//! - Blank environment values are treated as unset.
//! - Resolution never fails; unsupported levels surface later from
//!   `init_logging`.

use crate::logging::default_log_level;
use once_cell::sync::OnceCell;
use std::path::PathBuf;

pub const ENV_LOG_LEVEL: &str = "NOTEBIND_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "NOTEBIND_LOG_DIR";
pub const ENV_DB_PATH: &str = "NOTEBIND_DB_PATH";

const DEFAULT_DB_FILE_NAME: &str = "notebind.sqlite3";

static GLOBAL_CONFIG: OnceCell<CoreConfig> = OnceCell::new();

/// Resolved core configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Rolling log directory; `None` disables file logging.
    pub log_dir: Option<PathBuf>,
    /// SQLite file backing the notes collection.
    pub db_path: PathBuf,
}

impl CoreConfig {
    /// Reads configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            log_level: read(ENV_LOG_LEVEL).unwrap_or_else(|| default_log_level().to_string()),
            log_dir: read(ENV_LOG_DIR).map(PathBuf::from),
            db_path: read(ENV_DB_PATH)
                .map(PathBuf::from)
                .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)),
        }
    }

    /// Process-wide configuration, resolved from the environment on first use.
    pub fn global() -> &'static CoreConfig {
        GLOBAL_CONFIG.get_or_init(Self::from_env)
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
