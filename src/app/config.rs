//! Layered application configuration.

use super::AppError;
use serde::Deserialize;
use std::path::Path;

/// Environment variable prefix; `TASKMESH__LOGGING__FILTER=debug` sets
/// `logging.filter`.
pub const ENV_PREFIX: &str = "TASKMESH";

const DEFAULT_SOURCES: [&str; 2] = ["config/default", "default"];

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Application identity.
    pub app: AppSection,
    /// Log filtering.
    pub logging: LoggingConfig,
    /// Persistence backend selection.
    pub storage: StorageConfig,
    /// Console front end.
    pub console: ConsoleConfig,
}

/// `[app]`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppSection {
    /// Name used in log events.
    pub name: String,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            name: "taskmesh".to_owned(),
        }
    }
}

/// `[logging]`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive. `RUST_LOG` wins when set.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "taskmesh=info".to_owned(),
        }
    }
}

/// Persistence backends that can be selected by name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// [`crate::storage::adapters::memory::InMemoryBackend`]
    #[default]
    Memory,
}

/// `[storage]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Backend to construct.
    pub backend: BackendKind,
}

/// `[console]`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Title of the main menu.
    pub app_title: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            app_title: "Task Manager".to_owned(),
        }
    }
}

/// Loads configuration from, in increasing priority: built-in defaults,
/// `config/default.toml` (or `default.toml`) when present, the file at
/// `path`, and `TASKMESH__*` environment variables.
///
/// # Errors
///
/// Returns [`AppError::Config`] when `path` does not exist or a source
/// cannot be parsed into [`AppConfig`].
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, AppError> {
    let mut builder = config::Config::builder();

    if let Some(name) = DEFAULT_SOURCES
        .into_iter()
        .find(|name| Path::new(&format!("{name}.toml")).exists())
    {
        builder = builder.add_source(config::File::with_name(name).required(false));
    }
    if let Some(file) = path {
        builder = builder.add_source(config::File::from(file).required(true));
    }
    builder = builder.add_source(
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    );

    let loaded = builder.build().map_err(AppError::config)?;
    loaded.try_deserialize().map_err(AppError::config)
}
