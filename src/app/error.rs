//! Errors surfaced by the binary.

use crate::contract::AgentError;
use crate::orchestrator::domain::OrchestratorError;
use std::sync::Arc;
use thiserror::Error;

/// Failures that end the process with a non-zero exit code.
#[derive(Debug, Clone, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(Arc<config::ConfigError>),

    /// The log subscriber could not be installed.
    #[error("logging setup failed: {0}")]
    Telemetry(String),

    /// Agents could not be registered.
    #[error(transparent)]
    Registration(#[from] OrchestratorError),

    /// Agents could not be started.
    #[error("startup failed: {0}")]
    Startup(AgentError),

    /// A request stream could not be read or written.
    #[error("i/o error: {0}")]
    Io(Arc<std::io::Error>),
}

impl AppError {
    /// Wraps a configuration error.
    #[must_use]
    pub fn config(err: config::ConfigError) -> Self {
        Self::Config(Arc::new(err))
    }

    /// Wraps an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error) -> Self {
        Self::Io(Arc::new(err))
    }
}
