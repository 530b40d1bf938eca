//! Process entry: configuration, logging, wiring, and the front-end loops.
//!
//! The binary only parses its command line and calls [`run`]. Both front
//! ends talk to the core exclusively through
//! [`crate::orchestrator::services::Orchestrator`] requests.

mod config;
mod error;
mod jsonl;
mod session;
pub mod telemetry;
mod wiring;

pub use config::{
    AppConfig, AppSection, BackendKind, ConsoleConfig, ENV_PREFIX, LoggingConfig, StorageConfig,
    load_config,
};
pub use error::AppError;
pub use jsonl::serve_lines;
pub use session::ConsoleSession;
pub use wiring::assemble;

use crate::orchestrator::domain::ShutdownSummary;
use crate::presentation::adapters::{ConsoleAdapter, ScriptedAdapter};
use mockable::DefaultClock;
use std::io;
use std::sync::Arc;

#[cfg(test)]
mod tests;

/// Front end to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum RunMode {
    /// Interactive menu on the terminal.
    #[default]
    Console,
    /// Wire requests on stdin, responses on stdout, one JSON object per
    /// line. UI prompts are not answerable in this mode.
    Jsonl,
}

/// Wires the agents, runs the selected front end to completion, and shuts
/// the orchestrator down.
///
/// # Errors
///
/// Returns [`AppError`] when the agents cannot be started or the request
/// stream fails.
pub async fn run(config: &AppConfig, mode: RunMode) -> Result<ShutdownSummary, AppError> {
    let clock = Arc::new(DefaultClock);
    match mode {
        RunMode::Console => {
            let adapter = Arc::new(ConsoleAdapter::stdio());
            let orchestrator = assemble(config, adapter, Arc::clone(&clock)).await?;
            ConsoleSession::new(&orchestrator, config.console.app_title.as_str(), clock)
                .run()
                .await;
            Ok(orchestrator.shutdown().await)
        }
        RunMode::Jsonl => {
            let adapter = Arc::new(ScriptedAdapter::default());
            let orchestrator = assemble(config, adapter, Arc::clone(&clock)).await?;
            let answered =
                serve_lines(&orchestrator, io::stdin().lock(), io::stdout().lock(), &*clock)
                    .await?;
            tracing::info!(answered, "request stream finished");
            Ok(orchestrator.shutdown().await)
        }
    }
}
