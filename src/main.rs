//! Runs the task manager on the terminal or as a JSON-lines request stream.
//!
//! ```text
//! taskmesh [--config <path>] [--mode console|jsonl] [--log-filter <directive>]
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use taskmesh::app::{self, AppError, RunMode, telemetry};

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "taskmesh", version, about)]
struct Cli {
    /// Configuration file layered over `config/default.toml`.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Front end to run.
    #[arg(long, value_enum, default_value_t = RunMode::Console)]
    mode: RunMode,

    /// Log filter directive, overriding the configured one.
    #[arg(long)]
    log_filter: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "taskmesh failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let Cli {
        config: config_path,
        mode,
        log_filter,
    } = cli;
    let loaded = app::load_config(config_path.as_deref());
    let filter = log_filter.unwrap_or_else(|| {
        loaded
            .as_ref()
            .map_or_else(|_| app::LoggingConfig::default().filter, |c| c.logging.filter.clone())
    });
    telemetry::init(&filter)?;
    let config = loaded?;

    tracing::info!(app = %config.app.name, mode = ?mode, "starting");
    let summary = app::run(&config, mode).await?;
    if summary.failures.is_empty() {
        tracing::info!(stopped = summary.stopped.len(), "shutdown complete");
    } else {
        for failure in &summary.failures {
            tracing::warn!(
                agent = %failure.agent,
                stage = %failure.stage,
                error = %failure.error,
                "shutdown step failed"
            );
        }
    }
    Ok(())
}
