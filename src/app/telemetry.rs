//! Log subscriber setup.

use super::AppError;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Installs the global subscriber, writing to stderr so stdout stays free
/// for the front end.
///
/// `RUST_LOG` overrides `filter` when set.
///
/// # Errors
///
/// Returns [`AppError::Telemetry`] when the filter is malformed or a
/// subscriber is already installed.
pub fn init(filter: &str) -> Result<(), AppError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter))
        .map_err(|err| AppError::Telemetry(err.to_string()))?;
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init()
        .map_err(|err| AppError::Telemetry(err.to_string()))
}
