//! JSON-lines front end: one [`WireRequest`] per input line, one
//! [`Response`] per output line.

use super::AppError;
use crate::contract::{AgentError, CorrelationId, RequestId, Response, WireRequest};
use crate::orchestrator::domain::OrchestratorState;
use crate::orchestrator::services::Orchestrator;
use mockable::Clock;
use std::io::{BufRead, Write};

/// Answers every request line until input ends or the orchestrator
/// terminates. Blank lines are skipped. Returns the number of responses
/// written.
///
/// # Errors
///
/// Returns [`AppError::Io`] when reading a line or writing a response
/// fails.
pub async fn serve_lines<C, R, W>(
    orchestrator: &Orchestrator<C>,
    input: R,
    mut output: W,
    clock: &C,
) -> Result<usize, AppError>
where
    C: Clock + Send + Sync,
    R: BufRead,
    W: Write,
{
    let mut answered = 0;
    for line in input.lines() {
        let raw = line.map_err(AppError::io)?;
        if raw.trim().is_empty() {
            continue;
        }
        let response = match serde_json::from_str::<WireRequest>(&raw) {
            Ok(wire) => orchestrator.route_wire(wire).await,
            Err(err) => {
                let error = AgentError::validation(format!("invalid request line: {err}"));
                tracing::warn!(error = %error, "unparseable request line");
                Response::failure_for(
                    RequestId::new(),
                    CorrelationId::generate(),
                    orchestrator.name().clone(),
                    &error,
                    clock,
                )
            }
        };
        serde_json::to_writer(&mut output, &response).map_err(|err| AppError::io(err.into()))?;
        writeln!(output).map_err(AppError::io)?;
        output.flush().map_err(AppError::io)?;
        answered += 1;
        if orchestrator.state() == OrchestratorState::Terminated {
            break;
        }
    }
    Ok(answered)
}
