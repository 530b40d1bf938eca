//! Then steps for task management BDD scenarios.

use super::world::OrchestratorWorld;
use rstest_bdd_macros::then;
use serde_json::Value;

#[then("the response succeeds")]
fn response_succeeds(world: &OrchestratorWorld) -> Result<(), eyre::Report> {
    let response = world.last()?;
    if let Some(error) = response.error() {
        return Err(eyre::eyre!("expected success, got {error}"));
    }
    Ok(())
}

#[then(r#"the response fails with "{kind}""#)]
fn response_fails_with(world: &OrchestratorWorld, kind: String) -> Result<(), eyre::Report> {
    let error = world
        .last()?
        .error()
        .ok_or_else(|| eyre::eyre!("expected a {kind} response, got success"))?;
    if error.kind().as_str() != kind {
        return Err(eyre::eyre!("expected {kind}, got {error}"));
    }
    if !error.to_string().starts_with(&format!("[{kind}]: ")) {
        return Err(eyre::eyre!("error is not rendered as [Kind]: message: {error}"));
    }
    Ok(())
}

#[then(r#"the error message is "{message}""#)]
fn error_message_is(world: &OrchestratorWorld, message: String) -> Result<(), eyre::Report> {
    let error = world
        .last()?
        .error()
        .ok_or_else(|| eyre::eyre!("expected an error response"))?;
    if error.message() != message {
        return Err(eyre::eyre!("expected '{message}', got '{}'", error.message()));
    }
    Ok(())
}

#[then("the last task is completed")]
fn last_task_completed(world: &OrchestratorWorld) -> Result<(), eyre::Report> {
    expect_completed(world, true)
}

#[then("the last task is not completed")]
fn last_task_not_completed(world: &OrchestratorWorld) -> Result<(), eyre::Report> {
    expect_completed(world, false)
}

#[then("the task count is unchanged")]
fn task_count_unchanged(world: &OrchestratorWorld) -> Result<(), eyre::Report> {
    let recorded = world
        .recorded_count
        .ok_or_else(|| eyre::eyre!("task count was not recorded"))?;
    let current = world.task_count()?;
    if current != recorded {
        return Err(eyre::eyre!("task count changed from {recorded} to {current}"));
    }
    Ok(())
}

fn expect_completed(world: &OrchestratorWorld, expected: bool) -> Result<(), eyre::Report> {
    let completed = world
        .last()?
        .result()
        .and_then(|result| result.pointer("/task/completed"))
        .and_then(Value::as_bool)
        .ok_or_else(|| eyre::eyre!("last response carries no task"))?;
    if completed != expected {
        return Err(eyre::eyre!("expected completed={expected}, got {completed}"));
    }
    Ok(())
}
