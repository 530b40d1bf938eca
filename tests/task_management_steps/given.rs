//! Given steps for task management BDD scenarios.

use super::world::{OrchestratorWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given("a running task manager")]
fn running_task_manager(world: &mut OrchestratorWorld) -> Result<(), eyre::Report> {
    run_async(world.orchestrator.start())
        .map_err(|err| eyre::eyre!("{err}"))
        .wrap_err("start the orchestrator")
}

#[given("the task count has been recorded")]
fn task_count_recorded(world: &mut OrchestratorWorld) -> Result<(), eyre::Report> {
    world.recorded_count = Some(world.task_count()?);
    Ok(())
}
