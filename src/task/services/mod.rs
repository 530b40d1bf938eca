//! The task manager agent.

mod agent;

pub use agent::{TASK_ENTITY, TaskAgent};
