//! Domain model for tasks.

mod error;
mod task;

pub use error::TaskDomainError;
pub use task::{
    MAX_DESCRIPTION_LENGTH, MAX_TITLE_LENGTH, NewTask, Task, TaskChanges, TaskDescription,
    TaskTitle,
};
