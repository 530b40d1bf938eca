//! Task management.
//!
//! The task context owns the `task_*` actions. It validates titles and
//! descriptions, keeps the [`domain::Task`] aggregate consistent, and persists
//! tasks by sending `storage_*` sub-requests to the storage agent:
//!
//! - Domain types in [`domain`]
//! - The task manager agent in [`services`]

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
