//! Agent registry, namespace routing, and startup/shutdown sequencing.
//!
//! An [`services::Orchestrator`] owns its registry; several instances in one
//! process never share state. Agents are registered through `&mut self`
//! before [`services::Orchestrator::start`], after which routing only reads
//! the registry.

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
