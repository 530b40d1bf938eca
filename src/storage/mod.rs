//! Persistence for opaque JSON records.
//!
//! The storage context owns the `storage_*` actions. Records are grouped by
//! an entity type tag and identified by backend-assigned positive ids:
//!
//! - Domain types in [`domain`]
//! - The backend port in [`ports`]
//! - Backend implementations in [`adapters`]
//! - The agent translating actions into backend calls in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
