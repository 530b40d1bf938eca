//! Step definitions for task management scenarios.

mod given;
mod then;
mod when;
pub mod world;
