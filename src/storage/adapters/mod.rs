//! Storage backend implementations.

pub mod memory;
