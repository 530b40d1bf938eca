//! Unit tests for the agent contract.

mod action_tests;
mod ids_tests;
mod request_tests;
