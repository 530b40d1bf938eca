//! Taskmesh: an in-process agent orchestration core for a task manager.
//!
//! Callers build typed [`contract::Request`]s and hand them to an
//! [`orchestrator::services::Orchestrator`], which routes each one by action
//! namespace to the agent that owns it and always answers with a
//! [`contract::Response`].
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business rules with no infrastructure dependencies
//! - **Ports**: Trait interfaces for persistence and presentation
//! - **Adapters**: Concrete implementations of ports (in-memory, console)
//! - **Services**: The agents exposing each context's actions
//!
//! # Modules
//!
//! - [`contract`]: Requests, responses, actions, and the error taxonomy
//! - [`agent`]: The agent trait and lifecycle
//! - [`storage`]: Record persistence and the storage agent
//! - [`task`]: Task rules and the task manager agent
//! - [`presentation`]: User interaction and the UI controller agent
//! - [`orchestrator`]: Registry, routing, and shutdown sequencing
//! - [`app`]: Configuration, logging, wiring, and front-end loops

pub mod agent;
pub mod app;
pub mod contract;
pub mod orchestrator;
pub mod presentation;
pub mod storage;
pub mod task;
