//! Uniform message contract shared by every agent.
//!
//! Callers build a typed [`Request`] and receive a [`Response`] whose outcome
//! is either a JSON result document or a rendered [`ResponseError`]. Actions
//! are typed ([`Action`]); untyped front ends go through [`WireRequest`].

mod action;
mod error;
mod ids;
mod info;
mod request;
mod response;
mod wire;

pub use action::{
    Action, AddTask, Confirm, EntityScope, GetInput, ListItem, ListTasks, MenuOption, MessageKind,
    Namespace, QueryRecords, Record, RecordRef, SaveRecord, SelectItem, ShowMenu, ShowMessage,
    ShowTasks, StorageAction, SystemAction, TaskAction, TaskRef, UiAction, UpdateTask,
};
pub use error::{AgentError, AgentResult, ContractError, ErrorKind, ResponseError};
pub use ids::{AgentName, CorrelationId, RecordId, RequestId};
pub use info::{AgentInfo, AgentStatus, AgentVersion};
pub use request::{Request, RequestBuilder};
pub use response::{Outcome, Response, ResponseStatus};
pub use wire::WireRequest;

#[cfg(test)]
mod tests;
