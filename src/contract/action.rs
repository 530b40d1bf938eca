//! Typed actions and their payloads.
//!
//! Every request carries exactly one [`Action`]. Actions are grouped by
//! [`Namespace`]; the namespace decides which agent owns the action. The only
//! place an untyped `name + payload` pair is accepted is
//! [`Action::from_wire`], used at the outermost front-end boundary.

use super::{AgentError, AgentResult, RecordId};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Opaque key/value record exchanged with the persistence layer.
pub type Record = Map<String, Value>;

/// Action namespace, derived from the prefix of an action name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Namespace {
    /// `task_*` actions owned by the task manager.
    Task,
    /// `storage_*` actions owned by the storage handler.
    Storage,
    /// `ui_*` actions owned by the UI controller.
    Ui,
    /// `system_*` actions handled by the orchestrator itself.
    System,
}

impl Namespace {
    /// Returns the action-name prefix, without the trailing separator.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Storage => "storage",
            Self::Ui => "ui",
            Self::System => "system",
        }
    }

    /// Returns the conventional name of the agent owning this namespace.
    #[must_use]
    pub const fn default_owner(self) -> &'static str {
        match self {
            Self::Task => "task_manager",
            Self::Storage => "storage_handler",
            Self::Ui => "ui_controller",
            Self::System => "orchestrator",
        }
    }

    /// Maps an action-name prefix onto a namespace.
    #[must_use]
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "task" => Some(Self::Task),
            "storage" => Some(Self::Storage),
            "ui" => Some(Self::Ui),
            "system" => Some(Self::System),
            _ => None,
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// A routable command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "namespace", content = "command", rename_all = "snake_case")]
pub enum Action {
    /// Task business operations.
    Task(TaskAction),
    /// Raw persistence operations.
    Storage(StorageAction),
    /// User-interaction operations.
    Ui(UiAction),
    /// Orchestrator operations.
    System(SystemAction),
}

impl Action {
    /// Returns the namespace owning this action.
    #[must_use]
    pub const fn namespace(&self) -> Namespace {
        match self {
            Self::Task(_) => Namespace::Task,
            Self::Storage(_) => Namespace::Storage,
            Self::Ui(_) => Namespace::Ui,
            Self::System(_) => Namespace::System,
        }
    }

    /// Returns the wire name, e.g. `task_add`.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Task(action) => action.name(),
            Self::Storage(action) => action.name(),
            Self::Ui(action) => action.name(),
            Self::System(action) => action.name(),
        }
    }

    /// Parses an untyped action name and payload.
    ///
    /// The namespace is the text before the first `_`.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Routing`] when the namespace or the action within
    /// it is unknown, and [`AgentError::Validation`] when the name is blank or
    /// the payload does not match the action's payload type.
    pub fn from_wire(name: &str, payload: Record) -> AgentResult<Self> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(AgentError::invalid_field("action", "action must not be empty"));
        }
        let (prefix, verb) = trimmed.split_once('_').ok_or_else(|| {
            AgentError::routing(format!("action '{trimmed}' has no namespace prefix"))
        })?;
        let namespace = Namespace::from_prefix(prefix).ok_or_else(|| {
            AgentError::routing(format!(
                "unknown action namespace '{prefix}' in '{trimmed}'; expected one of task_, storage_, ui_, system_"
            ))
        })?;

        match namespace {
            Namespace::Task => TaskAction::from_wire(verb, payload).map(Self::Task),
            Namespace::Storage => StorageAction::from_wire(verb, payload).map(Self::Storage),
            Namespace::Ui => UiAction::from_wire(verb, payload).map(Self::Ui),
            Namespace::System => SystemAction::from_wire(verb).map(Self::System),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn decode<T: DeserializeOwned>(action: &str, payload: Record) -> AgentResult<T> {
    serde_json::from_value(Value::Object(payload)).map_err(|err| {
        AgentError::validation(format!("invalid payload for {action}: {err}"))
    })
}

fn unknown_action(namespace: Namespace, verb: &str) -> AgentError {
    AgentError::routing(format!(
        "unknown {namespace} action '{}_{verb}'",
        namespace.prefix()
    ))
}

// ---------------------------------------------------------------------------
// task_*
// ---------------------------------------------------------------------------

/// Task business operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskAction {
    /// `task_add`
    Add(AddTask),
    /// `task_get`
    Get(TaskRef),
    /// `task_update`
    Update(UpdateTask),
    /// `task_list`
    List(ListTasks),
    /// `task_complete`
    Complete(TaskRef),
    /// `task_reopen`
    Reopen(TaskRef),
    /// `task_delete`
    Delete(TaskRef),
}

impl TaskAction {
    /// Wire names of every task action.
    pub const NAMES: &'static [&'static str] = &[
        "task_add",
        "task_get",
        "task_update",
        "task_list",
        "task_complete",
        "task_reopen",
        "task_delete",
    ];

    /// Returns the wire name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Add(_) => "task_add",
            Self::Get(_) => "task_get",
            Self::Update(_) => "task_update",
            Self::List(_) => "task_list",
            Self::Complete(_) => "task_complete",
            Self::Reopen(_) => "task_reopen",
            Self::Delete(_) => "task_delete",
        }
    }

    fn from_wire(verb: &str, payload: Record) -> AgentResult<Self> {
        match verb {
            "add" => decode("task_add", payload).map(Self::Add),
            "get" => decode("task_get", payload).map(Self::Get),
            "update" => decode("task_update", payload).map(Self::Update),
            "list" => decode("task_list", payload).map(Self::List),
            "complete" => decode("task_complete", payload).map(Self::Complete),
            "reopen" => decode("task_reopen", payload).map(Self::Reopen),
            "delete" => decode("task_delete", payload).map(Self::Delete),
            other => Err(unknown_action(Namespace::Task, other)),
        }
    }
}

/// Payload of `task_add`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AddTask {
    /// Raw title; validated by the task manager.
    pub title: String,
    /// Optional raw description.
    #[serde(default)]
    pub description: Option<String>,
}

impl AddTask {
    /// Creates an add payload with a title only.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Payload addressing a single task by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskRef {
    /// Task identifier.
    pub task_id: RecordId,
}

impl TaskRef {
    /// Creates a task reference.
    #[must_use]
    pub const fn new(task_id: RecordId) -> Self {
        Self { task_id }
    }
}

/// Payload of `task_update`. Absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateTask {
    /// Task identifier.
    pub task_id: RecordId,
    /// Replacement title.
    #[serde(default)]
    pub title: Option<String>,
    /// Replacement description.
    #[serde(default)]
    pub description: Option<String>,
}

impl UpdateTask {
    /// Creates an update with no field changes.
    #[must_use]
    pub const fn new(task_id: RecordId) -> Self {
        Self {
            task_id,
            title: None,
            description: None,
        }
    }

    /// Sets the replacement title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the replacement description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Payload of `task_list`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListTasks {
    /// When set, only tasks with this completion flag are returned.
    #[serde(default)]
    pub completed: Option<bool>,
}

impl ListTasks {
    /// Lists every task.
    #[must_use]
    pub const fn all() -> Self {
        Self { completed: None }
    }

    /// Lists tasks with the given completion flag.
    #[must_use]
    pub const fn with_completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
        }
    }
}

// ---------------------------------------------------------------------------
// storage_*
// ---------------------------------------------------------------------------

/// Raw persistence operations over opaque records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageAction {
    /// `storage_save`
    Save(SaveRecord),
    /// `storage_get`
    Get(RecordRef),
    /// `storage_delete`
    Delete(RecordRef),
    /// `storage_list`
    List(EntityScope),
    /// `storage_query`
    Query(QueryRecords),
    /// `storage_clear`
    Clear(EntityScope),
}

impl StorageAction {
    /// Wire names of every storage action.
    pub const NAMES: &'static [&'static str] = &[
        "storage_save",
        "storage_get",
        "storage_delete",
        "storage_list",
        "storage_query",
        "storage_clear",
    ];

    /// Returns the wire name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Save(_) => "storage_save",
            Self::Get(_) => "storage_get",
            Self::Delete(_) => "storage_delete",
            Self::List(_) => "storage_list",
            Self::Query(_) => "storage_query",
            Self::Clear(_) => "storage_clear",
        }
    }

    fn from_wire(verb: &str, payload: Record) -> AgentResult<Self> {
        match verb {
            "save" => decode("storage_save", payload).map(Self::Save),
            "get" => decode("storage_get", payload).map(Self::Get),
            "delete" => decode("storage_delete", payload).map(Self::Delete),
            "list" => decode("storage_list", payload).map(Self::List),
            "query" => decode("storage_query", payload).map(Self::Query),
            "clear" => decode("storage_clear", payload).map(Self::Clear),
            other => Err(unknown_action(Namespace::Storage, other)),
        }
    }
}

/// Payload of `storage_save`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SaveRecord {
    /// Entity type tag.
    pub entity_type: String,
    /// Record to store; an `id` field is assigned when absent.
    pub data: Record,
}

/// Payload addressing one stored record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecordRef {
    /// Entity type tag.
    pub entity_type: String,
    /// Record identifier.
    pub id: RecordId,
}

/// Payload addressing every record of one entity type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntityScope {
    /// Entity type tag.
    pub entity_type: String,
}

/// Payload of `storage_query`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QueryRecords {
    /// Entity type tag.
    pub entity_type: String,
    /// Field values every returned record must equal.
    #[serde(default)]
    pub filters: Record,
}

// ---------------------------------------------------------------------------
// ui_*
// ---------------------------------------------------------------------------

/// User-interaction operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UiAction {
    /// `ui_show_menu`
    ShowMenu(ShowMenu),
    /// `ui_show_tasks`
    ShowTasks(ShowTasks),
    /// `ui_get_input`
    GetInput(GetInput),
    /// `ui_confirm`
    Confirm(Confirm),
    /// `ui_show_message`
    ShowMessage(ShowMessage),
    /// `ui_select_item`
    SelectItem(SelectItem),
}

impl UiAction {
    /// Wire names of every UI action.
    pub const NAMES: &'static [&'static str] = &[
        "ui_show_menu",
        "ui_show_tasks",
        "ui_get_input",
        "ui_confirm",
        "ui_show_message",
        "ui_select_item",
    ];

    /// Returns the wire name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ShowMenu(_) => "ui_show_menu",
            Self::ShowTasks(_) => "ui_show_tasks",
            Self::GetInput(_) => "ui_get_input",
            Self::Confirm(_) => "ui_confirm",
            Self::ShowMessage(_) => "ui_show_message",
            Self::SelectItem(_) => "ui_select_item",
        }
    }

    fn from_wire(verb: &str, payload: Record) -> AgentResult<Self> {
        match verb {
            "show_menu" => decode("ui_show_menu", payload).map(Self::ShowMenu),
            "show_tasks" => decode("ui_show_tasks", payload).map(Self::ShowTasks),
            "get_input" => decode("ui_get_input", payload).map(Self::GetInput),
            "confirm" => decode("ui_confirm", payload).map(Self::Confirm),
            "show_message" => decode("ui_show_message", payload).map(Self::ShowMessage),
            "select_item" => decode("ui_select_item", payload).map(Self::SelectItem),
            other => Err(unknown_action(Namespace::Ui, other)),
        }
    }
}

/// One selectable menu entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuOption {
    /// Key the user types to pick this entry.
    pub key: String,
    /// Human-readable label.
    pub label: String,
}

impl MenuOption {
    /// Creates a menu entry.
    #[must_use]
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// One row of a displayed list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    /// Identifier returned when the row is selected.
    pub id: String,
    /// Primary text.
    pub label: String,
    /// Whether the row is rendered as done.
    #[serde(default)]
    pub done: bool,
    /// Optional secondary text.
    #[serde(default)]
    pub detail: Option<String>,
}

/// Severity of a displayed message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// Neutral information.
    #[default]
    Info,
    /// A completed operation.
    Success,
    /// Something the user should notice.
    Warning,
    /// A failed operation.
    Error,
}

impl MessageKind {
    /// Returns the canonical lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// Payload of `ui_show_menu`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShowMenu {
    /// Menu heading.
    pub title: String,
    /// Entries, in display order.
    pub options: Vec<MenuOption>,
}

/// Payload of `ui_show_tasks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShowTasks {
    /// List heading.
    pub title: String,
    /// Rows to display.
    #[serde(default)]
    pub items: Vec<ListItem>,
}

/// Payload of `ui_get_input`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GetInput {
    /// Prompt label.
    pub prompt: String,
    /// Whether a blank answer is rejected.
    #[serde(default)]
    pub required: bool,
    /// Value used when the user enters nothing.
    #[serde(default)]
    pub default: Option<String>,
}

/// Payload of `ui_confirm`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Confirm {
    /// Question to ask.
    pub prompt: String,
    /// Answer assumed on empty input.
    #[serde(default)]
    pub default: bool,
}

/// Payload of `ui_show_message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShowMessage {
    /// Message text.
    pub text: String,
    /// Message severity.
    #[serde(default)]
    pub kind: MessageKind,
}

/// Payload of `ui_select_item`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SelectItem {
    /// Prompt label.
    pub prompt: String,
    /// Rows to choose from.
    pub items: Vec<ListItem>,
}

// ---------------------------------------------------------------------------
// system_*
// ---------------------------------------------------------------------------

/// Operations handled by the orchestrator itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemAction {
    /// `system_status`
    Status,
    /// `system_agents`
    Agents,
    /// `system_shutdown`
    Shutdown,
}

impl SystemAction {
    /// Wire names of every system action.
    pub const NAMES: &'static [&'static str] = &["system_status", "system_agents", "system_shutdown"];

    /// Returns the wire name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Status => "system_status",
            Self::Agents => "system_agents",
            Self::Shutdown => "system_shutdown",
        }
    }

    fn from_wire(verb: &str) -> AgentResult<Self> {
        match verb {
            "status" => Ok(Self::Status),
            "agents" => Ok(Self::Agents),
            "shutdown" => Ok(Self::Shutdown),
            other => Err(unknown_action(Namespace::System, other)),
        }
    }
}
