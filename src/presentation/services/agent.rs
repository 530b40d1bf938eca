//! Agent exposing the `ui_*` actions.

use crate::agent::{Agent, AgentLifecycle};
use crate::contract::{
    Action, AgentError, AgentName, AgentResult, AgentVersion, Confirm, GetInput, ListItem,
    MessageKind, Namespace, Request, SelectItem, ShowMenu, ShowMessage, ShowTasks, UiAction,
};
use crate::presentation::domain::{Prompt, View};
use crate::presentation::ports::PresentationAdapter;
use async_trait::async_trait;
use mockable::Clock;
use serde_json::{Value, json};
use std::sync::Arc;

const AGENT_NAME: &str = "ui_controller";
const AGENT_VERSION: &str = "1.0.0";

/// Shapes UI requests and hands rendering to a [`PresentationAdapter`].
///
/// The agent never touches storage. It checks menu choices, required input
/// and selections, so callers receive typed results or a `ValidationError`.
pub struct PresentationAgent<A, C>
where
    A: PresentationAdapter,
    C: Clock + Send + Sync,
{
    name: AgentName,
    version: AgentVersion,
    lifecycle: AgentLifecycle,
    adapter: Arc<A>,
    clock: Arc<C>,
}

impl<A, C> PresentationAgent<A, C>
where
    A: PresentationAdapter,
    C: Clock + Send + Sync,
{
    /// Creates a presentation agent named `ui_controller`.
    #[must_use]
    pub fn new(adapter: Arc<A>, clock: Arc<C>) -> Self {
        Self {
            name: AgentName::from_static(AGENT_NAME),
            version: AgentVersion::from_static(AGENT_VERSION),
            lifecycle: AgentLifecycle::new(),
            adapter,
            clock,
        }
    }

    /// Returns the adapter views are rendered through.
    #[must_use]
    pub const fn adapter(&self) -> &Arc<A> {
        &self.adapter
    }

    async fn show_menu(&self, payload: &ShowMenu) -> AgentResult<Value> {
        if payload.options.is_empty() {
            return Err(AgentError::invalid_field(
                "options",
                "menu must offer at least one option",
            ));
        }
        let raw = self.adapter.menu(&payload.title, &payload.options).await?;
        let choice = raw.trim();
        if !payload.options.iter().any(|option| option.key == choice) {
            return Err(AgentError::invalid_field(
                "choice",
                format!("invalid choice: {choice}"),
            ));
        }
        Ok(json!({ "choice": choice }))
    }

    async fn show_tasks(&self, payload: &ShowTasks) -> AgentResult<Value> {
        let displayed = payload.items.len();
        self.adapter
            .display(&View::List {
                title: payload.title.clone(),
                items: payload.items.clone(),
            })
            .await?;
        Ok(json!({ "displayed": displayed }))
    }

    async fn get_input(&self, payload: &GetInput) -> AgentResult<Value> {
        let prompt = Prompt::new(payload.prompt.as_str()).with_default(payload.default.clone());
        let raw = self.adapter.prompt(&prompt).await?;
        let answer = raw.trim();
        let value = if answer.is_empty() {
            payload.default.clone().unwrap_or_default()
        } else {
            answer.to_owned()
        };
        if payload.required && value.trim().is_empty() {
            return Err(AgentError::validation(format!(
                "{} must not be blank",
                payload.prompt
            )));
        }
        Ok(json!({ "value": value }))
    }

    async fn confirm(&self, payload: &Confirm) -> AgentResult<Value> {
        let confirmed = self
            .adapter
            .confirm(&payload.prompt, payload.default)
            .await?;
        Ok(json!({ "confirmed": confirmed }))
    }

    async fn show_message(&self, payload: &ShowMessage) -> AgentResult<Value> {
        self.adapter
            .display(&View::message(payload.kind, payload.text.as_str()))
            .await?;
        Ok(json!({}))
    }

    async fn select_item(&self, payload: &SelectItem) -> AgentResult<Value> {
        if payload.items.is_empty() {
            return Err(AgentError::invalid_field("items", "nothing to select from"));
        }
        self.adapter
            .display(&View::List {
                title: payload.prompt.clone(),
                items: payload.items.clone(),
            })
            .await?;
        let label = format!("{} (1-{})", payload.prompt, payload.items.len());
        let raw = self.adapter.prompt(&Prompt::new(label)).await?;
        let (index, item) = pick(&payload.items, raw.trim())?;
        Ok(json!({ "id": item.id, "index": index }))
    }
}

/// Resolves a 1-based selection into a 0-based index and its item.
fn pick<'a>(items: &'a [ListItem], answer: &str) -> AgentResult<(usize, &'a ListItem)> {
    let invalid =
        || AgentError::invalid_field("selection", format!("invalid selection: {answer}"));
    let position: usize = answer.parse().map_err(|_| invalid())?;
    let index = position.checked_sub(1).ok_or_else(invalid)?;
    items
        .get(index)
        .map(|item| (index, item))
        .ok_or_else(invalid)
}

#[async_trait]
impl<A, C> Agent for PresentationAgent<A, C>
where
    A: PresentationAdapter,
    C: Clock + Send + Sync,
{
    fn name(&self) -> &AgentName {
        &self.name
    }

    fn version(&self) -> &AgentVersion {
        &self.version
    }

    fn namespace(&self) -> Namespace {
        Namespace::Ui
    }

    fn supported_actions(&self) -> &'static [&'static str] {
        UiAction::NAMES
    }

    fn lifecycle(&self) -> &AgentLifecycle {
        &self.lifecycle
    }

    fn clock(&self) -> &dyn Clock {
        &*self.clock
    }

    async fn dispatch(&self, request: &Request) -> AgentResult<Value> {
        let Action::Ui(action) = request.action() else {
            return Err(self.unsupported(request.action()));
        };
        tracing::debug!(
            action = action.name(),
            correlation_id = %request.correlation_id(),
            "ui action"
        );
        match action {
            UiAction::ShowMenu(payload) => self.show_menu(payload).await,
            UiAction::ShowTasks(payload) => self.show_tasks(payload).await,
            UiAction::GetInput(payload) => self.get_input(payload).await,
            UiAction::Confirm(payload) => self.confirm(payload).await,
            UiAction::ShowMessage(payload) => self.show_message(payload).await,
            UiAction::SelectItem(payload) => self.select_item(payload).await,
        }
    }
}
