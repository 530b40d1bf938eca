//! Interactive menu loop driven entirely through orchestrator requests.

use crate::contract::{
    Action, AddTask, AgentName, Confirm, CorrelationId, ErrorKind, GetInput, ListItem, ListTasks,
    MenuOption, MessageKind, RecordId, Request, ResponseError, SelectItem, ShowMenu, ShowMessage,
    ShowTasks, TaskAction, TaskRef, UiAction, UpdateTask,
};
use crate::orchestrator::services::Orchestrator;
use crate::task::domain::Task;
use mockable::Clock;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

const SESSION_SENDER: &str = "console";
const QUIT_KEY: &str = "q";
const CLEAR_DESCRIPTION: &str = "-";

/// One user-facing failure inside a menu round.
enum Interrupt {
    /// An action failed; the user is told and the loop continues.
    Failed(ResponseError),
    /// The UI can no longer interact with the user.
    Closed(ResponseError),
}

/// Outcome of one menu round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    Quit,
}

type Round<T> = Result<T, Interrupt>;

/// Console front end.
///
/// Every user interaction, rendering included, is a request routed through
/// the orchestrator; each menu round gets its own correlation id.
pub struct ConsoleSession<'a, C>
where
    C: Clock + Send + Sync,
{
    orchestrator: &'a Orchestrator<C>,
    sender: AgentName,
    title: String,
    clock: Arc<C>,
}

impl<'a, C> ConsoleSession<'a, C>
where
    C: Clock + Send + Sync,
{
    /// Creates a session whose main menu is headed `title`.
    #[must_use]
    pub fn new(
        orchestrator: &'a Orchestrator<C>,
        title: impl Into<String>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            orchestrator,
            sender: AgentName::from_static(SESSION_SENDER),
            title: title.into(),
            clock,
        }
    }

    /// Runs menu rounds until the user quits or input ends. Returns the
    /// number of completed rounds.
    pub async fn run(&self) -> usize {
        let mut rounds = 0;
        loop {
            let correlation = CorrelationId::generate();
            match self.round(&correlation).await {
                Ok(Step::Continue) => rounds += 1,
                Ok(Step::Quit) => {
                    tracing::info!(rounds, "console session finished");
                    return rounds;
                }
                Err(Interrupt::Failed(error)) => {
                    rounds += 1;
                    if let Err(Interrupt::Closed(closed) | Interrupt::Failed(closed)) =
                        self.say(&correlation, MessageKind::Error, error.to_string()).await
                    {
                        tracing::warn!(error = %closed, "console session ended");
                        return rounds;
                    }
                }
                Err(Interrupt::Closed(error)) => {
                    tracing::warn!(error = %error, "console session ended");
                    return rounds;
                }
            }
        }
    }

    async fn round(&self, correlation: &CorrelationId) -> Round<Step> {
        let menu = ShowMenu {
            title: self.title.clone(),
            options: main_menu(),
        };
        let result = self.ui(correlation, UiAction::ShowMenu(menu)).await?;
        let choice: String = field(result, "choice")?;
        match choice.as_str() {
            "1" => self.add(correlation).await?,
            "2" => self.list(correlation).await?,
            "3" => self.update(correlation).await?,
            "4" => self.set_completed(correlation, true).await?,
            "5" => self.set_completed(correlation, false).await?,
            "6" => self.delete(correlation).await?,
            "7" => self.details(correlation).await?,
            QUIT_KEY => return Ok(Step::Quit),
            _ => {}
        }
        Ok(Step::Continue)
    }

    async fn add(&self, correlation: &CorrelationId) -> Round<()> {
        let title = self.input(correlation, "Task title", true, None).await?;
        let description = self
            .input(correlation, "Description (optional)", false, None)
            .await?;
        let mut payload = AddTask::new(title);
        if !description.is_empty() {
            payload = payload.with_description(description);
        }
        let result = self.task(correlation, TaskAction::Add(payload)).await?;
        let task: Task = field(result, "task")?;
        self.say(
            correlation,
            MessageKind::Success,
            format!("Task #{} added: {}", task.id(), task.title()),
        )
        .await
    }

    async fn list(&self, correlation: &CorrelationId) -> Round<()> {
        let tasks = self.tasks(correlation).await?;
        let show = ShowTasks {
            title: "Tasks".to_owned(),
            items: tasks.iter().map(list_item).collect(),
        };
        self.ui(correlation, UiAction::ShowTasks(show)).await?;
        Ok(())
    }

    async fn update(&self, correlation: &CorrelationId) -> Round<()> {
        let Some(task_id) = self.select(correlation, "Task to update").await? else {
            return Ok(());
        };
        let current = self.load(correlation, task_id).await?;
        let title = self
            .input(
                correlation,
                "New title",
                true,
                Some(current.title().to_string()),
            )
            .await?;
        let answer = self
            .input(
                correlation,
                "New description (- to clear)",
                false,
                current.description().map(|d| d.as_str().to_owned()),
            )
            .await?;
        // A blank description clears the stored one.
        let description = if answer == CLEAR_DESCRIPTION {
            String::new()
        } else {
            answer
        };
        let payload = UpdateTask::new(task_id)
            .with_title(title)
            .with_description(description);
        self.task(correlation, TaskAction::Update(payload)).await?;
        self.say(
            correlation,
            MessageKind::Success,
            format!("Task #{task_id} updated"),
        )
        .await
    }

    async fn set_completed(&self, correlation: &CorrelationId, completed: bool) -> Round<()> {
        let prompt = if completed {
            "Task to complete"
        } else {
            "Task to reopen"
        };
        let Some(task_id) = self.select(correlation, prompt).await? else {
            return Ok(());
        };
        let action = if completed {
            TaskAction::Complete(TaskRef::new(task_id))
        } else {
            TaskAction::Reopen(TaskRef::new(task_id))
        };
        self.task(correlation, action).await?;
        let verb = if completed { "completed" } else { "reopened" };
        self.say(
            correlation,
            MessageKind::Success,
            format!("Task #{task_id} {verb}"),
        )
        .await
    }

    async fn delete(&self, correlation: &CorrelationId) -> Round<()> {
        let Some(task_id) = self.select(correlation, "Task to delete").await? else {
            return Ok(());
        };
        let confirm = Confirm {
            prompt: format!("Delete task #{task_id}?"),
            default: false,
        };
        let result = self.ui(correlation, UiAction::Confirm(confirm)).await?;
        let confirmed: bool = field(result, "confirmed")?;
        if !confirmed {
            return self
                .say(correlation, MessageKind::Info, "Deletion cancelled".to_owned())
                .await;
        }
        self.task(correlation, TaskAction::Delete(TaskRef::new(task_id)))
            .await?;
        self.say(
            correlation,
            MessageKind::Success,
            format!("Task #{task_id} deleted"),
        )
        .await
    }

    async fn details(&self, correlation: &CorrelationId) -> Round<()> {
        let Some(task_id) = self.select(correlation, "Task to show").await? else {
            return Ok(());
        };
        let task = self.load(correlation, task_id).await?;
        self.say(correlation, MessageKind::Info, describe(&task)).await
    }

    async fn select(&self, correlation: &CorrelationId, prompt: &str) -> Round<Option<RecordId>> {
        let tasks = self.tasks(correlation).await?;
        if tasks.is_empty() {
            self.say(correlation, MessageKind::Info, "No tasks yet".to_owned())
                .await?;
            return Ok(None);
        }
        let select = SelectItem {
            prompt: prompt.to_owned(),
            items: tasks.iter().map(list_item).collect(),
        };
        let result = self.ui(correlation, UiAction::SelectItem(select)).await?;
        let id: String = field(result, "id")?;
        id.parse::<u64>()
            .ok()
            .and_then(|raw| RecordId::new(raw).ok())
            .map(Some)
            .ok_or_else(|| malformed(format!("selected id '{id}' is not a task id")))
    }

    async fn tasks(&self, correlation: &CorrelationId) -> Round<Vec<Task>> {
        let result = self
            .task(correlation, TaskAction::List(ListTasks::all()))
            .await?;
        field(result, "tasks")
    }

    async fn load(&self, correlation: &CorrelationId, task_id: RecordId) -> Round<Task> {
        let result = self
            .task(correlation, TaskAction::Get(TaskRef::new(task_id)))
            .await?;
        field(result, "task")
    }

    async fn input(
        &self,
        correlation: &CorrelationId,
        prompt: &str,
        required: bool,
        default: Option<String>,
    ) -> Round<String> {
        let get = GetInput {
            prompt: prompt.to_owned(),
            required,
            default,
        };
        let result = self.ui(correlation, UiAction::GetInput(get)).await?;
        field(result, "value")
    }

    async fn say(
        &self,
        correlation: &CorrelationId,
        kind: MessageKind,
        text: String,
    ) -> Round<()> {
        self.ui(correlation, UiAction::ShowMessage(ShowMessage { text, kind }))
            .await?;
        Ok(())
    }

    async fn task(&self, correlation: &CorrelationId, action: TaskAction) -> Round<Value> {
        self.send(correlation, Action::Task(action))
            .await
            .map_err(Interrupt::Failed)
    }

    /// Sends a UI action. Internal failures mean the terminal is gone.
    async fn ui(&self, correlation: &CorrelationId, action: UiAction) -> Round<Value> {
        self.send(correlation, Action::Ui(action))
            .await
            .map_err(|error| {
                if error.kind() == ErrorKind::InternalError {
                    Interrupt::Closed(error)
                } else {
                    Interrupt::Failed(error)
                }
            })
    }

    async fn send(
        &self,
        correlation: &CorrelationId,
        action: Action,
    ) -> Result<Value, ResponseError> {
        let request = Request::builder(self.sender.clone(), action)
            .with_correlation_id(correlation.clone())
            .build(&*self.clock);
        self.orchestrator.route(request).await.into_result()
    }
}

fn main_menu() -> Vec<MenuOption> {
    vec![
        MenuOption::new("1", "Add task"),
        MenuOption::new("2", "List tasks"),
        MenuOption::new("3", "Update task"),
        MenuOption::new("4", "Complete task"),
        MenuOption::new("5", "Reopen task"),
        MenuOption::new("6", "Delete task"),
        MenuOption::new("7", "Show task details"),
        MenuOption::new(QUIT_KEY, "Quit"),
    ]
}

fn list_item(task: &Task) -> ListItem {
    ListItem {
        id: task.id().to_string(),
        label: task.title().to_string(),
        done: task.is_completed(),
        detail: task.description().map(|d| d.as_str().to_owned()),
    }
}

fn describe(task: &Task) -> String {
    let status = task
        .completed_at()
        .map_or_else(|| "pending".to_owned(), |at| format!("completed {}", at.to_rfc3339()));
    let description = task.description().map_or("-", |d| d.as_str());
    format!(
        "#{} {}\n  description: {description}\n  status: {status}\n  created: {}\n  updated: {}",
        task.id(),
        task.title(),
        task.created_at().to_rfc3339(),
        task.updated_at().to_rfc3339(),
    )
}

fn field<T: DeserializeOwned>(result: Value, name: &str) -> Round<T> {
    let Value::Object(mut map) = result else {
        return Err(malformed(format!("expected an object carrying '{name}'")));
    };
    let value = map
        .remove(name)
        .ok_or_else(|| malformed(format!("result is missing '{name}'")))?;
    serde_json::from_value(value).map_err(|err| malformed(format!("'{name}' is malformed: {err}")))
}

fn malformed(message: String) -> Interrupt {
    Interrupt::Failed(ResponseError::new(ErrorKind::InternalError, message))
}
