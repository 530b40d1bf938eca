//! Adapter port for rendering views and collecting answers.

use crate::contract::{AgentError, MenuOption};
use crate::presentation::domain::{Prompt, View};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for presentation adapter operations.
pub type PresentationResult<T> = Result<T, PresentationError>;

/// Renders views and reads raw answers from a user or a script.
///
/// Adapters do not validate answers; the presentation agent shapes them into
/// UI-level results.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PresentationAdapter: Send + Sync {
    /// Renders a view.
    async fn display(&self, view: &View) -> PresentationResult<()>;

    /// Asks a free-text question and returns the raw answer.
    async fn prompt(&self, prompt: &Prompt) -> PresentationResult<String>;

    /// Asks a yes/no question. Empty answers resolve to `default`.
    async fn confirm(&self, question: &str, default: bool) -> PresentationResult<bool>;

    /// Renders a menu and returns the raw key the user entered.
    async fn menu(&self, title: &str, options: &[MenuOption]) -> PresentationResult<String>;
}

/// Errors returned by presentation adapters.
#[derive(Debug, Clone, Error)]
pub enum PresentationError {
    /// The input stream ended before an answer was read.
    #[error("input stream closed")]
    InputClosed,

    /// A scripted adapter ran out of queued answers.
    #[error("no scripted answer left for '{0}'")]
    ScriptExhausted(String),

    /// A template failed to render.
    #[error("render error: {0}")]
    Render(String),

    /// Reading or writing the terminal failed.
    #[error("i/o error: {0}")]
    Io(Arc<dyn std::error::Error + Send + Sync>),
}

impl PresentationError {
    /// Wraps an I/O error.
    pub fn io(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Io(Arc::new(err))
    }
}

impl From<PresentationError> for AgentError {
    fn from(err: PresentationError) -> Self {
        Self::internal(err)
    }
}
