//! Error types for task validation.

use crate::contract::AgentError;
use thiserror::Error;

/// Errors returned while constructing or changing tasks.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The title is empty after trimming.
    #[error("title must not be empty")]
    EmptyTitle,

    /// The title is longer than allowed.
    #[error("title must be at most {max} characters, got {actual}")]
    TitleTooLong {
        /// Maximum length in characters.
        max: usize,
        /// Actual length in characters.
        actual: usize,
    },

    /// The description is longer than allowed.
    #[error("description must be at most {max} characters, got {actual}")]
    DescriptionTooLong {
        /// Maximum length in characters.
        max: usize,
        /// Actual length in characters.
        actual: usize,
    },

    /// A stored description is present but blank.
    #[error("description must not be blank when present")]
    BlankDescription,

    /// An update named no field to change.
    #[error("update must change at least one of title or description")]
    EmptyUpdate,
}

impl TaskDomainError {
    /// Returns the payload field the error refers to, if any.
    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::EmptyTitle | Self::TitleTooLong { .. } => Some("title"),
            Self::DescriptionTooLong { .. } | Self::BlankDescription => Some("description"),
            Self::EmptyUpdate => None,
        }
    }
}

impl From<TaskDomainError> for AgentError {
    fn from(err: TaskDomainError) -> Self {
        Self::Validation {
            field: err.field().map(str::to_owned),
            reason: err.to_string(),
        }
    }
}
