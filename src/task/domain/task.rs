//! Task aggregate and its validated fields.

use super::TaskDomainError;
use crate::contract::{Record, RecordId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum title length, in characters, after trimming.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum description length, in characters, after trimming.
pub const MAX_DESCRIPTION_LENGTH: usize = 1000;

/// Trimmed, non-empty task title of at most [`MAX_TITLE_LENGTH`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Creates a validated title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the value is blank or
    /// [`TaskDomainError::TitleTooLong`] when it exceeds the limit.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        let length = trimmed.chars().count();
        if length > MAX_TITLE_LENGTH {
            return Err(TaskDomainError::TitleTooLong {
                max: MAX_TITLE_LENGTH,
                actual: length,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the title as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TaskTitle {
    type Error = TaskDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TaskTitle> for String {
    fn from(value: TaskTitle) -> Self {
        value.0
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trimmed, non-empty description of at most [`MAX_DESCRIPTION_LENGTH`]
/// characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskDescription(String);

impl TaskDescription {
    /// Parses an optional description; blank input means "no description".
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::DescriptionTooLong`] when the trimmed value
    /// exceeds the limit.
    pub fn parse(value: impl Into<String>) -> Result<Option<Self>, TaskDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        let length = trimmed.chars().count();
        if length > MAX_DESCRIPTION_LENGTH {
            return Err(TaskDomainError::DescriptionTooLong {
                max: MAX_DESCRIPTION_LENGTH,
                actual: length,
            });
        }
        Ok(Some(Self(trimmed.to_owned())))
    }

    /// Returns the description as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TaskDescription {
    type Error = TaskDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)?.ok_or(TaskDomainError::BlankDescription)
    }
}

impl From<TaskDescription> for String {
    fn from(value: TaskDescription) -> Self {
        value.0
    }
}

/// A validated task that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTask {
    title: TaskTitle,
    description: Option<TaskDescription>,
    completed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl NewTask {
    /// Validates raw input into a pending task stamped with the clock's time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError`] when the title or description is invalid.
    pub fn new(
        title: impl Into<String>,
        description: Option<String>,
        clock: &(impl Clock + ?Sized),
    ) -> Result<Self, TaskDomainError> {
        let validated_title = TaskTitle::new(title)?;
        let validated_description = description
            .map(TaskDescription::parse)
            .transpose()?
            .flatten();
        let timestamp = clock.utc();
        Ok(Self {
            title: validated_title,
            description: validated_description,
            completed: false,
            created_at: timestamp,
            updated_at: timestamp,
            completed_at: None,
        })
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Converts the task into the record handed to the storage backend.
    ///
    /// # Errors
    ///
    /// Returns the serialisation error if the task cannot be encoded.
    pub fn to_record(&self) -> serde_json::Result<Record> {
        to_record(self)
    }
}

/// Field changes requested by an update. Absent fields stay unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskChanges {
    title: Option<TaskTitle>,
    description: Option<Option<TaskDescription>>,
}

impl TaskChanges {
    /// Validates raw update input.
    ///
    /// A blank description clears the existing one.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyUpdate`] when neither field is given,
    /// or the validation error of the offending field.
    pub fn new(
        title: Option<String>,
        description: Option<String>,
    ) -> Result<Self, TaskDomainError> {
        if title.is_none() && description.is_none() {
            return Err(TaskDomainError::EmptyUpdate);
        }
        Ok(Self {
            title: title.map(TaskTitle::new).transpose()?,
            description: description.map(TaskDescription::parse).transpose()?,
        })
    }
}

/// Task aggregate root, as stored by the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: RecordId,
    title: TaskTitle,
    #[serde(default)]
    description: Option<TaskDescription>,
    completed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(default)]
    completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> RecordId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub const fn description(&self) -> Option<&TaskDescription> {
        self.description.as_ref()
    }

    /// Returns `true` once the task has been completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns when the task was completed, if it is.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Applies validated field changes.
    pub fn apply(&mut self, changes: TaskChanges, clock: &(impl Clock + ?Sized)) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        self.touch(clock);
    }

    /// Marks the task completed. Completing a completed task keeps the
    /// original completion time.
    pub fn complete(&mut self, clock: &(impl Clock + ?Sized)) {
        self.touch(clock);
        if !self.completed {
            self.completed = true;
            self.completed_at = Some(self.updated_at);
        }
    }

    /// Marks the task pending again and clears the completion time.
    pub fn reopen(&mut self, clock: &(impl Clock + ?Sized)) {
        self.completed = false;
        self.completed_at = None;
        self.touch(clock);
    }

    /// Converts the task into the record handed to the storage backend.
    ///
    /// # Errors
    ///
    /// Returns the serialisation error if the task cannot be encoded.
    pub fn to_record(&self) -> serde_json::Result<Record> {
        to_record(self)
    }

    fn touch(&mut self, clock: &(impl Clock + ?Sized)) {
        self.updated_at = clock.utc();
    }
}

fn to_record(value: &impl Serialize) -> serde_json::Result<Record> {
    serde_json::from_value(serde_json::to_value(value)?)
}
