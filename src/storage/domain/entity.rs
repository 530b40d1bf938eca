//! Entity type tags.

use crate::contract::AgentError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

const MAX_ENTITY_TYPE_LENGTH: usize = 64;

/// Errors returned while validating storage domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageDomainError {
    /// The entity type is blank.
    #[error("entity_type must not be empty")]
    EmptyEntityType,

    /// The entity type contains characters outside `[a-z0-9_]`.
    #[error("entity_type '{0}' must be lowercase alphanumeric or '_'")]
    InvalidEntityType(String),

    /// The entity type exceeds 64 characters.
    #[error("entity_type exceeds 64 character limit: {0}")]
    EntityTypeTooLong(String),
}

impl From<StorageDomainError> for AgentError {
    fn from(err: StorageDomainError) -> Self {
        Self::invalid_field("entity_type", err.to_string())
    }
}

/// Tag naming the table a record belongs to, e.g. `task`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityType(String);

impl EntityType {
    /// Creates a validated entity type.
    ///
    /// # Errors
    ///
    /// Returns [`StorageDomainError`] when the value is blank, too long, or
    /// contains characters outside `[a-z0-9_]`.
    pub fn new(value: impl Into<String>) -> Result<Self, StorageDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(StorageDomainError::EmptyEntityType);
        }
        if trimmed.len() > MAX_ENTITY_TYPE_LENGTH {
            return Err(StorageDomainError::EntityTypeTooLong(raw));
        }
        if !trimmed
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        {
            return Err(StorageDomainError::InvalidEntityType(raw));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the tag as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EntityType {
    type Error = StorageDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EntityType> for String {
    fn from(value: EntityType) -> Self {
        value.0
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
