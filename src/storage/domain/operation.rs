//! Validated storage operations.

use super::{EntityType, StorageDomainError};
use crate::contract::{Record, RecordId, StorageAction};
use std::fmt;

/// Kind of a [`StorageOperation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// Insert or upsert a record.
    Save,
    /// Fetch a record by id.
    Get,
    /// Remove a record by id.
    Delete,
    /// Fetch every record of an entity type.
    List,
    /// Fetch records matching filters.
    Query,
    /// Remove every record of an entity type.
    Clear,
}

impl OperationKind {
    /// Returns the canonical lowercase representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Save => "save",
            Self::Get => "get",
            Self::Delete => "delete",
            Self::List => "list",
            Self::Query => "query",
            Self::Clear => "clear",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A storage action after its entity type has been validated.
///
/// Each variant carries exactly the fields its kind needs, so an operation
/// can never be missing an id or a record it depends on.
#[derive(Debug, Clone, PartialEq)]
pub enum StorageOperation {
    /// Insert or upsert.
    Save {
        /// Target table.
        entity_type: EntityType,
        /// Record to store.
        data: Record,
    },
    /// Fetch by id.
    Get {
        /// Target table.
        entity_type: EntityType,
        /// Record identifier.
        id: RecordId,
    },
    /// Remove by id.
    Delete {
        /// Target table.
        entity_type: EntityType,
        /// Record identifier.
        id: RecordId,
    },
    /// Fetch everything.
    List {
        /// Target table.
        entity_type: EntityType,
    },
    /// Fetch by equality filters.
    Query {
        /// Target table.
        entity_type: EntityType,
        /// Field values to match.
        filters: Record,
    },
    /// Remove everything.
    Clear {
        /// Target table.
        entity_type: EntityType,
    },
}

impl StorageOperation {
    /// Returns the operation kind.
    #[must_use]
    pub const fn kind(&self) -> OperationKind {
        match self {
            Self::Save { .. } => OperationKind::Save,
            Self::Get { .. } => OperationKind::Get,
            Self::Delete { .. } => OperationKind::Delete,
            Self::List { .. } => OperationKind::List,
            Self::Query { .. } => OperationKind::Query,
            Self::Clear { .. } => OperationKind::Clear,
        }
    }

    /// Returns the target entity type.
    #[must_use]
    pub const fn entity_type(&self) -> &EntityType {
        match self {
            Self::Save { entity_type, .. }
            | Self::Get { entity_type, .. }
            | Self::Delete { entity_type, .. }
            | Self::List { entity_type }
            | Self::Query { entity_type, .. }
            | Self::Clear { entity_type } => entity_type,
        }
    }

    /// Returns the record id for `get` and `delete`.
    #[must_use]
    pub const fn id(&self) -> Option<RecordId> {
        match self {
            Self::Get { id, .. } | Self::Delete { id, .. } => Some(*id),
            Self::Save { .. } | Self::List { .. } | Self::Query { .. } | Self::Clear { .. } => None,
        }
    }

    /// Returns the record for `save`.
    #[must_use]
    pub const fn data(&self) -> Option<&Record> {
        match self {
            Self::Save { data, .. } => Some(data),
            _ => None,
        }
    }

    /// Returns the filters for `query`.
    #[must_use]
    pub const fn filters(&self) -> Option<&Record> {
        match self {
            Self::Query { filters, .. } => Some(filters),
            _ => None,
        }
    }
}

impl TryFrom<StorageAction> for StorageOperation {
    type Error = StorageDomainError;

    fn try_from(action: StorageAction) -> Result<Self, Self::Error> {
        let operation = match action {
            StorageAction::Save(payload) => Self::Save {
                entity_type: EntityType::new(payload.entity_type)?,
                data: payload.data,
            },
            StorageAction::Get(payload) => Self::Get {
                entity_type: EntityType::new(payload.entity_type)?,
                id: payload.id,
            },
            StorageAction::Delete(payload) => Self::Delete {
                entity_type: EntityType::new(payload.entity_type)?,
                id: payload.id,
            },
            StorageAction::List(payload) => Self::List {
                entity_type: EntityType::new(payload.entity_type)?,
            },
            StorageAction::Query(payload) => Self::Query {
                entity_type: EntityType::new(payload.entity_type)?,
                filters: payload.filters,
            },
            StorageAction::Clear(payload) => Self::Clear {
                entity_type: EntityType::new(payload.entity_type)?,
            },
        };
        Ok(operation)
    }
}
