//! Domain types for the storage context.

mod entity;
mod operation;

pub use entity::{EntityType, StorageDomainError};
pub use operation::{OperationKind, StorageOperation};
