//! Port contracts for record persistence.

mod backend;

pub use backend::{StorageBackend, StorageBackendError, StorageBackendResult};

#[cfg(test)]
pub use backend::MockStorageBackend;
