//! Port contracts for presentation adapters.

mod adapter;

pub use adapter::{PresentationAdapter, PresentationError, PresentationResult};

#[cfg(test)]
pub use adapter::MockPresentationAdapter;
