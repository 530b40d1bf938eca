//! User interaction.
//!
//! The presentation context owns the `ui_*` actions. It shapes and validates
//! UI-level input and hands rendering to a [`ports::PresentationAdapter`]:
//!
//! - View model in [`domain`]
//! - The adapter port in [`ports`]
//! - Console and scripted adapters in [`adapters`]
//! - The UI controller agent in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
