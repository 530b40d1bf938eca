//! Presentation adapter implementations.

mod console;
mod scripted;

pub use console::ConsoleAdapter;
pub use scripted::ScriptedAdapter;
