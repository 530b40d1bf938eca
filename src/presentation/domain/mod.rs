//! View model handed to presentation adapters.

mod view;

pub use view::{Prompt, View};
