//! Renderable views and prompts.

use crate::contract::{ListItem, MenuOption, MessageKind};
use serde::Serialize;

/// Something an adapter renders without reading input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
    /// A one-line message.
    Message {
        /// Severity.
        kind: MessageKind,
        /// Message text, shown verbatim.
        text: String,
    },
    /// A titled list of rows.
    List {
        /// Heading.
        title: String,
        /// Rows, in display order.
        items: Vec<ListItem>,
    },
    /// A titled menu of keyed options.
    Menu {
        /// Heading.
        title: String,
        /// Options, in display order.
        options: Vec<MenuOption>,
    },
}

impl View {
    /// Creates a message view.
    #[must_use]
    pub fn message(kind: MessageKind, text: impl Into<String>) -> Self {
        Self::Message {
            kind,
            text: text.into(),
        }
    }
}

/// A free-text question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prompt {
    /// Label shown before the cursor.
    pub label: String,
    /// Value shown as the default and used for empty answers.
    pub default: Option<String>,
}

impl Prompt {
    /// Creates a prompt without a default.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            default: None,
        }
    }

    /// Sets the default answer.
    #[must_use]
    pub fn with_default(mut self, default: Option<String>) -> Self {
        self.default = default;
        self
    }
}
