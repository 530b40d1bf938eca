//! Adapter that replays queued answers and records what was shown.

use crate::contract::MenuOption;
use crate::presentation::domain::{Prompt, View};
use crate::presentation::ports::{PresentationAdapter, PresentationError, PresentationResult};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Non-interactive adapter for tests and piped runs.
///
/// Every `prompt`, `confirm` and `menu` call consumes the next queued answer.
/// Every rendered view, menus included, is recorded in order.
#[derive(Debug, Default)]
pub struct ScriptedAdapter {
    answers: Mutex<VecDeque<String>>,
    views: Mutex<Vec<View>>,
}

impl ScriptedAdapter {
    /// Creates an adapter that will answer with `answers` in order.
    #[must_use]
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: Mutex::new(answers.into_iter().map(Into::into).collect()),
            views: Mutex::new(Vec::new()),
        }
    }

    /// Queues another answer.
    pub fn push_answer(&self, answer: impl Into<String>) {
        lock(&self.answers).push_back(answer.into());
    }

    /// Returns every view rendered so far.
    #[must_use]
    pub fn views(&self) -> Vec<View> {
        lock(&self.views).clone()
    }

    /// Returns how many queued answers are left.
    #[must_use]
    pub fn remaining(&self) -> usize {
        lock(&self.answers).len()
    }

    fn next_answer(&self, label: &str) -> PresentationResult<String> {
        lock(&self.answers)
            .pop_front()
            .ok_or_else(|| PresentationError::ScriptExhausted(label.to_owned()))
    }

    fn record(&self, view: View) {
        lock(&self.views).push(view);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl PresentationAdapter for ScriptedAdapter {
    async fn display(&self, view: &View) -> PresentationResult<()> {
        self.record(view.clone());
        Ok(())
    }

    async fn prompt(&self, prompt: &Prompt) -> PresentationResult<String> {
        self.next_answer(&prompt.label)
    }

    async fn confirm(&self, question: &str, default: bool) -> PresentationResult<bool> {
        let answer = self.next_answer(question)?;
        Ok(parse_yes_no(&answer).unwrap_or(default))
    }

    async fn menu(&self, title: &str, options: &[MenuOption]) -> PresentationResult<String> {
        self.record(View::Menu {
            title: title.to_owned(),
            options: options.to_vec(),
        });
        self.next_answer(title)
    }
}

/// Interprets a yes/no answer. Blank or unrecognised input yields `None`.
pub(super) fn parse_yes_no(answer: &str) -> Option<bool> {
    match answer.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "true" => Some(true),
        "n" | "no" | "false" => Some(false),
        _ => None,
    }
}
