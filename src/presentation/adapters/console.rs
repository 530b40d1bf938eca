//! Terminal adapter rendering views through `minijinja` templates.

use super::scripted::parse_yes_no;
use crate::contract::MenuOption;
use crate::presentation::domain::{Prompt, View};
use crate::presentation::ports::{PresentationAdapter, PresentationError, PresentationResult};
use async_trait::async_trait;
use minijinja::{Environment, context};
use serde::Serialize;
use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};

const MESSAGE_TEMPLATE: &str = "[{{ kind | upper }}] {{ text }}";

const LIST_TEMPLATE: &str = "\n{{ title }}\n\
{% for item in items %}  {{ loop.index }}. [{{ 'x' if item.done else ' ' }}] {{ item.label }}\
{% if item.detail %} - {{ item.detail }}{% endif %}\n\
{% else %}  (nothing to show)\n{% endfor %}";

const MENU_TEMPLATE: &str = "\n{{ title }}\n\
{% for option in options %}  [{{ option.key }}] {{ option.label }}\n{% endfor %}";

const PROMPT_TEMPLATE: &str = "{{ label }}{% if default %} [{{ default }}]{% endif %}: ";

const CONFIRM_TEMPLATE: &str = "{{ question }} [{{ 'Y/n' if default else 'y/N' }}]: ";

const CHOICE_PROMPT: &str = "Choose an option: ";

/// Interactive adapter over a line-oriented reader and a writer.
///
/// Reads and writes are serialised through one lock so a prompt and its
/// answer are never interleaved with another call.
///
/// Terminal I/O blocks, so every call runs inside
/// [`tokio::task::block_in_place`]: the adapter must be driven from the
/// multi-threaded runtime.
pub struct ConsoleAdapter<R, W> {
    terminal: Mutex<Terminal<R, W>>,
}

struct Terminal<R, W> {
    input: R,
    output: W,
}

impl ConsoleAdapter<BufReader<Stdin>, Stdout> {
    /// Creates an adapter over the process's standard input and output.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R, W> ConsoleAdapter<R, W>
where
    R: BufRead + Send,
    W: Write + Send,
{
    /// Creates an adapter reading answers from `input` and rendering to
    /// `output`.
    #[must_use]
    pub const fn new(input: R, output: W) -> Self {
        Self {
            terminal: Mutex::new(Terminal { input, output }),
        }
    }

    /// Returns the underlying reader and writer.
    pub fn into_inner(self) -> (R, W) {
        let terminal = self
            .terminal
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        (terminal.input, terminal.output)
    }

    fn terminal(&self) -> MutexGuard<'_, Terminal<R, W>> {
        self.terminal.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs blocking terminal work without stalling other runtime tasks.
    fn blocking<T>(&self, work: impl FnOnce(&mut Terminal<R, W>) -> T) -> T {
        tokio::task::block_in_place(|| work(&mut self.terminal()))
    }
}

impl<R, W> Terminal<R, W>
where
    R: BufRead,
    W: Write,
{
    fn show_block(&mut self, template: &str, ctx: impl Serialize) -> PresentationResult<()> {
        let rendered = render(template, ctx)?;
        writeln!(self.output, "{}", rendered.trim_end()).map_err(PresentationError::io)?;
        self.output.flush().map_err(PresentationError::io)
    }

    fn ask(&mut self, template: &str, ctx: impl Serialize) -> PresentationResult<String> {
        let question = render(template, ctx)?;
        write!(self.output, "{question}").map_err(PresentationError::io)?;
        self.output.flush().map_err(PresentationError::io)?;
        self.read_line()
    }

    fn read_line(&mut self) -> PresentationResult<String> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(PresentationError::io)?;
        if read == 0 {
            return Err(PresentationError::InputClosed);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_owned())
    }
}

fn render(template: &str, ctx: impl Serialize) -> PresentationResult<String> {
    let environment = Environment::new();
    environment
        .render_str(template, ctx)
        .map_err(|error| PresentationError::Render(error.to_string()))
}

#[async_trait]
impl<R, W> PresentationAdapter for ConsoleAdapter<R, W>
where
    R: BufRead + Send,
    W: Write + Send,
{
    async fn display(&self, view: &View) -> PresentationResult<()> {
        let template = match view {
            View::Message { .. } => MESSAGE_TEMPLATE,
            View::List { .. } => LIST_TEMPLATE,
            View::Menu { .. } => MENU_TEMPLATE,
        };
        self.blocking(|terminal| terminal.show_block(template, view))
    }

    async fn prompt(&self, prompt: &Prompt) -> PresentationResult<String> {
        self.blocking(|terminal| terminal.ask(PROMPT_TEMPLATE, prompt))
    }

    async fn confirm(&self, question: &str, default: bool) -> PresentationResult<bool> {
        self.blocking(|terminal| loop {
            let answer = terminal.ask(CONFIRM_TEMPLATE, context! { question, default })?;
            if answer.trim().is_empty() {
                return Ok(default);
            }
            if let Some(confirmed) = parse_yes_no(&answer) {
                return Ok(confirmed);
            }
            terminal.show_block(MESSAGE_TEMPLATE, context! {
                kind => "warning",
                text => "Please answer y or n.",
            })?;
        })
    }

    async fn menu(&self, title: &str, options: &[MenuOption]) -> PresentationResult<String> {
        self.blocking(|terminal| {
            terminal.show_block(MENU_TEMPLATE, context! { title, options })?;
            terminal.ask(CHOICE_PROMPT, context! {})
        })
    }
}
