//! User interaction used while resolving playlist entries.
//!
//! The resolver only talks to the user through the [`Interaction`] trait:
//! free text, a choice from a fixed set, and plain output lines. The
//! terminal implementation is [`ConsolePrompt`]; tests substitute
//! [`mocks::ScriptedPrompt`].
//!
//! # Example
//!
//! ```ignore
//! use music_manager::prompt::{ConsolePrompt, Interaction};
//!
//! let mut prompt = ConsolePrompt::new();
//! prompt.display("0: [Change artist]");
//! let answer = prompt.prompt_choice("Pick one", &["0".to_string()])?;
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use dialoguer::Input;
use dialoguer::theme::ColorfulTheme;

use crate::error::{Error, Result};

/// Blocking question/answer channel to the operator.
pub trait Interaction {
    /// Ask for free-form text.
    fn prompt_text(&mut self, message: &str) -> Result<String>;

    /// Ask until the answer is one of `choices`, then return it.
    fn prompt_choice(&mut self, message: &str, choices: &[String]) -> Result<String>;

    /// Show a line of output.
    fn display(&mut self, message: &str);
}

/// Terminal prompts backed by dialoguer.
pub struct ConsolePrompt {
    theme: ColorfulTheme,
}

impl ConsolePrompt {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for ConsolePrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl Interaction for ConsolePrompt {
    fn prompt_text(&mut self, message: &str) -> Result<String> {
        Input::<String>::with_theme(&self.theme)
            .with_prompt(message)
            .interact_text()
            .map(|answer| answer.trim().to_string())
            .map_err(prompt_error)
    }

    fn prompt_choice(&mut self, message: &str, choices: &[String]) -> Result<String> {
        let prompt = format!("{} [{}]", message, choice_hint(choices));
        Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .validate_with(|input: &String| -> std::result::Result<(), String> {
                if choices.iter().any(|c| c == input.trim()) {
                    Ok(())
                } else {
                    Err(format!("Please choose one of {}", choice_hint(choices)))
                }
            })
            .interact_text()
            .map(|answer| answer.trim().to_string())
            .map_err(prompt_error)
    }

    fn display(&mut self, message: &str) {
        println!("{}", message);
    }
}

/// `0/1/2` for short menus, `0-41` for long ones.
fn choice_hint(choices: &[String]) -> String {
    match choices {
        [] => String::new(),
        [first, .., last] if choices.len() > 8 => format!("{}-{}", first, last),
        _ => choices.join("/"),
    }
}

fn prompt_error(err: dialoguer::Error) -> Error {
    match err {
        // Ctrl+C while the terminal is in raw mode
        dialoguer::Error::IO(e) if e.kind() == std::io::ErrorKind::Interrupted => {
            Error::Interrupted
        }
        dialoguer::Error::IO(e) => Error::prompt(e.to_string()),
    }
}

/// Set when the user presses Ctrl+C outside a prompt.
///
/// The reconciler checks it between entries so that a stop never leaves a
/// half-written line behind.
#[derive(Debug, Clone, Default)]
pub struct InterruptFlag(Arc<AtomicBool>);

impl InterruptFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a flag wired to the process Ctrl+C handler.
    pub fn install() -> Result<Self> {
        let flag = Self::new();
        let handle = flag.clone();
        ctrlc::set_handler(move || {
            tracing::info!("Interrupt received, stopping after the current entry");
            handle.trigger();
        })
        .map_err(|e| Error::config(format!("Failed to install Ctrl+C handler: {}", e)))?;
        Ok(flag)
    }

    pub fn trigger(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Scripted prompt for tests.
#[cfg(test)]
pub mod mocks {
    use super::*;
    use std::collections::VecDeque;

    /// One recorded call on the prompt.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum PromptCall {
        Text(String),
        Choice { message: String, choices: Vec<String> },
        Display(String),
    }

    /// Answers questions from a fixed script and records everything.
    ///
    /// Choice answers that aren't in the offered set are skipped, the way a
    /// real prompt would ask again. Running out of answers behaves like the
    /// user pressing Ctrl+C.
    #[derive(Debug, Default)]
    pub struct ScriptedPrompt {
        answers: VecDeque<String>,
        pub calls: Vec<PromptCall>,
    }

    impl ScriptedPrompt {
        pub fn new<I, S>(answers: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            Self {
                answers: answers.into_iter().map(Into::into).collect(),
                calls: Vec::new(),
            }
        }

        /// A prompt that must never be asked anything.
        pub fn silent() -> Self {
            Self::default()
        }

        /// Number of questions asked (text and choice).
        pub fn questions(&self) -> usize {
            self.calls
                .iter()
                .filter(|c| !matches!(c, PromptCall::Display(_)))
                .count()
        }

        /// Choice sets offered, in order.
        pub fn menus(&self) -> Vec<Vec<String>> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    PromptCall::Choice { choices, .. } => Some(choices.clone()),
                    _ => None,
                })
                .collect()
        }

        pub fn displayed(&self) -> Vec<&str> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    PromptCall::Display(line) => Some(line.as_str()),
                    _ => None,
                })
                .collect()
        }

        pub fn remaining(&self) -> usize {
            self.answers.len()
        }
    }

    impl Interaction for ScriptedPrompt {
        fn prompt_text(&mut self, message: &str) -> Result<String> {
            self.calls.push(PromptCall::Text(message.to_string()));
            self.answers.pop_front().ok_or(Error::Interrupted)
        }

        fn prompt_choice(&mut self, message: &str, choices: &[String]) -> Result<String> {
            self.calls.push(PromptCall::Choice {
                message: message.to_string(),
                choices: choices.to_vec(),
            });
            while let Some(answer) = self.answers.pop_front() {
                if choices.contains(&answer) {
                    return Ok(answer);
                }
            }
            Err(Error::Interrupted)
        }

        fn display(&mut self, message: &str) {
            self.calls.push(PromptCall::Display(message.to_string()));
        }
    }
}
