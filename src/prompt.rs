//! Interactive prompts
//!
//! Everything that asks the user something goes through [`Prompter`]. The
//! terminal implementation uses `dialoguer`; [`ScriptedPrompter`] replays
//! canned answers so controllers can be driven without a TTY.
//!
//! Cancellation (Esc, Ctrl-C inside a prompt) is reported as `None` and is a
//! clean abort for the caller, never an error.

use anyhow::{bail, Result};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, MultiSelect, Select};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;

pub trait Prompter {
    /// Pick one of `choices`; `None` when cancelled
    fn select(&self, message: &str, choices: &[String]) -> Result<Option<usize>>;

    /// Pick any subset of `choices`, starting from `defaults`; `None` when cancelled
    fn select_multiple(
        &self,
        message: &str,
        choices: &[String],
        defaults: &[bool],
    ) -> Result<Option<Vec<usize>>>;

    /// Yes/no question. Cancelling counts as "no".
    fn confirm(&self, message: &str, default: bool) -> Result<bool>;

    /// Free text; `None` when cancelled or left empty
    fn input(&self, message: &str) -> Result<Option<String>>;
}

/// Prompts rendered on the terminal
#[derive(Default)]
pub struct DialoguerPrompter {
    theme: ColorfulTheme,
}

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Prompter for DialoguerPrompter {
    fn select(&self, message: &str, choices: &[String]) -> Result<Option<usize>> {
        Ok(Select::with_theme(&self.theme)
            .with_prompt(message)
            .items(choices)
            .default(0)
            .interact_opt()?)
    }

    fn select_multiple(
        &self,
        message: &str,
        choices: &[String],
        defaults: &[bool],
    ) -> Result<Option<Vec<usize>>> {
        Ok(MultiSelect::with_theme(&self.theme)
            .with_prompt(message)
            .items(choices)
            .defaults(defaults)
            .interact_opt()?)
    }

    fn confirm(&self, message: &str, default: bool) -> Result<bool> {
        let answer = Confirm::with_theme(&self.theme)
            .with_prompt(message)
            .default(default)
            .interact_opt()?;
        Ok(answer.unwrap_or(false))
    }

    fn input(&self, message: &str) -> Result<Option<String>> {
        let text: Option<String> = cancelled_as_none(
            Input::with_theme(&self.theme)
                .with_prompt(message)
                .allow_empty(true)
                .interact_text(),
        )?;
        Ok(text
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty()))
    }
}

/// `interact_text` has no `_opt` variant; Ctrl-C surfaces as an interrupted read
fn cancelled_as_none<T>(result: dialoguer::Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(dialoguer::Error::IO(err)) if err.kind() == io::ErrorKind::Interrupted => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// A canned answer for [`ScriptedPrompter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Select by index (`None` = cancel)
    Select(Option<usize>),
    /// Select the choice whose label starts with this text
    Choose(String),
    SelectMultiple(Option<Vec<usize>>),
    /// Accept whatever was pre-selected
    AcceptDefaults,
    Confirm(bool),
    Input(Option<String>),
}

/// Replays answers in order and records every question asked.
///
/// Asking a question with no answer left, or with an answer of the wrong
/// shape, is an error.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: RefCell<VecDeque<Answer>>,
    asked: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: RefCell::new(answers.into_iter().collect()),
            asked: RefCell::new(Vec::new()),
        }
    }

    /// Messages of every prompt shown so far
    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }

    pub fn remaining(&self) -> usize {
        self.answers.borrow().len()
    }

    fn next(&self, message: &str) -> Result<Answer> {
        self.asked.borrow_mut().push(message.to_string());
        match self.answers.borrow_mut().pop_front() {
            Some(answer) => Ok(answer),
            None => bail!("No scripted answer left for prompt: {message}"),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn select(&self, message: &str, choices: &[String]) -> Result<Option<usize>> {
        match self.next(message)? {
            Answer::Select(Some(index)) if index >= choices.len() => {
                bail!("Scripted choice {index} out of range for prompt: {message}")
            }
            Answer::Select(index) => Ok(index),
            Answer::Choose(label) => match choices.iter().position(|c| c.starts_with(&label)) {
                Some(index) => Ok(Some(index)),
                None => bail!("No choice starting with '{label}' for prompt: {message}"),
            },
            other => bail!("Expected a select answer for '{message}', got {other:?}"),
        }
    }

    fn select_multiple(
        &self,
        message: &str,
        choices: &[String],
        defaults: &[bool],
    ) -> Result<Option<Vec<usize>>> {
        match self.next(message)? {
            Answer::SelectMultiple(Some(selection))
                if selection.iter().any(|&index| index >= choices.len()) =>
            {
                bail!("Scripted selection {selection:?} out of range for prompt: {message}")
            }
            Answer::SelectMultiple(selection) => Ok(selection),
            Answer::AcceptDefaults => Ok(Some(
                defaults
                    .iter()
                    .enumerate()
                    .filter_map(|(i, selected)| selected.then_some(i))
                    .collect(),
            )),
            other => bail!("Expected a multi-select answer for '{message}', got {other:?}"),
        }
    }

    fn confirm(&self, message: &str, _default: bool) -> Result<bool> {
        match self.next(message)? {
            Answer::Confirm(answer) => Ok(answer),
            other => bail!("Expected a confirm answer for '{message}', got {other:?}"),
        }
    }

    fn input(&self, message: &str) -> Result<Option<String>> {
        match self.next(message)? {
            Answer::Input(text) => Ok(text),
            other => bail!("Expected an input answer for '{message}', got {other:?}"),
        }
    }
}
