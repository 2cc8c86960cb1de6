//! Prompt abstraction used by the interactive session
//!
//! The session never talks to the terminal directly. It asks a [`Prompter`]
//! for values, which lets the same flow run against cliclack (see
//! `tui::prompts`) or against a scripted answer queue ([`ScriptedPrompter`]).

use anyhow::Result;
use std::collections::VecDeque;

/// A validator: `Ok(())` accepts the input, `Err(reason)` asks again
pub type Validator = Box<dyn Fn(&str) -> Result<(), String>>;

/// One entry of a selection menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Stable identifier, used by scripted answers
    pub key: String,
    pub label: String,
    pub hint: String,
}

impl Choice {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            hint: String::new(),
        }
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = hint.into();
        self
    }
}

/// Source of user input plus a place to report progress
pub trait Prompter {
    /// Ask for text until `validate` accepts it. Empty input means `default`.
    fn input(&mut self, prompt: &str, default: &str, validate: Validator) -> Result<String>;

    /// Pick one of `choices`, returning its position
    fn select(&mut self, prompt: &str, choices: &[Choice]) -> Result<usize>;

    /// Yes/no question
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool>;

    fn info(&mut self, message: &str) -> Result<()>;

    fn success(&mut self, message: &str) -> Result<()>;

    fn warning(&mut self, message: &str) -> Result<()>;

    /// A titled block of text (summaries, lists)
    fn note(&mut self, title: &str, body: &str) -> Result<()>;
}

/// A scripted answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Typed text; an empty string accepts the default
    Text(String),
    /// Menu choice by key
    Pick(String),
    Confirm(bool),
}

/// Accept the default of a text prompt
pub fn default() -> Answer {
    Answer::Text(String::new())
}

pub fn text(value: &str) -> Answer {
    Answer::Text(value.to_string())
}

pub fn pick(key: &str) -> Answer {
    Answer::Pick(key.to_string())
}

pub fn yes() -> Answer {
    Answer::Confirm(true)
}

pub fn no() -> Answer {
    Answer::Confirm(false)
}

/// Prompter fed from a fixed list of answers.
///
/// Mirrors the interactive contract: a rejected text answer is recorded and
/// the next queued answer is tried, like a user typing again. Running out of
/// answers is an error rather than a hang.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    /// Rejection reasons produced by validators, in order
    pub rejections: Vec<String>,
    /// Everything reported through info/success/warning/note
    pub output: Vec<String>,
    /// The defaults offered by each text prompt, in order
    pub offered_defaults: Vec<(String, String)>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Answers not consumed by the flow
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next(&mut self, prompt: &str) -> Result<Answer> {
        self.answers
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("No scripted answer left for prompt: {}", prompt))
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&mut self, prompt: &str, default: &str, validate: Validator) -> Result<String> {
        self.offered_defaults
            .push((prompt.to_string(), default.to_string()));
        loop {
            let value = match self.next(prompt)? {
                Answer::Text(value) if value.is_empty() => default.to_string(),
                Answer::Text(value) => value,
                other => anyhow::bail!("Expected text for '{}', got {:?}", prompt, other),
            };
            match validate(value.as_str()) {
                Ok(()) => return Ok(value),
                Err(reason) => self.rejections.push(reason),
            }
        }
    }

    fn select(&mut self, prompt: &str, choices: &[Choice]) -> Result<usize> {
        match self.next(prompt)? {
            Answer::Pick(key) => choices.iter().position(|c| c.key == key).ok_or_else(|| {
                let offered: Vec<&str> = choices.iter().map(|c| c.key.as_str()).collect();
                anyhow::anyhow!(
                    "'{}' is not offered by '{}' (offered: {})",
                    key,
                    prompt,
                    offered.join(", ")
                )
            }),
            other => anyhow::bail!("Expected a choice for '{}', got {:?}", prompt, other),
        }
    }

    fn confirm(&mut self, prompt: &str, _default: bool) -> Result<bool> {
        match self.next(prompt)? {
            Answer::Confirm(value) => Ok(value),
            other => anyhow::bail!("Expected yes/no for '{}', got {:?}", prompt, other),
        }
    }

    fn info(&mut self, message: &str) -> Result<()> {
        self.output.push(message.to_string());
        Ok(())
    }

    fn success(&mut self, message: &str) -> Result<()> {
        self.output.push(message.to_string());
        Ok(())
    }

    fn warning(&mut self, message: &str) -> Result<()> {
        self.output.push(message.to_string());
        Ok(())
    }

    fn note(&mut self, title: &str, body: &str) -> Result<()> {
        self.output.push(format!("{}\n{}", title, body));
        Ok(())
    }
}
