//! Command registry.
//!
//! The registry is the single source of truth for dispatch, `help`, and
//! `man`. Each entry pairs a lowercase name with its description, usage,
//! and action function.

pub mod builtin;

use crate::config::Config;
use crate::output::Block;
use crate::remote::RemoteRequest;
use crate::shell::History;
use crate::theme::ThemeStore;
use crate::{Error, Result};

/// Result of running an action. Everything except `Print` is a side effect
/// the execution loop or the model carries out.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Append a block to the scroll log (skipped when empty).
    Print(Block),
    /// Nothing to append.
    Silent,
    /// Empty the scroll log.
    Clear,
    /// Re-insert the welcome banner.
    Banner,
    OpenModal { title: String, body: Block },
    StartMatrix,
    /// Suspend on network or clipboard I/O; the result arrives later.
    Remote(RemoteRequest),
    Quit,
}

/// Everything an action may read or change.
pub struct Invocation<'a> {
    pub args: &'a [String],
    pub registry: &'a Registry,
    pub history: &'a History,
    pub theme: &'a mut ThemeStore,
    pub config: &'a Config,
}

impl Invocation<'_> {
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }
}

pub type Action = fn(&mut Invocation<'_>) -> Outcome;

#[derive(Clone, Copy)]
pub struct CommandSpec {
    pub name: &'static str,
    pub usage: &'static str,
    pub description: &'static str,
    pub action: Action,
}

impl std::fmt::Debug for CommandSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandSpec")
            .field("name", &self.name)
            .field("usage", &self.usage)
            .finish()
    }
}

/// Ordered, lowercase-unique set of commands.
#[derive(Debug, Default)]
pub struct Registry {
    commands: Vec<CommandSpec>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in command.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for spec in builtin::COMMANDS {
            if let Err(e) = registry.register(*spec) {
                crate::tlog_error!("Skipping built-in command: {}", e);
            }
        }
        registry
    }

    /// Add a command. Names must be non-empty, lowercase, free of
    /// whitespace, and not already registered.
    pub fn register(&mut self, spec: CommandSpec) -> Result<()> {
        let name = spec.name;
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(Error::Validation(format!("invalid command name '{name}'")));
        }
        if name != name.to_lowercase() {
            return Err(Error::Validation(format!(
                "command name '{name}' must be lowercase"
            )));
        }
        if self.get(name).is_some() {
            return Err(Error::Validation(format!("duplicate command '{name}'")));
        }
        self.commands.push(spec);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&CommandSpec> {
        self.commands.iter().find(|c| c.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandSpec> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
