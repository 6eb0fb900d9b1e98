//! Execution loop: history, scroll log, and dispatch.

use std::collections::BTreeSet;

use crate::commands::{Invocation, Outcome, Registry};
use crate::config::Config;
use crate::content;
use crate::output::{Block, Span};
use crate::remote::RemoteRequest;
use crate::theme::ThemeStore;
use crate::{tlog_debug, tlog_warn};

/// Append-only record of submitted lines, as typed.
#[derive(Debug, Default, Clone)]
pub struct History {
    entries: Vec<String>,
}

impl History {
    pub fn push(&mut self, line: &str) {
        self.entries.push(line.to_string());
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// Echo of a submitted line.
    Prompt(String),
    Output(Block),
}

/// The visible history of prompts and outputs.
#[derive(Debug, Default, Clone)]
pub struct ScrollLog {
    entries: Vec<Entry>,
}

impl ScrollLog {
    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&Entry> {
        self.entries.last()
    }
}

/// Side effects of a dispatch that the model must carry out.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    OpenModal { title: String, body: Block },
    StartMatrix,
    Remote { ticket: u64, request: RemoteRequest },
    Quit,
}

pub struct Shell {
    registry: Registry,
    history: History,
    log: ScrollLog,
    next_ticket: u64,
    pending: BTreeSet<u64>,
}

impl Shell {
    /// New shell whose log starts with the welcome banner.
    pub fn new(registry: Registry) -> Self {
        let mut log = ScrollLog::default();
        log.push(Entry::Output(content::banner()));
        Self {
            registry,
            history: History::default(),
            log,
            next_ticket: 0,
            pending: BTreeSet::new(),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn log(&self) -> &ScrollLog {
        &self.log
    }

    /// Remote tickets dispatched but not yet completed.
    pub fn pending(&self) -> impl Iterator<Item = u64> + '_ {
        self.pending.iter().copied()
    }

    /// Run one submitted line.
    ///
    /// History append and prompt echo happen before anything else, so a
    /// remote result always lands after its own prompt.
    pub fn execute(&mut self, raw: &str, theme: &mut ThemeStore, config: &Config) -> Effect {
        let raw = raw.trim();
        let mut tokens = raw.split_whitespace();
        let Some(token) = tokens.next() else {
            return Effect::None;
        };
        let args: Vec<String> = tokens.map(str::to_string).collect();

        self.history.push(raw);
        self.log.push(Entry::Prompt(raw.to_string()));

        let name = token.to_lowercase();
        let Some(action) = self.registry.get(&name).map(|c| c.action) else {
            tlog_debug!("Shell::execute not found: {}", token);
            self.log.push(Entry::Output(not_found(token)));
            return Effect::None;
        };
        tlog_debug!("Shell::execute name={} args={}", name, args.len());

        let outcome = action(&mut Invocation {
            args: &args,
            registry: &self.registry,
            history: &self.history,
            theme,
            config,
        });

        match outcome {
            Outcome::Print(block) => {
                // A block with no lines prints nothing; a blank line still prints.
                if !block.lines.is_empty() {
                    self.log.push(Entry::Output(block));
                }
                Effect::None
            }
            Outcome::Silent => Effect::None,
            Outcome::Clear => {
                self.log.clear();
                Effect::None
            }
            Outcome::Banner => {
                self.log.push(Entry::Output(content::banner()));
                Effect::None
            }
            Outcome::OpenModal { title, body } => Effect::OpenModal { title, body },
            Outcome::StartMatrix => Effect::StartMatrix,
            Outcome::Remote(request) => {
                self.next_ticket += 1;
                let ticket = self.next_ticket;
                self.pending.insert(ticket);
                Effect::Remote { ticket, request }
            }
            Outcome::Quit => Effect::Quit,
        }
    }

    /// Deliver the result of a remote action. Results append in completion
    /// order; an unknown or already-delivered ticket is dropped.
    pub fn complete(&mut self, ticket: u64, block: Block) -> bool {
        if !self.pending.remove(&ticket) {
            tlog_warn!("Shell::complete unknown ticket {}", ticket);
            return false;
        }
        if !block.is_empty() {
            self.log.push(Entry::Output(block));
        }
        true
    }
}

fn not_found(token: &str) -> Block {
    Block::from_lines(vec![vec![
        Span::plain("Command not found: "),
        Span::error(token),
        Span::plain(". Type 'help' to see the available commands."),
    ]
    .into()])
}
