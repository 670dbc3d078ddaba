// imgtool/src/shell/history.rs
use crate::commands::{COMMANDS, FLAG_HELP};
use dialoguer::{Completion, History};
use std::collections::VecDeque;

const DEFAULT_CAPACITY: usize = 500;

/// In-memory command history for the interactive prompt.
#[derive(Debug, Clone)]
pub struct ShellHistory {
    entries: VecDeque<String>,
    capacity: usize,
}

impl ShellHistory {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Most recent first. Blank lines and immediate repeats are not stored.
    pub fn record(&mut self, command_line: &str) {
        let line = command_line.trim();
        if line.is_empty() || self.entries.front().is_some_and(|last| last == line) {
            return;
        }

        self.entries.push_front(line.to_string());
        self.entries.truncate(self.capacity);
    }

    /// The most recent entry that extends `prefix`.
    pub fn suggest(&self, prefix: &str) -> Option<String> {
        if prefix.trim().is_empty() {
            return None;
        }

        self.entries
            .iter()
            .find(|entry| entry.len() > prefix.len() && entry.starts_with(prefix))
            .cloned()
    }
}

impl Default for ShellHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl History<String> for ShellHistory {
    fn read(&self, pos: usize) -> Option<String> {
        self.entries.get(pos).cloned()
    }

    fn write(&mut self, val: &String) {
        self.record(val);
    }
}

/// Tab completion: command names, then `process` flags, then whole lines from history.
pub struct CommandCompleter {
    history: ShellHistory,
}

impl CommandCompleter {
    pub fn new(history: ShellHistory) -> Self {
        Self { history }
    }

    fn complete_word(word: &str, candidates: impl Iterator<Item = &'static str>) -> Option<&'static str> {
        let lower = word.to_lowercase();
        let mut matches = candidates.filter(|candidate| candidate.starts_with(&lower) && *candidate != lower);
        let first = matches.next()?;
        // Ambiguous prefixes are left alone.
        match matches.next() {
            Some(_) => None,
            None => Some(first),
        }
    }
}

impl Completion for CommandCompleter {
    fn get(&self, input: &str) -> Option<String> {
        if input.is_empty() || input.ends_with(char::is_whitespace) {
            return self.history.suggest(input);
        }

        let (head, word) = match input.rfind(char::is_whitespace) {
            Some(idx) => input.split_at(idx + 1),
            None => ("", input),
        };

        let completed = if head.is_empty() {
            Self::complete_word(word, COMMANDS.iter().map(|(name, _)| *name))
        } else if word.starts_with("--") {
            Self::complete_word(word, FLAG_HELP.iter().map(|(flag, _)| *flag))
        } else {
            None
        };

        match completed {
            Some(full) => Some(format!("{}{}", head, full)),
            None => self.history.suggest(input),
        }
    }
}
