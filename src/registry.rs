#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

//! Command registry: stores and looks up [`MiCommand`] implementations.
//!
//! One registry per debugger session. All registration happens during the
//! single-threaded load phase; afterwards the registry is only read, so
//! dispatch needs no synchronization.

use std::collections::HashMap;

use crate::error::{MicmdError, Result};
use crate::handler::MiCommand;

const SUGGESTION_MAX_DISTANCE: usize = 3;

pub struct CommandRegistry {
    commands: HashMap<String, Box<dyn MiCommand>>,
}

impl CommandRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Register a command under its own name.
    ///
    /// Double-loading an extension must be a detectable error, not a silent
    /// overwrite, so an occupied name is rejected and the registry is left
    /// unchanged.
    ///
    /// # Errors
    /// `InvalidCommandName` for an empty name, `DuplicateCommand` when the
    /// name is already registered.
    pub fn register(&mut self, command: Box<dyn MiCommand>) -> Result<()> {
        let name = command.name().to_string();
        if name.is_empty() {
            return Err(MicmdError::InvalidCommandName(name));
        }
        if self.commands.contains_key(&name) {
            return Err(MicmdError::DuplicateCommand { name });
        }
        self.commands.insert(name, command);
        Ok(())
    }

    /// Look up a handler by its registered name. Pure lookup, no side
    /// effects.
    ///
    /// # Errors
    /// `UnknownCommand`, carrying the closest registered name when one is
    /// within edit distance of the typo.
    pub fn resolve(&self, name: &str) -> Result<&dyn MiCommand> {
        match self.commands.get(name) {
            Some(command) => Ok(command.as_ref()),
            None => Err(MicmdError::UnknownCommand {
                name: name.to_string(),
                suggestion: self.closest_name(name),
            }),
        }
    }

    /// All registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.commands.keys().cloned().collect();
        names.sort();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    fn closest_name(&self, typo: &str) -> Option<String> {
        self.commands
            .keys()
            .map(|candidate| (candidate, strsim::levenshtein(typo, candidate)))
            .filter(|(_, dist)| *dist <= SUGGESTION_MAX_DISTANCE)
            .min_by_key(|(_, dist)| *dist)
            .map(|(candidate, _)| candidate.clone())
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
