use scan_core::{CommandSupport, ScanCommand};
use std::collections::HashSet;

/// The set of commands a store accepts.
///
/// Names are kept upper-case and looked up case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSet {
    names: HashSet<String>,
}

impl Default for CommandSet {
    fn default() -> Self {
        Self::all()
    }
}

impl CommandSet {
    pub fn empty() -> Self {
        Self {
            names: HashSet::new(),
        }
    }

    /// Every scan-family command.
    pub fn all() -> Self {
        ScanCommand::ALL
            .iter()
            .fold(Self::empty(), |set, cmd| set.with(cmd.name()))
    }

    pub fn with(mut self, name: &str) -> Self {
        self.names.insert(name.to_ascii_uppercase());
        self
    }

    pub fn without(mut self, name: &str) -> Self {
        self.names.remove(&name.to_ascii_uppercase());
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(&name.to_ascii_uppercase())
    }
}

impl CommandSupport for CommandSet {
    fn supports(&self, command: &str) -> bool {
        self.contains(command)
    }
}
