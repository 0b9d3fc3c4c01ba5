use crate::value::RawPage;
use crate::Result;
use std::fmt;

/// How the elements of a page are laid out on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// member, member, ...
    Single,
    /// field, value, field, value, ...
    Paired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanCommand {
    Scan,
    HScan,
    SScan,
    ZScan,
}

impl ScanCommand {
    pub const ALL: [ScanCommand; 4] = [
        ScanCommand::Scan,
        ScanCommand::HScan,
        ScanCommand::SScan,
        ScanCommand::ZScan,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ScanCommand::Scan => "SCAN",
            ScanCommand::HScan => "HSCAN",
            ScanCommand::SScan => "SSCAN",
            ScanCommand::ZScan => "ZSCAN",
        }
    }

    pub fn layout(&self) -> Layout {
        match self {
            ScanCommand::Scan | ScanCommand::SScan => Layout::Single,
            ScanCommand::HScan | ScanCommand::ZScan => Layout::Paired,
        }
    }

    /// Whether the command operates on a single collection key.
    pub fn takes_key(&self) -> bool {
        !matches!(self, ScanCommand::Scan)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|cmd| cmd.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for ScanCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The arguments of one scan-family call.
///
/// `cursor` is already rendered as a decimal string and `options` is the
/// flattened `MATCH`/`COUNT` list, empty when no option is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    pub command: ScanCommand,
    pub key: Option<String>,
    pub cursor: String,
    pub options: Vec<String>,
}

impl ScanRequest {
    pub fn new(command: ScanCommand, key: Option<&str>, cursor: u64, options: Vec<String>) -> Self {
        Self {
            command,
            key: key.map(str::to_owned),
            cursor: cursor.to_string(),
            options,
        }
    }

    /// Positional arguments as they go on the wire, without the command name.
    pub fn args(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(2 + self.options.len());
        if let Some(key) = &self.key {
            args.push(key.clone());
        }
        args.push(self.cursor.clone());
        args.extend(self.options.iter().cloned());
        args
    }
}

/// Capability check of the command factory behind a client.
pub trait CommandSupport {
    fn supports(&self, command: &str) -> bool;
}

/// Issues exactly one paginated call and returns its raw reply.
///
/// Transport failures are reported as [`crate::Error::Client`] and are
/// handed back to the caller of the iterator untouched.
pub trait ScanFetcher {
    fn fetch(&self, request: &ScanRequest) -> Result<RawPage>;
}

pub trait ScanClient: CommandSupport + ScanFetcher {}

impl<T: CommandSupport + ScanFetcher + ?Sized> ScanClient for T {}

impl<T: CommandSupport + ?Sized> CommandSupport for &T {
    fn supports(&self, command: &str) -> bool {
        (**self).supports(command)
    }
}

impl<T: ScanFetcher + ?Sized> ScanFetcher for &T {
    fn fetch(&self, request: &ScanRequest) -> Result<RawPage> {
        (**self).fetch(request)
    }
}
