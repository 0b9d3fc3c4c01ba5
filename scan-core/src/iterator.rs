use crate::command::{ScanClient, ScanCommand, ScanRequest};
use crate::config::ScanConfig;
use crate::decoder::PageDecoder;
use crate::options::ScanOptions;
use crate::value::{Entry, Key, Value};
use crate::{Error, Result};
use log::debug;
use std::collections::VecDeque;

/// this is an iterator abstraction for walking a collection through a
/// scan-family command. It is forward-only, restartable with `rewind`.
pub trait ScanIterator {
    /// true iff an undelivered entry is buffered, never fetches by itself
    fn valid(&self) -> bool;
    /// drop everything buffered and restart from cursor 0
    fn rewind(&mut self) -> Result<()>;
    fn next(&mut self) -> Result<()>;

    fn key(&self) -> Option<&Key>;
    fn current(&self) -> Option<&Value>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// `rewind` has not been called yet
    NotStarted,
    /// the next fetch uses `cursor`, which is only 0 before the first fetch
    Active { cursor: u64 },
    /// the server returned cursor 0 (or a fetch failed), no more pages
    Exhausted,
}

/// Generic engine behind every scan iterator.
///
/// Holds at most one decoded page. When the buffer runs dry the next page is
/// fetched, skipping over pages that advance the cursor without carrying any
/// element, until either an element shows up or the cursor is back at 0.
pub struct ScanCursor<'c, C: ScanClient + ?Sized> {
    client: &'c C,
    command: ScanCommand,
    decoder: PageDecoder,
    key: Option<String>,
    options: ScanOptions,
    // options rendered once, sent unchanged with every fetch
    option_args: Vec<String>,
    config: ScanConfig,

    state: State,
    pending: VecDeque<Entry>,
    // number of entries decoded since the last rewind
    position: u64,
    fetches: usize,
}

impl<'c, C: ScanClient + ?Sized> ScanCursor<'c, C> {
    /// Bind `command` to `client`.
    ///
    /// Fails right away with [`Error::NotSupported`] when the client cannot
    /// run `command`.
    pub fn new(
        client: &'c C,
        command: ScanCommand,
        key: Option<&str>,
        options: ScanOptions,
        config: ScanConfig,
    ) -> Result<Self> {
        if !client.supports(command.name()) {
            return Err(Error::not_supported(command.name()));
        }
        match (command.takes_key(), key) {
            (true, None) => {
                return Err(Error::InvalidOption(format!(
                    "{command} requires a collection key"
                )))
            }
            (false, Some(key)) => {
                return Err(Error::InvalidOption(format!(
                    "{command} does not take a collection key, got {key:?}"
                )))
            }
            _ => {}
        }
        let options = options.or_count(config.count());
        let option_args = options.to_args();
        Ok(Self {
            client,
            command,
            decoder: PageDecoder::for_command(command),
            key: key.map(str::to_owned),
            options,
            option_args,
            config,
            state: State::NotStarted,
            pending: VecDeque::new(),
            position: 0,
            fetches: 0,
        })
    }

    pub fn command(&self) -> ScanCommand {
        self.command
    }

    pub fn collection_key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Number of fetches issued since the last rewind.
    pub fn fetches(&self) -> usize {
        self.fetches
    }

    /// Pull-style view of the traversal. Rewinds on the first pull, yields
    /// every entry in order and ends after the first error.
    pub fn entries(&mut self) -> Entries<'_, 'c, C> {
        Entries {
            cursor: self,
            started: false,
            done: false,
        }
    }

    fn fill(&mut self) -> Result<()> {
        while self.pending.is_empty() {
            let cursor = match self.state {
                State::Active { cursor } => cursor,
                State::NotStarted | State::Exhausted => return Ok(()),
            };
            if let Err(e) = self.fetch_page(cursor) {
                self.state = State::Exhausted;
                self.pending.clear();
                return Err(e);
            }
        }
        Ok(())
    }

    fn fetch_page(&mut self, cursor: u64) -> Result<()> {
        if let Some(limit) = self.config.max_fetches() {
            if self.fetches >= limit {
                return Err(Error::Exceed(format!(
                    "{} did not complete within {limit} fetches",
                    self.command
                )));
            }
        }
        let request = ScanRequest::new(
            self.command,
            self.key.as_deref(),
            cursor,
            self.option_args.clone(),
        );
        self.fetches += 1;
        let page = self.client.fetch(&request)?;
        let next_cursor = page.cursor;
        let entries = self.decoder.decode(page.items, self.position)?;
        debug!(
            "{} {:?} cursor {cursor}: {} entries, next cursor {next_cursor}",
            self.command,
            self.key,
            entries.len()
        );

        self.position += entries.len() as u64;
        self.pending.extend(entries);
        self.state = if next_cursor == 0 {
            State::Exhausted
        } else {
            State::Active {
                cursor: next_cursor,
            }
        };
        Ok(())
    }
}

impl<'c, C: ScanClient + ?Sized> ScanIterator for ScanCursor<'c, C> {
    fn valid(&self) -> bool {
        !self.pending.is_empty()
    }

    fn rewind(&mut self) -> Result<()> {
        self.pending.clear();
        self.position = 0;
        self.fetches = 0;
        self.state = State::Active { cursor: 0 };
        self.fill()
    }

    fn next(&mut self) -> Result<()> {
        self.pending.pop_front();
        self.fill()
    }

    fn key(&self) -> Option<&Key> {
        self.pending.front().map(|e| &e.key)
    }

    fn current(&self) -> Option<&Value> {
        self.pending.front().map(|e| &e.value)
    }
}

/// Returned by [`ScanCursor::entries`].
pub struct Entries<'a, 'c, C: ScanClient + ?Sized> {
    cursor: &'a mut ScanCursor<'c, C>,
    started: bool,
    done: bool,
}

impl<'a, 'c, C: ScanClient + ?Sized> std::iter::Iterator for Entries<'a, 'c, C> {
    type Item = Result<Entry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let res = if self.started {
            self.cursor.fill()
        } else {
            self.started = true;
            self.cursor.rewind()
        };
        if let Err(e) = res {
            self.done = true;
            return Some(Err(e));
        }
        match self.cursor.pending.pop_front() {
            Some(entry) => Some(Ok(entry)),
            None => {
                self.done = true;
                None
            }
        }
    }
}
