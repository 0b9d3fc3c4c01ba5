#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use scan_core::{
    CommandSupport, Entry, Error, RawPage, Result, ScanFetcher, ScanIterator, ScanRequest,
    WireValue,
};

pub fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A client replaying canned replies. Every request is recorded so tests can
/// assert on the exact argument shape.
pub struct MockClient {
    supported: bool,
    pages: RefCell<VecDeque<Result<RawPage>>>,
    replay: Option<RawPage>,
    requests: RefCell<Vec<ScanRequest>>,
    capability_checks: Cell<usize>,
}

impl MockClient {
    pub fn new(pages: Vec<RawPage>) -> Self {
        Self {
            supported: true,
            pages: RefCell::new(pages.into_iter().map(Ok).collect()),
            replay: None,
            requests: RefCell::new(vec![]),
            capability_checks: Cell::new(0),
        }
    }

    /// Answers every fetch with the same page.
    pub fn replaying(page: RawPage) -> Self {
        let mut client = Self::new(vec![]);
        client.replay = Some(page);
        client
    }

    pub fn unsupported() -> Self {
        let mut client = Self::new(vec![]);
        client.supported = false;
        client
    }

    pub fn push_error(&self, err: Error) {
        self.pages.borrow_mut().push_back(Err(err));
    }

    pub fn requests(&self) -> Vec<ScanRequest> {
        self.requests.borrow().clone()
    }

    pub fn fetch_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn capability_checks(&self) -> usize {
        self.capability_checks.get()
    }

    /// `(key, cursor, options)` of every request, in order.
    pub fn calls(&self) -> Vec<(Option<String>, String, Vec<String>)> {
        self.requests
            .borrow()
            .iter()
            .map(|r| (r.key.clone(), r.cursor.clone(), r.options.clone()))
            .collect()
    }
}

impl CommandSupport for MockClient {
    fn supports(&self, _command: &str) -> bool {
        self.capability_checks.set(self.capability_checks.get() + 1);
        self.supported
    }
}

impl ScanFetcher for MockClient {
    fn fetch(&self, request: &ScanRequest) -> Result<RawPage> {
        self.requests.borrow_mut().push(request.clone());
        if let Some(page) = &self.replay {
            return Ok(page.clone());
        }
        self.pages
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(Error::Client("unexpected fetch".to_owned())))
    }
}

pub fn pairs(cursor: u64, items: &[(&str, &str)]) -> RawPage {
    let items = items
        .iter()
        .flat_map(|(k, v)| [WireValue::from(*k), WireValue::from(*v)])
        .collect();
    RawPage::new(cursor, items)
}

pub fn singles(cursor: u64, items: &[&str]) -> RawPage {
    RawPage::new(cursor, items.iter().map(|s| WireValue::from(*s)).collect())
}

pub fn opts(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

/// Walk with the external-iterator calls until `valid` turns false.
pub fn drain<I: ScanIterator>(iter: &mut I) -> Vec<Entry> {
    let mut entries = vec![];
    iter.rewind().unwrap();
    while iter.valid() {
        entries.push(Entry {
            key: iter.key().unwrap().clone(),
            value: iter.current().unwrap().clone(),
        });
        iter.next().unwrap();
    }
    entries
}
