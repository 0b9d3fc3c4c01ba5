use crate::commands::CommandSet;
use crate::glob;
use log::debug;
use scan_core::{
    CommandSupport, Error, RawPage, Result, ScanCommand, ScanFetcher, ScanRequest, WireValue,
};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// page size used when a request carries no COUNT
pub const DEFAULT_COUNT: usize = 10;

const WRONGTYPE: &str = "WRONGTYPE Operation against a key holding the wrong kind of value";

#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Str(String),
    Hash(BTreeMap<String, String>),
    Set(BTreeSet<String>),
    ZSet(BTreeMap<String, f64>),
}

/// An in-process keyspace answering scan-family requests.
///
/// The cursor is the offset of the next element in key order. A page covers
/// `COUNT` elements and `MATCH` is applied to that page afterwards, so a page
/// whose elements are all filtered out comes back empty with a non-zero
/// cursor.
#[derive(Clone)]
pub struct MemStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    keyspace: RwLock<BTreeMap<String, Object>>,
    commands: CommandSet,
    // number of scan requests answered
    served: AtomicU64,
}

struct PageOptions {
    pattern: Option<String>,
    count: usize,
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemStore {
    pub fn new() -> Self {
        Self::with_commands(CommandSet::all())
    }

    pub fn with_commands(commands: CommandSet) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                keyspace: RwLock::new(BTreeMap::new()),
                commands,
                served: AtomicU64::new(0),
            }),
        }
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        self.write()?.insert(key.to_owned(), Object::Str(value.to_owned()));
        Ok(())
    }

    pub fn hset(&self, key: &str, field: &str, value: &str) -> Result<()> {
        let mut keyspace = self.write()?;
        let obj = keyspace
            .entry(key.to_owned())
            .or_insert_with(|| Object::Hash(BTreeMap::new()));
        match obj {
            Object::Hash(fields) => {
                fields.insert(field.to_owned(), value.to_owned());
                Ok(())
            }
            _ => Err(Error::Client(WRONGTYPE.to_owned())),
        }
    }

    pub fn sadd(&self, key: &str, member: &str) -> Result<()> {
        let mut keyspace = self.write()?;
        let obj = keyspace
            .entry(key.to_owned())
            .or_insert_with(|| Object::Set(BTreeSet::new()));
        match obj {
            Object::Set(members) => {
                members.insert(member.to_owned());
                Ok(())
            }
            _ => Err(Error::Client(WRONGTYPE.to_owned())),
        }
    }

    pub fn zadd(&self, key: &str, score: f64, member: &str) -> Result<()> {
        if score.is_nan() {
            return Err(Error::Client("ERR value is not a valid float".to_owned()));
        }
        let mut keyspace = self.write()?;
        let obj = keyspace
            .entry(key.to_owned())
            .or_insert_with(|| Object::ZSet(BTreeMap::new()));
        match obj {
            Object::ZSet(members) => {
                members.insert(member.to_owned(), score);
                Ok(())
            }
            _ => Err(Error::Client(WRONGTYPE.to_owned())),
        }
    }

    pub fn insert(&self, key: &str, obj: Object) -> Result<()> {
        self.write()?.insert(key.to_owned(), obj);
        Ok(())
    }

    /// Returns whether `key` existed.
    pub fn del(&self, key: &str) -> Result<bool> {
        Ok(self.write()?.remove(key).is_some())
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read()?.is_empty())
    }

    pub fn served(&self) -> u64 {
        self.inner.served.load(Ordering::Relaxed)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<String, Object>>> {
        self.inner
            .keyspace
            .read()
            .map_err(|e| Error::Client(format!("keyspace lock poisoned: {e}")))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<String, Object>>> {
        self.inner
            .keyspace
            .write()
            .map_err(|e| Error::Client(format!("keyspace lock poisoned: {e}")))
    }

    /// Elements of the page starting at `offset`, before filtering, plus the
    /// total number of elements of the collection.
    fn page_of(
        &self,
        request: &ScanRequest,
        offset: usize,
        count: usize,
    ) -> Result<(Vec<(String, Option<WireValue>)>, usize)> {
        let keyspace = self.read()?;
        if request.command == ScanCommand::Scan {
            let page = keyspace
                .keys()
                .skip(offset)
                .take(count)
                .map(|k| (k.clone(), None))
                .collect();
            return Ok((page, keyspace.len()));
        }

        let key = request.key.as_deref().ok_or_else(|| {
            Error::Client(format!(
                "ERR wrong number of arguments for '{}' command",
                request.command.name().to_ascii_lowercase()
            ))
        })?;
        let page = match (request.command, keyspace.get(key)) {
            (_, None) => (vec![], 0),
            (ScanCommand::HScan, Some(Object::Hash(fields))) => (
                fields
                    .iter()
                    .skip(offset)
                    .take(count)
                    .map(|(f, v)| (f.clone(), Some(WireValue::Bulk(v.clone()))))
                    .collect(),
                fields.len(),
            ),
            (ScanCommand::SScan, Some(Object::Set(members))) => (
                members
                    .iter()
                    .skip(offset)
                    .take(count)
                    .map(|m| (m.clone(), None))
                    .collect(),
                members.len(),
            ),
            (ScanCommand::ZScan, Some(Object::ZSet(members))) => (
                members
                    .iter()
                    .skip(offset)
                    .take(count)
                    .map(|(m, score)| (m.clone(), Some(WireValue::Bulk(score.to_string()))))
                    .collect(),
                members.len(),
            ),
            _ => return Err(Error::Client(WRONGTYPE.to_owned())),
        };
        Ok(page)
    }
}

fn parse_options(options: &[String]) -> Result<PageOptions> {
    let mut parsed = PageOptions {
        pattern: None,
        count: DEFAULT_COUNT,
    };
    let mut iter = options.iter();
    while let Some(name) = iter.next() {
        let value = iter
            .next()
            .ok_or_else(|| Error::Client("ERR syntax error".to_owned()))?;
        if name.eq_ignore_ascii_case("MATCH") {
            parsed.pattern = Some(value.clone());
        } else if name.eq_ignore_ascii_case("COUNT") {
            parsed.count = match value.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => return Err(Error::Client("ERR syntax error".to_owned())),
            };
        } else {
            return Err(Error::Client("ERR syntax error".to_owned()));
        }
    }
    Ok(parsed)
}

impl CommandSupport for MemStore {
    fn supports(&self, command: &str) -> bool {
        self.inner.commands.supports(command)
    }
}

impl ScanFetcher for MemStore {
    fn fetch(&self, request: &ScanRequest) -> Result<RawPage> {
        if !self.supports(request.command.name()) {
            return Err(Error::Client(format!(
                "ERR unknown command '{}'",
                request.command.name()
            )));
        }
        let offset = request
            .cursor
            .parse::<usize>()
            .map_err(|_| Error::Client("ERR invalid cursor".to_owned()))?;
        let options = parse_options(&request.options)?;
        let (page, total) = self.page_of(request, offset, options.count)?;

        let next = offset.saturating_add(options.count);
        let cursor = if next >= total { 0 } else { next as u64 };
        let mut items = Vec::with_capacity(page.len() * 2);
        for (element, value) in page {
            if let Some(pattern) = &options.pattern {
                if !glob::matches(pattern, &element) {
                    continue;
                }
            }
            items.push(WireValue::Bulk(element));
            if let Some(value) = value {
                items.push(value);
            }
        }
        self.inner.served.fetch_add(1, Ordering::Relaxed);
        debug!(
            "{} {:?} cursor {offset} -> {} items, cursor {cursor}",
            request.command,
            request.key,
            items.len()
        );
        Ok(RawPage::new(cursor, items))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn hscan(key: &str, cursor: u64, options: &[&str]) -> ScanRequest {
        ScanRequest::new(
            ScanCommand::HScan,
            Some(key),
            cursor,
            options.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn hscan_pages() {
        let store = MemStore::new();
        for i in 0..5 {
            store.hset("h", &format!("f{i}"), &format!("v{i}")).unwrap();
        }
        let page = store.fetch(&hscan("h", 0, &["COUNT", "2"])).unwrap();
        assert_eq!(page.cursor, 2);
        assert_eq!(
            page.items,
            vec![
                WireValue::from("f0"),
                WireValue::from("v0"),
                WireValue::from("f1"),
                WireValue::from("v1"),
            ]
        );
        let page = store.fetch(&hscan("h", 4, &["COUNT", "2"])).unwrap();
        assert_eq!(page.cursor, 0);
        assert_eq!(page.items.len(), 2);
        assert_eq!(store.served(), 2);
    }

    #[test]
    fn match_makes_holes() {
        let store = MemStore::new();
        for f in ["a1", "a2", "b1", "b2"] {
            store.hset("h", f, "x").unwrap();
        }
        let page = store.fetch(&hscan("h", 0, &["MATCH", "b*", "COUNT", "2"])).unwrap();
        assert_eq!(page.cursor, 2);
        assert!(page.items.is_empty());
    }

    #[test]
    fn missing_key_is_empty() {
        let store = MemStore::new();
        let page = store.fetch(&hscan("nope", 0, &[])).unwrap();
        assert_eq!(page, RawPage::new(0, vec![]));
    }

    #[test]
    fn wrong_type_and_bad_args() {
        let store = MemStore::new();
        store.set("s", "v").unwrap();
        assert!(matches!(
            store.fetch(&hscan("s", 0, &[])),
            Err(Error::Client(msg)) if msg.starts_with("WRONGTYPE")
        ));
        assert!(matches!(store.hset("s", "f", "v"), Err(Error::Client(_))));
        let bad: [&[&str]; 4] = [&["COUNT", "0"], &["COUNT"], &["TYPE", "hash"], &["COUNT", "x"]];
        for options in bad {
            assert!(store.fetch(&hscan("s", 0, options)).is_err(), "{options:?}");
        }
        let mut req = hscan("s", 0, &[]);
        req.cursor = "abc".to_owned();
        assert!(store.fetch(&req).is_err());
    }

    #[test]
    fn zscan_scores_are_bulk() {
        let store = MemStore::new();
        store.zadd("z", 1.0, "one").unwrap();
        store.zadd("z", 2.5, "two").unwrap();
        store.zadd("z", f64::INFINITY, "top").unwrap();
        let req = ScanRequest::new(ScanCommand::ZScan, Some("z"), 0, vec![]);
        let page = store.fetch(&req).unwrap();
        assert_eq!(
            page.items,
            vec![
                WireValue::from("one"),
                WireValue::from("1"),
                WireValue::from("top"),
                WireValue::from("inf"),
                WireValue::from("two"),
                WireValue::from("2.5"),
            ]
        );
        assert!(store.zadd("z", f64::NAN, "nan").is_err());
    }

    #[test]
    fn scan_lists_keys() {
        let store = MemStore::new();
        store.set("k1", "v").unwrap();
        store.sadd("k2", "m").unwrap();
        let req = ScanRequest::new(ScanCommand::Scan, None, 0, vec![]);
        let page = store.fetch(&req).unwrap();
        assert_eq!(page.items, vec![WireValue::from("k1"), WireValue::from("k2")]);
        assert_eq!(page.cursor, 0);
    }

    #[test]
    fn disabled_command() {
        let store = MemStore::with_commands(CommandSet::all().without("SSCAN"));
        assert!(!store.supports("SSCAN"));
        let req = ScanRequest::new(ScanCommand::SScan, Some("s"), 0, vec![]);
        assert!(store.fetch(&req).is_err());
    }
}
