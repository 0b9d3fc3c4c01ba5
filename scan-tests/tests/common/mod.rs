#![allow(dead_code)]

use rand::distributions::Alphanumeric;
use rand::Rng;
use scan_core::{Entry, Result, ScanIterator};
use scan_store::MemStore;
use std::collections::{BTreeMap, BTreeSet};

pub fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn random_name<R: Rng>(rng: &mut R, prefix: &str) -> String {
    let suffix: String = rng
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(char::from)
        .collect();
    format!("{prefix}{suffix}")
}

/// Fill `key` with `n` random fields, some of them integer-looking.
/// Returns what was written.
pub fn random_hash<R: Rng>(
    rng: &mut R,
    store: &MemStore,
    key: &str,
    n: usize,
) -> Result<BTreeMap<String, String>> {
    let mut fields = BTreeMap::new();
    while fields.len() < n {
        let field = if rng.gen_bool(0.3) {
            rng.gen_range(0..10_000_i64).to_string()
        } else {
            random_name(rng, "field:")
        };
        let value = random_name(rng, "value:");
        store.hset(key, &field, &value)?;
        fields.insert(field, value);
    }
    Ok(fields)
}

pub fn random_set<R: Rng>(
    rng: &mut R,
    store: &MemStore,
    key: &str,
    n: usize,
) -> Result<BTreeSet<String>> {
    let mut members = BTreeSet::new();
    while members.len() < n {
        let member = random_name(rng, "member:");
        store.sadd(key, &member)?;
        members.insert(member);
    }
    Ok(members)
}

pub fn random_zset<R: Rng>(
    rng: &mut R,
    store: &MemStore,
    key: &str,
    n: usize,
) -> Result<BTreeMap<String, f64>> {
    let mut members = BTreeMap::new();
    while members.len() < n {
        let member = random_name(rng, "member:");
        let score = if rng.gen_bool(0.5) {
            rng.gen_range(-100..100_i64) as f64
        } else {
            rng.gen_range(-100.0..100.0)
        };
        store.zadd(key, score, &member)?;
        members.insert(member, score);
    }
    Ok(members)
}

/// Drive `iter` with the external-iterator calls and collect every entry.
pub fn drain<I: ScanIterator>(iter: &mut I) -> Result<Vec<Entry>> {
    let mut entries = vec![];
    iter.rewind()?;
    while iter.valid() {
        if let (Some(key), Some(value)) = (iter.key(), iter.current()) {
            entries.push(Entry {
                key: key.clone(),
                value: value.clone(),
            });
        }
        iter.next()?;
    }
    Ok(entries)
}
