use crate::store::{MemStore, Object};
use scan_core::{Error, Result};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// A JSON document seeding a [`MemStore`]:
///
/// ```json
/// {
///   "greeting": "hello",
///   "user:1": {"name": "ann", "age": "42"},
///   "tags": ["a", "b"],
///   "board": {"zset": {"ann": 12.5, "bob": 3}}
/// }
/// ```
#[derive(Deserialize, Debug)]
#[serde(transparent)]
pub struct Dataset {
    objects: BTreeMap<String, DatasetObject>,
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum DatasetObject {
    Str(String),
    Set(BTreeSet<String>),
    ZSet(SortedSet),
    Hash(BTreeMap<String, String>),
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct SortedSet {
    zset: BTreeMap<String, f64>,
}

impl Dataset {
    pub fn from_slice(buf: &[u8]) -> Result<Self> {
        serde_json::from_slice(buf)
            .map_err(|e| Error::Config(format!("cannot deserialize dataset: {e}")))
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut f = File::open(path)?;
        let mut buf = vec![];
        f.read_to_end(&mut buf)?;
        Self::from_slice(&buf)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Write every object into `store`, replacing existing keys.
    pub fn load_into(self, store: &MemStore) -> Result<()> {
        for (key, obj) in self.objects {
            let obj = match obj {
                DatasetObject::Str(s) => Object::Str(s),
                DatasetObject::Set(members) => Object::Set(members),
                DatasetObject::ZSet(SortedSet { zset }) => Object::ZSet(zset),
                DatasetObject::Hash(fields) => Object::Hash(fields),
            };
            store.insert(&key, obj)?;
        }
        Ok(())
    }
}
