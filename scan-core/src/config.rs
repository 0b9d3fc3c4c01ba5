use crate::{Error, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Client-side knobs shared by every scan iterator.
///
/// Loaded from JSON, e.g. `{"count": 100, "max_fetches": 10000}`. Both
/// fields are optional, and the default config leaves the wire options
/// untouched.
#[derive(Deserialize, Default, Clone, Debug, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ScanConfig {
    /// COUNT hint applied when the caller did not give one explicitly
    #[serde(default)]
    pub count: Option<u64>,
    /// upper bound on fetches issued by a single traversal
    #[serde(default)]
    pub max_fetches: Option<usize>,
}

impl ScanConfig {
    pub fn from_slice(buf: &[u8]) -> Result<Self> {
        let config: ScanConfig = serde_json::from_slice(buf)
            .map_err(|e| Error::Config(format!("cannot deserialize ScanConfig: {e}")))?;
        config.validate()
    }

    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut buf = vec![];
        reader.read_to_end(&mut buf)?;
        Self::from_slice(&buf)
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let f = File::open(path)?;
        Self::from_reader(f)
    }

    fn validate(self) -> Result<Self> {
        if self.count == Some(0) {
            return Err(Error::Config("count must be positive".to_owned()));
        }
        if self.max_fetches == Some(0) {
            return Err(Error::Config("max_fetches must be positive".to_owned()));
        }
        Ok(self)
    }

    #[inline]
    pub fn count(&self) -> Option<u64> {
        self.count
    }

    #[inline]
    pub fn max_fetches(&self) -> Option<usize> {
        self.max_fetches
    }
}
