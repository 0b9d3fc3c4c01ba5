use crate::{Error, Result};

/// `MATCH` / `COUNT` options of a scan traversal.
///
/// Fixed once built, the same option list is sent with every fetch of the
/// iterator that owns it, rewinds included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOptions {
    pattern: Option<String>,
    count: Option<u64>,
}

impl ScanOptions {
    pub fn new(pattern: Option<&str>, count: Option<u64>) -> Result<Self> {
        if count == Some(0) {
            return Err(Error::InvalidOption("COUNT must be positive".to_owned()));
        }
        Ok(Self {
            pattern: pattern.map(str::to_owned),
            count,
        })
    }

    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    pub fn count(&self) -> Option<u64> {
        self.count
    }

    /// Fill in a count hint if none was configured.
    pub(crate) fn or_count(mut self, count: Option<u64>) -> Self {
        if self.count.is_none() {
            self.count = count;
        }
        self
    }

    /// `[MATCH, pattern, COUNT, n]`, dropping the pairs that are not set.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![];
        if let Some(pattern) = &self.pattern {
            args.push("MATCH".to_owned());
            args.push(pattern.clone());
        }
        if let Some(count) = self.count {
            args.push("COUNT".to_owned());
            args.push(count.to_string());
        }
        args
    }
}
