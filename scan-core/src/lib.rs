mod errors;

mod adapters;
mod command;
mod config;
mod decoder;
mod iterator;
mod options;
mod value;

pub use adapters::{HashKey, Keyspace, SetKey, SortedSetKey};
pub use command::{CommandSupport, Layout, ScanClient, ScanCommand, ScanFetcher, ScanRequest};
pub use config::ScanConfig;
pub use decoder::PageDecoder;
pub use errors::{Error, Result};
pub use iterator::{Entries, ScanCursor, ScanIterator};
pub use options::ScanOptions;
pub use value::{Entry, Key, RawPage, Value, WireValue};
