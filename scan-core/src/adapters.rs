//! One iterator type per scan-family command.
//!
//! Each type only binds the right command (and with it the decoder) to a
//! [`ScanCursor`], everything else is shared.

use crate::command::{ScanClient, ScanCommand};
use crate::config::ScanConfig;
use crate::iterator::{ScanCursor, ScanIterator};
use crate::options::ScanOptions;
use crate::value::{Key, Value};
use crate::Result;
use std::ops::{Deref, DerefMut};

macro_rules! delegate_scan_iterator {
    ($name:ident) => {
        impl<'c, C: ScanClient + ?Sized> ScanIterator for $name<'c, C> {
            fn valid(&self) -> bool {
                self.0.valid()
            }

            fn rewind(&mut self) -> Result<()> {
                self.0.rewind()
            }

            fn next(&mut self) -> Result<()> {
                self.0.next()
            }

            fn key(&self) -> Option<&Key> {
                self.0.key()
            }

            fn current(&self) -> Option<&Value> {
                self.0.current()
            }
        }

        impl<'c, C: ScanClient + ?Sized> Deref for $name<'c, C> {
            type Target = ScanCursor<'c, C>;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl<'c, C: ScanClient + ?Sized> DerefMut for $name<'c, C> {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.0
            }
        }

        impl<'c, C: ScanClient + ?Sized> $name<'c, C> {
            pub fn into_inner(self) -> ScanCursor<'c, C> {
                self.0
            }
        }
    };
}

macro_rules! collection_iterator {
    ($(#[$doc:meta])* $name:ident, $command:expr) => {
        $(#[$doc])*
        pub struct $name<'c, C: ScanClient + ?Sized>(ScanCursor<'c, C>);

        impl<'c, C: ScanClient + ?Sized> $name<'c, C> {
            pub fn new(
                client: &'c C,
                key: &str,
                pattern: Option<&str>,
                count: Option<u64>,
            ) -> Result<Self> {
                let options = ScanOptions::new(pattern, count)?;
                Self::with_options(client, key, options, ScanConfig::default())
            }

            pub fn with_options(
                client: &'c C,
                key: &str,
                options: ScanOptions,
                config: ScanConfig,
            ) -> Result<Self> {
                ScanCursor::new(client, $command, Some(key), options, config).map(Self)
            }
        }

        delegate_scan_iterator!($name);
    };
}

/// Iterates the whole keyspace with `SCAN`. Keys are positions, values are
/// the key names.
pub struct Keyspace<'c, C: ScanClient + ?Sized>(ScanCursor<'c, C>);

impl<'c, C: ScanClient + ?Sized> Keyspace<'c, C> {
    pub fn new(client: &'c C, pattern: Option<&str>, count: Option<u64>) -> Result<Self> {
        let options = ScanOptions::new(pattern, count)?;
        Self::with_options(client, options, ScanConfig::default())
    }

    pub fn with_options(client: &'c C, options: ScanOptions, config: ScanConfig) -> Result<Self> {
        ScanCursor::new(client, ScanCommand::Scan, None, options, config).map(Self)
    }
}

delegate_scan_iterator!(Keyspace);

collection_iterator!(
    /// Iterates the fields of a hash with `HSCAN`. Keys are field names,
    /// values are field values.
    HashKey,
    ScanCommand::HScan
);

collection_iterator!(
    /// Iterates the members of a set with `SSCAN`. Keys are positions,
    /// values are members.
    SetKey,
    ScanCommand::SScan
);

collection_iterator!(
    /// Iterates a sorted set with `ZSCAN`. Keys are members, values are
    /// their scores as floats.
    SortedSetKey,
    ScanCommand::ZScan
);
