use crate::command::{Layout, ScanCommand};
use crate::value::{Entry, Key, Value, WireValue};
use crate::{Error, Result};

/// Turns the flat element list of a page into typed entries.
///
/// One strategy per collection kind:
/// - keyspace and set members are singles, keyed by their position in the
///   whole traversal
/// - hash fields are `(field, value)` pairs, field names go through
///   [`Key::coerce`] and values keep their native type
/// - sorted-set members are `(member, score)` pairs, members are coerced like
///   hash fields and every score becomes a float
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDecoder {
    Keyspace,
    Hash,
    Set,
    SortedSet,
}

impl PageDecoder {
    pub fn for_command(command: ScanCommand) -> Self {
        match command {
            ScanCommand::Scan => PageDecoder::Keyspace,
            ScanCommand::HScan => PageDecoder::Hash,
            ScanCommand::SScan => PageDecoder::Set,
            ScanCommand::ZScan => PageDecoder::SortedSet,
        }
    }

    pub fn layout(&self) -> Layout {
        match self {
            PageDecoder::Keyspace | PageDecoder::Set => Layout::Single,
            PageDecoder::Hash | PageDecoder::SortedSet => Layout::Paired,
        }
    }

    /// Decode one page.
    ///
    /// `position` is the number of entries already delivered by the
    /// traversal, used as the first key of single-layout pages.
    pub fn decode(&self, items: Vec<WireValue>, position: u64) -> Result<Vec<Entry>> {
        match self {
            PageDecoder::Keyspace | PageDecoder::Set => decode_singles(items, position),
            PageDecoder::Hash => decode_pairs(items, |v| Ok(Value::from(v))),
            PageDecoder::SortedSet => decode_pairs(items, Value::score),
        }
    }
}

fn decode_singles(items: Vec<WireValue>, position: u64) -> Result<Vec<Entry>> {
    items
        .into_iter()
        .zip(position..)
        .map(|(item, pos)| {
            let pos = i64::try_from(pos)
                .map_err(|_| Error::Protocol(format!("position {pos} overflow")))?;
            Ok(Entry {
                key: Key::Int(pos),
                value: Value::from(item),
            })
        })
        .collect()
}

fn decode_pairs<F>(items: Vec<WireValue>, value: F) -> Result<Vec<Entry>>
where
    F: Fn(WireValue) -> Result<Value>,
{
    if items.len() % 2 != 0 {
        return Err(Error::Protocol(format!(
            "paired reply has odd number of elements: {}",
            items.len()
        )));
    }
    let mut entries = Vec::with_capacity(items.len() / 2);
    let mut iter = items.into_iter();
    while let (Some(k), Some(v)) = (iter.next(), iter.next()) {
        entries.push(Entry {
            key: Key::coerce(k)?,
            value: value(v)?,
        });
    }
    Ok(entries)
}
