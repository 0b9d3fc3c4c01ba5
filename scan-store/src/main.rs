use clap::{Parser, ValueEnum};
use log::info;
use scan_core::{
    Error, HashKey, Keyspace, Result, ScanConfig, ScanIterator, ScanOptions, SetKey, SortedSetKey,
};
use scan_store::{Dataset, MemStore};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Kind {
    Keys,
    Hash,
    Set,
    Zset,
}

#[derive(Parser)]
#[command(name = "scan-store", about = "Scan a JSON dataset the way a client would")]
struct Opt {
    dataset: PathBuf,
    #[arg(value_enum)]
    kind: Kind,
    /// collection key, not used by `keys`
    key: Option<String>,
    #[arg(short, long = "match")]
    pattern: Option<String>,
    #[arg(short, long)]
    count: Option<u64>,
    #[arg(long)]
    config: Option<PathBuf>,
}

fn print_all<I: ScanIterator>(mut iter: I) -> Result<()> {
    iter.rewind()?;
    while let (Some(key), Some(value)) = (iter.key(), iter.current()) {
        println!("{key}\t{value}");
        iter.next()?;
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let opt: Opt = Opt::parse();

    let config = match &opt.config {
        Some(path) => {
            let config = ScanConfig::open(path)?;
            info!("scan-store load config: {config:?}");
            config
        }
        None => ScanConfig::default(),
    };
    let store = MemStore::new();
    Dataset::open(&opt.dataset)?.load_into(&store)?;

    let options = ScanOptions::new(opt.pattern.as_deref(), opt.count)?;
    let key = collection_key(opt.kind, opt.key.as_deref())?;
    match (opt.kind, key) {
        (Kind::Keys, _) => print_all(Keyspace::with_options(&store, options, config)?),
        (Kind::Hash, Some(key)) => print_all(HashKey::with_options(&store, key, options, config)?),
        (Kind::Set, Some(key)) => print_all(SetKey::with_options(&store, key, options, config)?),
        (Kind::Zset, Some(key)) => {
            print_all(SortedSetKey::with_options(&store, key, options, config)?)
        }
        (_, None) => Err(Error::Config("a collection key is required".to_owned())),
    }
}

/// The keyspace takes no collection key, every other kind needs one.
fn collection_key(kind: Kind, key: Option<&str>) -> Result<Option<&str>> {
    match (kind, key) {
        (Kind::Keys, Some(key)) => Err(Error::Config(format!(
            "keys takes no collection key, got '{key}'"
        ))),
        (Kind::Keys, None) => Ok(None),
        (_, None) => Err(Error::Config("a collection key is required".to_owned())),
        (_, key) => Ok(key),
    }
}
