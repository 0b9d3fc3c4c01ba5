mod commands;
mod dataset;
mod glob;
mod store;

pub use commands::CommandSet;
pub use dataset::Dataset;
pub use glob::matches as glob_matches;
pub use store::{MemStore, Object, DEFAULT_COUNT};
