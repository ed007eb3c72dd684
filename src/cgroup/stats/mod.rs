//! Parsers and value types for the cgroup pseudo-files read on every scrape.
//!
//! # Main types
//!
//! - [`parse_scalar`] / [`parse_table`]: the two pseudo-file shapes.
//! - [`MemoryStat`]: the key/value table from `memory.stat`.
//! - [`MemoryCounters`]: both of the above plus runtime-reported limit and
//!   reservation, with [`MemoryCounters::true_usage`].

mod error;
mod memory;
mod parser;

pub use error::StatParseError;
pub use memory::{MemoryCounters, MemoryStat, TOTAL_CACHE_KEY};
pub use parser::{parse_scalar, parse_table};
