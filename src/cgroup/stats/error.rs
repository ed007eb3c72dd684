//! Defines structured error types for parsing cgroup pseudo-files.
//!
//! # Error Types
//!
//! - [`StatParseError::MissingValue`] — A table line holds a key but no value token.
//! - [`StatParseError::InvalidKeyValue`] — A table line's value token is not a base-10 integer.
//! - [`StatParseError::InvalidValue`] — A scalar file (e.g. `memory.usage_in_bytes`) failed to parse.
//! - [`StatParseError::InvalidUtf8`] — The file content is not text.
//! - [`StatParseError::Io`] — Wraps underlying I/O errors during reads.
//!
//! # Example
//!
//! ```rust
//! use docker_memory_exporter::cgroup::stats::StatParseError;
//!
//! fn parse_value(val: &str) -> Result<i64, StatParseError> {
//!     val.parse::<i64>().map_err(|source| StatParseError::InvalidValue {
//!         value: val.to_string(),
//!         source,
//!     })
//! }
//!
//! parse_value("not-a-number").unwrap_err();
//! ```

use std::num::ParseIntError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatParseError {
    #[error("missing value for '{key}' at line {line}")]
    MissingValue { key: String, line: usize },

    #[error("invalid value for '{key}' at line {line}: '{value}': {source}")]
    InvalidKeyValue {
        key: String,
        value: String,
        line: usize,
        #[source]
        source: ParseIntError,
    },

    #[error("invalid value '{value}': {source}")]
    InvalidValue {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("content is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error("error during I/O: {0}")]
    Io(#[from] std::io::Error),
}
