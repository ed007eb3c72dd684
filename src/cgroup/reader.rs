use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::fsutil;

use super::ReadError;
use super::stats::{StatParseError, parse_scalar, parse_table};

/// Opens `path` and hands the reader to `parse`, attaching the path to any error.
fn read_with<T>(
    path: &Path,
    parse: impl FnOnce(&mut BufReader<File>) -> Result<T, StatParseError>,
) -> Result<T, ReadError> {
    let mut buf = fsutil::open_file_reader(path).map_err(|err| {
        if err.is_not_found() {
            ReadError::NotFound { path: err.path }
        } else {
            ReadError::Io {
                path: err.path,
                source: err.source,
            }
        }
    })?;

    parse(&mut buf).map_err(|err| match err {
        // The cgroup directory can vanish between open and read.
        StatParseError::Io(source) if source.kind() == std::io::ErrorKind::NotFound => {
            ReadError::NotFound {
                path: path.to_path_buf(),
            }
        }
        StatParseError::Io(source) => ReadError::Io {
            path: path.to_path_buf(),
            source,
        },
        source => ReadError::Parse {
            path: path.to_path_buf(),
            source,
        },
    })
}

/// Reads a file holding a single base-10 integer, ignoring surrounding whitespace.
///
/// # Errors
///
/// - [`ReadError::NotFound`] if the file does not exist.
/// - [`ReadError::Parse`] if the content is not an integer, including content
///   that is not valid UTF-8.
/// - [`ReadError::Io`] for any other failure.
pub fn read_scalar(path: impl AsRef<Path>) -> Result<i64, ReadError> {
    read_with(path.as_ref(), parse_scalar)
}

/// Reads a whitespace-separated `key value` table.
///
/// # Errors
///
/// Same as [`read_scalar`]; a single malformed line fails the whole read.
pub fn read_table(path: impl AsRef<Path>) -> Result<HashMap<String, i64>, ReadError> {
    read_with(path.as_ref(), parse_table)
}
