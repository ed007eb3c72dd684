//! Parsers for the two shapes of cgroup v1 pseudo-files.
//!
//! - [`parse_scalar`]: files holding a single signed integer, such as
//!   `memory.usage_in_bytes`.
//! - [`parse_table`]: files holding one whitespace-separated `key value` pair per
//!   line, such as `memory.stat`.

use std::collections::HashMap;
use std::io::BufRead;

use super::StatParseError;

/// Reads the whole buffer, trims surrounding whitespace and parses the rest as a
/// base-10 signed integer.
///
/// # Errors
///
/// Returns [`StatParseError::InvalidValue`] if the trimmed content is not an
/// integer, [`StatParseError::InvalidUtf8`] if it is not text and
/// [`StatParseError::Io`] if reading fails.
pub fn parse_scalar<R: BufRead>(buf: &mut R) -> Result<i64, StatParseError> {
    let mut bytes = Vec::new();
    buf.read_to_end(&mut bytes)?;
    let content = std::str::from_utf8(&bytes)?.trim();
    content
        .parse::<i64>()
        .map_err(|source| StatParseError::InvalidValue {
            value: content.to_string(),
            source,
        })
}

/// Parses a key/value table such as `memory.stat`.
///
/// Blank lines are skipped. Every other line must contain at least a key and a
/// value token; tokens past the second are ignored. A repeated key overwrites
/// the earlier value. End of input ends the table, whether or not the last line
/// is newline-terminated.
///
/// # Errors
///
/// Returns [`StatParseError::MissingValue`], [`StatParseError::InvalidKeyValue`]
/// or [`StatParseError::InvalidUtf8`] for the first malformed line; nothing
/// parsed so far is returned in that case.
pub fn parse_table<R: BufRead>(buf: &mut R) -> Result<HashMap<String, i64>, StatParseError> {
    let mut table = HashMap::new();
    let mut bytes = Vec::new();
    let mut lineno = 0;

    while buf.read_until(b'\n', &mut bytes)? != 0 {
        lineno += 1;
        let line = std::str::from_utf8(&bytes)?;
        let mut parts = line.split_whitespace();
        if let Some(key) = parts.next() {
            let Some(val) = parts.next() else {
                return Err(StatParseError::MissingValue {
                    key: key.to_string(),
                    line: lineno,
                });
            };
            let parsed = val
                .parse::<i64>()
                .map_err(|source| StatParseError::InvalidKeyValue {
                    key: key.to_string(),
                    value: val.to_string(),
                    line: lineno,
                    source,
                })?;
            table.insert(key.to_string(), parsed);
        }

        bytes.clear();
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_ignores_surrounding_whitespace() {
        let stat = parse_scalar(&mut "  \n524288000 \n\n".as_bytes()).unwrap();
        assert_eq!(stat, 524288000);
    }

    #[test]
    fn test_scalar_negative() {
        let stat = parse_scalar(&mut "-1\n".as_bytes()).unwrap();
        assert_eq!(stat, -1);
    }

    #[test]
    fn test_scalar_invalid() {
        let err = parse_scalar(&mut "12ab\n".as_bytes()).unwrap_err();
        match err {
            StatParseError::InvalidValue { value, .. } => assert_eq!(value, "12ab"),
            other => panic!("Expected InvalidValue error, got {other:?}"),
        }
    }

    #[test]
    fn test_scalar_empty() {
        let err = parse_scalar(&mut "".as_bytes()).unwrap_err();
        assert!(matches!(err, StatParseError::InvalidValue { .. }));
    }

    #[test]
    fn test_scalar_invalid_utf8() {
        let err = parse_scalar(&mut &b"12\xff3\n"[..]).unwrap_err();
        assert!(matches!(err, StatParseError::InvalidUtf8(_)), "got {err:?}");
    }

    #[test]
    fn test_table_without_trailing_newline() {
        let data = "total_cache 104857600\ntotal_rss 52428800";
        let table = parse_table(&mut data.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table["total_cache"], 104857600);
        assert_eq!(table["total_rss"], 52428800);
    }

    #[test]
    fn test_table_skips_blank_lines_and_extra_whitespace() {
        let data = "\
   cache     10

rss\t20
";
        let table = parse_table(&mut data.as_bytes()).unwrap();
        assert_eq!(table["cache"], 10);
        assert_eq!(table["rss"], 20);
    }

    #[test]
    fn test_table_duplicate_key_last_write_wins() {
        let data = "cache 1\ncache 2\n";
        let table = parse_table(&mut data.as_bytes()).unwrap();
        assert_eq!(table["cache"], 2);
    }

    #[test]
    fn test_table_missing_value_fails_whole_read() {
        let data = "cache 1\nbroken\nrss 3\n";
        let err = parse_table(&mut data.as_bytes()).unwrap_err();
        match err {
            StatParseError::MissingValue { key, line } => {
                assert_eq!(key, "broken");
                assert_eq!(line, 2);
            }
            other => panic!("Expected MissingValue error, got {other:?}"),
        }
    }

    #[test]
    fn test_table_invalid_value() {
        let data = "cache 1\nrss abc\n";
        let err = parse_table(&mut data.as_bytes()).unwrap_err();
        match err {
            StatParseError::InvalidKeyValue {
                key, value, line, ..
            } => {
                assert_eq!(key, "rss");
                assert_eq!(value, "abc");
                assert_eq!(line, 2);
            }
            other => panic!("Expected InvalidKeyValue error, got {other:?}"),
        }
    }

    #[test]
    fn test_table_invalid_utf8() {
        let err = parse_table(&mut &b"total_cache 1\n\xfe\xff 2\n"[..]).unwrap_err();
        assert!(matches!(err, StatParseError::InvalidUtf8(_)), "got {err:?}");
    }

    #[test]
    fn test_empty_table() {
        let table = parse_table(&mut "".as_bytes()).unwrap();
        assert!(table.is_empty());
    }
}
