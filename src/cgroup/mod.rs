//! Read-only access to the per-container memory accounting pseudo-files.
//!
//! Files are located under a host-mounted cgroup root, namespaced by the
//! controller and the Docker container ID:
//!
//! ```text
//! <root>/memory/docker/<container-id>/memory.usage_in_bytes
//! <root>/memory/docker/<container-id>/memory.stat
//! ```
//!
//! Only the cgroup v1 layout is supported. On a host running the unified (v2)
//! hierarchy [`open_memory_cgroup`] fails with [`Error::NotImplemented`] instead
//! of reading files that would not hold the expected values.
//!
//! # Key Components
//!
//! - [`read_scalar`] / [`read_table`] — the two pseudo-file shapes.
//! - [`detect_version`] — layout detection at the mount root.
//! - [`MemoryCgroup`] — path construction and per-container reads for v1.
mod detect;
mod error;
mod reader;
pub mod stats;
mod v1;

use std::path::Path;

pub use detect::{CgroupVersion, detect_version};
pub use error::{Error, ReadError, Result};
pub use reader::{read_scalar, read_table};
pub use v1::{MemoryCgroup, MemoryReading};

/// Detects the layout at `root` and returns a reader for it.
///
/// # Errors
///
/// - [`Error::NotImplemented`] if `root` holds the unified hierarchy.
/// - Any error from [`detect_version`].
pub fn open_memory_cgroup(root: impl AsRef<Path>) -> Result<MemoryCgroup> {
    let root = root.as_ref();
    match detect_version(root)? {
        CgroupVersion::V1 => Ok(MemoryCgroup::new(root)),
        version => Err(Error::NotImplemented {
            version,
            root: root.to_path_buf(),
        }),
    }
}
