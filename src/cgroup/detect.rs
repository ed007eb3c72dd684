use std::fmt;
use std::path::Path;

use super::{Error, Result};

/// The cgroup hierarchy layouts a host may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CgroupVersion {
    /// One hierarchy per controller, e.g. `<root>/memory/...`.
    V1,
    /// The unified hierarchy, recognised by `<root>/cgroup.controllers`.
    V2,
}

impl fmt::Display for CgroupVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CgroupVersion::V1 => f.write_str("v1"),
            CgroupVersion::V2 => f.write_str("v2"),
        }
    }
}

/// Detects which cgroup layout is mounted at `root`.
///
/// A `cgroup.controllers` file at the root only exists on a pure unified
/// hierarchy. Hybrid hosts keep the v1 `memory` controller and are reported as
/// [`CgroupVersion::V1`].
///
/// # Errors
///
/// - [`Error::MissingHierarchy`] if neither layout is recognised.
/// - [`Error::ExistenceCheck`] if probing a path fails.
pub fn detect_version(root: impl AsRef<Path>) -> Result<CgroupVersion> {
    let root = root.as_ref();

    let controllers = root.join("cgroup.controllers");
    if controllers
        .try_exists()
        .map_err(|source| Error::ExistenceCheck {
            path: controllers.clone(),
            source,
        })?
    {
        return Ok(CgroupVersion::V2);
    }

    if root.join("memory").is_dir() {
        return Ok(CgroupVersion::V1);
    }

    Err(Error::MissingHierarchy {
        root: root.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_v1() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir(root.path().join("memory")).unwrap();
        assert_eq!(detect_version(root.path()).unwrap(), CgroupVersion::V1);
    }

    #[test]
    fn test_detect_v2() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join("cgroup.controllers"), "cpu io memory pids\n").unwrap();
        assert_eq!(detect_version(root.path()).unwrap(), CgroupVersion::V2);
    }

    #[test]
    fn test_detect_missing_hierarchy() {
        let root = tempfile::tempdir().unwrap();
        let err = detect_version(root.path()).unwrap_err();
        match err {
            Error::MissingHierarchy { root: err_root } => assert_eq!(err_root, root.path()),
            other => panic!("unexpected error: {other}"),
        }
    }
}
