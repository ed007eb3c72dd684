use std::path::PathBuf;

use super::detect::CgroupVersion;
use super::stats::StatParseError;

/// Errors reading a single pseudo-file. These concern one container only.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("pseudo-file `{path}` does not exist")]
    NotFound { path: PathBuf },
    #[error("failed to read `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse `{path}`: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: StatParseError,
    },
}

impl ReadError {
    /// Returns `true` if the file was missing, which usually means the container
    /// exited after it was listed.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ReadError::NotFound { .. })
    }
}

/// Errors about the cgroup hierarchy as a whole. No container can be read.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cgroup {version} hierarchy at `{root}` is not supported")]
    NotImplemented { version: CgroupVersion, root: PathBuf },
    #[error("no memory cgroup hierarchy found at `{root}`")]
    MissingHierarchy { root: PathBuf },
    #[error("failed to check if path `{path}` exists: {source}")]
    ExistenceCheck {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
