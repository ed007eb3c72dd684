use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

/// Error that occurs when opening a pseudo-file fails.
#[derive(Debug, thiserror::Error)]
#[error("failed to open file `{path}`: {source}")]
pub struct FileOpenError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

impl FileOpenError {
    /// Returns `true` if the file did not exist, e.g. because the container
    /// exited and its cgroup directory was removed.
    pub fn is_not_found(&self) -> bool {
        self.source.kind() == io::ErrorKind::NotFound
    }
}

/// Opens a file at the given path and wraps it in a [`BufReader`].
///
/// # Errors
///
/// Returns a [`FileOpenError`] if the file cannot be opened.
///
/// # Example
/// ```no_run
/// # use docker_memory_exporter::fsutil;
/// let reader = fsutil::open_file_reader("/sys/fs/cgroup/memory/memory.stat")?;
/// # Ok::<(), fsutil::FileOpenError>(())
/// ```
pub fn open_file_reader(path: impl AsRef<Path>) -> Result<BufReader<File>, FileOpenError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| FileOpenError {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}
