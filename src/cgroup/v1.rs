use std::path::{Path, PathBuf};

use crate::container::ContainerID;

use super::ReadError;
use super::reader::{read_scalar, read_table};
use super::stats::MemoryStat;

const MEMORY_CONTROLLER: &str = "memory";
const DOCKER_PARENT: &str = "docker";
const USAGE_FILE: &str = "memory.usage_in_bytes";
const STAT_FILE: &str = "memory.stat";

/// Raw readings of one container's memory controller files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryReading {
    /// Total memory usage in bytes, page cache included.
    pub usage_bytes: i64,
    pub stat: MemoryStat,
}

/// Locates per-container files under the v1 memory controller:
/// `<root>/memory/docker/<container-id>/<file>`.
#[derive(Debug, Clone)]
pub struct MemoryCgroup {
    docker_dir: PathBuf,
}

impl MemoryCgroup {
    /// # Arguments
    ///
    /// * `root` - The cgroup mount root, e.g. `/host/sys/fs/cgroup`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            docker_dir: root.as_ref().join(MEMORY_CONTROLLER).join(DOCKER_PARENT),
        }
    }

    pub fn container_dir(&self, container_id: &ContainerID) -> PathBuf {
        self.docker_dir.join(container_id.as_ref())
    }

    pub fn usage_path(&self, container_id: &ContainerID) -> PathBuf {
        self.container_dir(container_id).join(USAGE_FILE)
    }

    pub fn stat_path(&self, container_id: &ContainerID) -> PathBuf {
        self.container_dir(container_id).join(STAT_FILE)
    }

    /// Reads `memory.usage_in_bytes` and then `memory.stat`.
    ///
    /// # Errors
    ///
    /// Returns the first [`ReadError`] encountered; a missing usage file means
    /// the stat file is never opened.
    pub fn read(&self, container_id: &ContainerID) -> Result<MemoryReading, ReadError> {
        let usage_bytes = read_scalar(self.usage_path(container_id))?;
        let stat = MemoryStat::from(read_table(self.stat_path(container_id))?);
        log::trace!(
            "read memory cgroup: container_id={}, usage={}, total_cache={:?}",
            container_id,
            usage_bytes,
            stat.total_cache()
        );

        Ok(MemoryReading { usage_bytes, stat })
    }
}
