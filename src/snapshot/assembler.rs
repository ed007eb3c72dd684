use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::cgroup::stats::MemoryCounters;
use crate::cgroup::{self, MemoryCgroup};
use crate::container::ContainerRecord;
use crate::error::ResultOkLogExt;
use crate::identity;
use crate::runtime::{self, ContainerRuntime};

use super::{ContainerError, ContainerMetrics, ScrapeError, Snapshot};

/// Builds a [`Snapshot`] on demand.
///
/// Failures reading a single container's cgroup files, or a container that
/// vanished before inspection, only drop that container. Files are read on the
/// blocking pool so a stalled read cannot outlive the scrape deadline. A missing or
/// unsupported cgroup hierarchy and an unreachable runtime fail the scrape.
#[derive(Debug)]
pub struct Assembler<R> {
    runtime: Arc<R>,
    cgroup_root: PathBuf,
}

impl<R> Assembler<R>
where
    R: ContainerRuntime + Send + Sync,
{
    /// # Arguments
    ///
    /// * `runtime` - The shared container runtime client.
    /// * `cgroup_root` - The host's cgroup mount root, e.g. `/host/sys/fs/cgroup`.
    pub fn new(runtime: Arc<R>, cgroup_root: impl Into<PathBuf>) -> Self {
        Self {
            runtime,
            cgroup_root: cgroup_root.into(),
        }
    }

    /// Like [`Assembler::assemble`], but gives up after `deadline`.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::DeadlineExceeded`] on timeout; no partial snapshot
    /// is returned.
    pub async fn assemble_within(&self, deadline: Duration) -> Result<Snapshot, ScrapeError> {
        tokio::time::timeout(deadline, self.assemble())
            .await
            .map_err(|_| ScrapeError::DeadlineExceeded(deadline))?
    }

    /// Collects memory metrics for every running container.
    ///
    /// # Errors
    ///
    /// - [`ScrapeError::Cgroup`] if the hierarchy is missing or not cgroup v1.
    /// - [`ScrapeError::Runtime`] if the runtime cannot list or inspect containers.
    /// - [`ScrapeError::ReadTask`] if a blocking read panicked.
    pub async fn assemble(&self) -> Result<Snapshot, ScrapeError> {
        let cgroup = cgroup::open_memory_cgroup(&self.cgroup_root)?;
        let containers = self.runtime.list_running().await?;
        log::trace!("assembling snapshot for {} containers", containers.len());

        let mut snapshot = Snapshot::with_capacity(containers.len());
        for container in containers {
            if let Some(metrics) = self.collect_container(&cgroup, container).await? {
                snapshot.push(metrics);
            }
        }

        log::debug!("assembled snapshot with {} containers", snapshot.len());
        Ok(snapshot)
    }

    /// Returns `Ok(None)` if the container was skipped.
    async fn collect_container(
        &self,
        cgroup: &MemoryCgroup,
        container: ContainerRecord,
    ) -> Result<Option<ContainerMetrics>, ScrapeError> {
        let identity = identity::resolve_identity(&container.raw_name, &container.labels);

        let read = {
            let cgroup = cgroup.clone();
            let container_id = container.id.clone();
            tokio::task::spawn_blocking(move || cgroup.read(&container_id)).await?
        };
        let reading = match read {
            Err(err) if err.is_not_found() => {
                log::warn!(
                    target: "snapshot",
                    "container exited during scrape: container_id={}, name={}, {}",
                    container.id,
                    identity.display_name,
                    err
                );
                return Ok(None);
            }
            result => result
                .map_err(|source| ContainerError {
                    container_id: container.id.clone(),
                    name: identity.display_name.clone(),
                    source,
                })
                .ok_log("snapshot"),
        };
        let Some(reading) = reading else {
            return Ok(None);
        };

        let settings = match self.runtime.inspect_memory(&container.id).await {
            Ok(settings) => settings,
            Err(runtime::Error::ContainerGone { container_id }) => {
                log::warn!(
                    target: "snapshot",
                    "container exited during scrape: container_id={}, name={}",
                    container_id,
                    identity.display_name
                );
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };

        let counters = MemoryCounters {
            usage_bytes: reading.usage_bytes,
            cache_bytes: reading.stat.total_cache(),
            limit_bytes: settings.limit_bytes,
            reservation_bytes: settings.reservation_bytes,
        };
        if counters.is_inconsistent() {
            log::warn!(
                target: "snapshot",
                "page cache exceeds usage, reporting negative usage: container_id={}, usage={}, cache={:?}",
                container.id,
                counters.usage_bytes,
                counters.cache_bytes
            );
        }

        Ok(Some(ContainerMetrics { identity, counters }))
    }
}
