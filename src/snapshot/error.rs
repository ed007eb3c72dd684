use std::time::Duration;

use crate::cgroup::ReadError;
use crate::container::ContainerID;
use crate::{cgroup, runtime};

/// Failures that abort a whole scrape.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Cgroup(#[from] cgroup::Error),
    #[error(transparent)]
    Runtime(#[from] runtime::Error),
    #[error("cgroup read task failed: {0}")]
    ReadTask(#[from] tokio::task::JoinError),
    #[error("scrape did not finish within {0:?}")]
    DeadlineExceeded(Duration),
}

/// Failures that drop a single container from the snapshot.
#[derive(Debug, thiserror::Error)]
#[error("skipping container `{name}` ({container_id}): {source}")]
pub struct ContainerError {
    pub container_id: ContainerID,
    pub name: String,
    #[source]
    pub source: ReadError,
}
