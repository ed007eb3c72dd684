//! The container runtime as seen by a scrape: list what is running and look
//! up each container's configured memory limit and reservation.
//!
//! [`ContainerRuntime`] is the seam; [`DockerRuntime`] talks to the Docker
//! Engine API through `bollard`. The handle is created once and shared between
//! scrapes by reference.
mod docker;
mod error;
#[cfg(test)]
pub(crate) mod fake;

use std::future::Future;

use crate::container::{ContainerID, ContainerRecord};

pub use docker::DockerRuntime;
pub use error::{Error, Result};

/// Memory settings from runtime inspection, passed through unchanged.
///
/// `0` means "not set" for both values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemorySettings {
    pub limit_bytes: i64,
    pub reservation_bytes: i64,
}

pub trait ContainerRuntime {
    /// Lists the currently running containers.
    fn list_running(&self) -> impl Future<Output = Result<Vec<ContainerRecord>>> + Send;

    /// Returns the memory limit and reservation configured for a container.
    ///
    /// Fails with [`Error::ContainerGone`] if the container disappeared after it
    /// was listed.
    fn inspect_memory(
        &self,
        container_id: &ContainerID,
    ) -> impl Future<Output = Result<MemorySettings>> + Send;
}
