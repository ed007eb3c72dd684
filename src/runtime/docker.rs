use bollard::Docker;
use bollard::container::{InspectContainerOptions, ListContainersOptions};
use bollard::models::{ContainerInspectResponse, ContainerSummary};

use crate::container::{ContainerID, ContainerRecord};

use super::{ContainerRuntime, Error, MemorySettings, Result};

const NOT_FOUND: u16 = 404;

/// [`ContainerRuntime`] backed by the Docker Engine API.
#[derive(Debug, Clone)]
pub struct DockerRuntime {
    docker: Docker,
}

impl DockerRuntime {
    pub fn new(docker: Docker) -> Self {
        Self { docker }
    }

    /// Connects using the standard environment (`DOCKER_HOST`, falling back to
    /// the local socket).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Connect`] if the client cannot be configured.
    pub fn connect() -> Result<Self> {
        let docker = Docker::connect_with_defaults().map_err(|err| Error::Connect(err.into()))?;
        Ok(Self::new(docker))
    }
}

impl ContainerRuntime for DockerRuntime {
    async fn list_running(&self) -> Result<Vec<ContainerRecord>> {
        let options = ListContainersOptions::<String> {
            all: false,
            ..Default::default()
        };
        let summaries = self
            .docker
            .list_containers(Some(options))
            .await
            .map_err(|err| Error::Unavailable {
                operation: "container list",
                source: err.into(),
            })?;

        Ok(summaries.into_iter().filter_map(record_from_summary).collect())
    }

    async fn inspect_memory(&self, container_id: &ContainerID) -> Result<MemorySettings> {
        let response = self
            .docker
            .inspect_container(container_id.as_ref(), None::<InspectContainerOptions>)
            .await
            .map_err(|err| match err {
                bollard::errors::Error::DockerResponseServerError {
                    status_code: NOT_FOUND,
                    ..
                } => Error::ContainerGone {
                    container_id: container_id.clone(),
                },
                err => Error::Unavailable {
                    operation: "container inspect",
                    source: err.into(),
                },
            })?;

        Ok(settings_from_inspect(&response))
    }
}

/// Converts a list entry, skipping entries without a usable id or name.
fn record_from_summary(summary: ContainerSummary) -> Option<ContainerRecord> {
    let Some(raw_id) = summary.id else {
        log::warn!(target: "docker runtime", "skipping listed container without id");
        return None;
    };
    let id = match ContainerID::new(&raw_id) {
        Ok(id) => id,
        Err(err) => {
            log::warn!(target: "docker runtime", "skipping listed container: {}", err);
            return None;
        }
    };
    let Some(raw_name) = summary.names.and_then(|names| names.into_iter().next()) else {
        log::warn!(
            target: "docker runtime",
            "skipping listed container without name: container_id={}",
            id
        );
        return None;
    };

    Some(ContainerRecord::new(
        id,
        raw_name,
        summary.labels.unwrap_or_default(),
    ))
}

fn settings_from_inspect(response: &ContainerInspectResponse) -> MemorySettings {
    let host_config = response.host_config.as_ref();
    MemorySettings {
        limit_bytes: host_config.and_then(|hc| hc.memory).unwrap_or_default(),
        reservation_bytes: host_config
            .and_then(|hc| hc.memory_reservation)
            .unwrap_or_default(),
    }
}
