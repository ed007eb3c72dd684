//! In-memory [`ContainerRuntime`] for tests.

use std::collections::HashMap;
use std::time::Duration;

use crate::container::{ContainerID, ContainerRecord};

use super::{ContainerRuntime, Error, MemorySettings, Result};

/// Lists `containers` and inspects from `settings`. A listed container without
/// settings behaves as if it exited before inspection.
#[derive(Debug, Default)]
pub(crate) struct FakeRuntime {
    pub(crate) containers: Vec<ContainerRecord>,
    pub(crate) settings: HashMap<String, MemorySettings>,
    pub(crate) list_fails: bool,
    pub(crate) inspect_fails: bool,
    pub(crate) list_delay: Option<Duration>,
}

impl ContainerRuntime for FakeRuntime {
    async fn list_running(&self) -> Result<Vec<ContainerRecord>> {
        if let Some(delay) = self.list_delay {
            tokio::time::sleep(delay).await;
        }
        if self.list_fails {
            return Err(Error::Unavailable {
                operation: "container list",
                source: "connection refused".into(),
            });
        }
        Ok(self.containers.clone())
    }

    async fn inspect_memory(&self, container_id: &ContainerID) -> Result<MemorySettings> {
        if self.inspect_fails {
            return Err(Error::Unavailable {
                operation: "container inspect",
                source: "connection refused".into(),
            });
        }
        self.settings
            .get(container_id.as_ref())
            .copied()
            .ok_or_else(|| Error::ContainerGone {
                container_id: container_id.clone(),
            })
    }
}

pub(crate) fn record(id: &str, name: &str, labels: &[(&str, &str)]) -> ContainerRecord {
    ContainerRecord::new(
        ContainerID::new(id).unwrap(),
        name,
        labels
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    )
}
