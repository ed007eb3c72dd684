use crate::container::ContainerID;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to connect to container runtime: {0}")]
    Connect(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("container runtime unavailable during {operation}: {source}")]
    Unavailable {
        operation: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("container `{container_id}` no longer exists")]
    ContainerGone { container_id: ContainerID },
}

pub type Result<T> = std::result::Result<T, Error>;
