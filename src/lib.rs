//! Docker Memory Exporter: exposes the true memory usage, reservation and
//! limit of every running container for Prometheus to scrape.
//!
//! On each request to `/metrics` the running containers are listed through the
//! Docker API, their memory cgroup (v1) is read from the host-mounted cgroup
//! filesystem, and each container is labelled with its name and the stack and
//! service it belongs to according to Rancher, Swarm or Compose labels.

use std::sync::Arc;

pub mod api;
pub mod cgroup;
pub mod config;
pub mod container;
pub mod error;
pub mod fsutil;
pub mod identity;
pub mod runtime;
pub mod snapshot;

/// Runs the exporter until the listener fails.
///
/// # Errors
///
/// Possible errors include:
/// - Invalid configuration in the environment.
/// - Failure to configure the Docker client.
/// - Failure to bind or serve the listening socket.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = config::Config::from_env()?;
    log::debug!("Configuration: {:?}", config);

    if !config.cgroup_root.exists() {
        log::warn!(
            "cgroup mount `{}` does not exist, scrapes will fail until it is mounted",
            config.cgroup_root.display()
        );
    }

    let runtime = Arc::new(runtime::DockerRuntime::connect()?);
    let assembler = Arc::new(snapshot::Assembler::new(runtime, config.cgroup_root));

    api::APIServer::new(assembler, config.scrape_timeout)
        .listen(config.listen_addr)
        .await?;

    Ok(())
}
