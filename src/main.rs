/// Entry point for the Docker memory exporter.
///
/// Serves container memory metrics on `/metrics` for Prometheus to scrape.
///
/// # Errors
///
/// Returns an error if initialization fails (e.g., invalid environment
/// variables, an unusable Docker client configuration, or a busy port).
///
/// # Examples
///
/// ```bash
/// RUST_LOG=info CGROUP_MOUNT_PATH=/sys/fs/cgroup cargo run
/// ```
#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    docker_memory_exporter::run().await
}
