use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_CGROUP_MOUNT_PATH: &str = "/host/sys/fs/cgroup";
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:9476";
pub const DEFAULT_SCRAPE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("environment variable `{name}` is not valid unicode")]
    NotUnicode { name: &'static str },
    #[error("environment variable `{name}` must be a positive number of seconds, got `{value}`")]
    InvalidTimeout { name: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Runtime settings, read from the environment.
///
/// | Variable | Default |
/// | --- | --- |
/// | `CGROUP_MOUNT_PATH` | `/host/sys/fs/cgroup` |
/// | `LISTEN_ADDR` | `0.0.0.0:9476` |
/// | `SCRAPE_TIMEOUT_SECS` | `10` |
///
/// The Docker connection itself follows `DOCKER_HOST`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub cgroup_root: PathBuf,
    pub listen_addr: String,
    pub scrape_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cgroup_root: PathBuf::from(DEFAULT_CGROUP_MOUNT_PATH),
            listen_addr: DEFAULT_LISTEN_ADDR.to_owned(),
            scrape_timeout: DEFAULT_SCRAPE_TIMEOUT,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var_os(name))
    }

    fn from_lookup(lookup: impl Fn(&'static str) -> Option<OsString>) -> Result<Self> {
        let mut config = Config::default();

        if let Some(path) = lookup("CGROUP_MOUNT_PATH") {
            config.cgroup_root = PathBuf::from(path);
        }

        if let Some(addr) = lookup("LISTEN_ADDR") {
            config.listen_addr = addr
                .into_string()
                .map_err(|_| Error::NotUnicode { name: "LISTEN_ADDR" })?;
        }

        const TIMEOUT: &str = "SCRAPE_TIMEOUT_SECS";
        if let Some(raw) = lookup(TIMEOUT) {
            let value = raw
                .into_string()
                .map_err(|_| Error::NotUnicode { name: TIMEOUT })?;
            let secs = value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| Error::InvalidTimeout {
                    name: TIMEOUT,
                    value: value.clone(),
                })?;
            config.scrape_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}
