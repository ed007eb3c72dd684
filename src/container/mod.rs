use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

mod error;
mod utils;

pub use error::{Error, Result};

/// The maximum allowed length for a [`ContainerID`].
const CONTAINER_ID_MAX_LEN: usize = 255;

/// A validated container identifier.
///
/// The id is joined onto cgroup paths, so it must be a single non-empty path
/// component.
///
/// # Examples
///
/// ```
/// # use docker_memory_exporter::container::{ContainerID, Error};
/// let raw_id = "abc123abc123abc123abc123abc123abc123abc123abc123abc123abc123abcd";
/// let container_id = ContainerID::new(raw_id).unwrap();
/// assert_eq!(container_id.as_ref(), raw_id);
///
/// assert!(ContainerID::new("../escape").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainerID(Arc<str>);

impl ContainerID {
    /// Creates a new `ContainerID` from the given raw id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidContainerID`] if the input is empty, longer than
    /// [`CONTAINER_ID_MAX_LEN`], or not usable as a single path component.
    pub fn new(src: impl AsRef<str>) -> Result<Self> {
        let src = src.as_ref();
        if src.len() > CONTAINER_ID_MAX_LEN || !utils::is_single_path_component(src) {
            return Err(Error::InvalidContainerID(src.to_owned()));
        }

        Ok(Self(src.into()))
    }
}

impl AsRef<str> for ContainerID {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ContainerID {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A running container as listed by the runtime, valid for one scrape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerRecord {
    pub id: ContainerID,
    /// First name reported by the runtime, possibly with a leading `/`.
    pub raw_name: String,
    pub labels: HashMap<String, String>,
}

impl ContainerRecord {
    pub fn new(
        id: ContainerID,
        raw_name: impl Into<String>,
        labels: HashMap<String, String>,
    ) -> Self {
        Self {
            id,
            raw_name: raw_name.into(),
            labels,
        }
    }
}
