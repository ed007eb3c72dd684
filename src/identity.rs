//! Maps a container's name and labels to the `(name, stack, service)` triple
//! used as metric labels.
//!
//! Orchestrators record the stack/service grouping under different labels. The
//! conventions are tried in the fixed order of [`Convention::PRECEDENCE`] and
//! the first one that matches wins:
//!
//! 1. [`Convention::Rancher`] — `io.rancher.stack_service.name = "<stack>/<service>"`.
//! 2. [`Convention::Swarm`] — `com.docker.swarm.service.name`, optionally with
//!    `com.docker.stack.namespace`.
//! 3. [`Convention::Compose`] — `com.docker.compose.project` and
//!    `com.docker.compose.service`. Always matches, possibly with empty values.
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use docker_memory_exporter::identity::resolve_identity;
//!
//! let labels = HashMap::from([
//!     ("com.docker.compose.project".to_string(), "shop".to_string()),
//!     ("com.docker.compose.service".to_string(), "web".to_string()),
//! ]);
//! let identity = resolve_identity("/web-1", &labels);
//! assert_eq!(identity.label_values(), ["web-1", "shop", "web"]);
//! ```

use std::collections::HashMap;

pub const RANCHER_STACK_SERVICE_LABEL: &str = "io.rancher.stack_service.name";
pub const SWARM_SERVICE_NAME_LABEL: &str = "com.docker.swarm.service.name";
pub const SWARM_STACK_NAMESPACE_LABEL: &str = "com.docker.stack.namespace";
pub const COMPOSE_PROJECT_LABEL: &str = "com.docker.compose.project";
pub const COMPOSE_SERVICE_LABEL: &str = "com.docker.compose.service";

/// Stack reported for a Swarm service whose name carries no stack prefix.
pub const UNKNOWN_STACK: &str = "-";

const NAME_SEPARATOR: char = '/';

/// A container's display name and logical grouping.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Identity {
    pub display_name: String,
    pub stack: String,
    pub service: String,
}

impl Identity {
    /// Label values in exposition order: `name`, `stack`, `service`.
    pub fn label_values(&self) -> [&str; 3] {
        [&self.display_name, &self.stack, &self.service]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StackService {
    pub stack: String,
    pub service: String,
}

impl StackService {
    fn new(stack: impl Into<String>, service: impl Into<String>) -> Self {
        Self {
            stack: stack.into(),
            service: service.into(),
        }
    }
}

/// A labelling convention for stack and service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Convention {
    Rancher,
    Swarm,
    Compose,
}

impl Convention {
    pub const PRECEDENCE: [Convention; 3] =
        [Convention::Rancher, Convention::Swarm, Convention::Compose];

    /// Returns the stack and service if the labels follow this convention.
    pub fn resolve(self, labels: &HashMap<String, String>) -> Option<StackService> {
        match self {
            Convention::Rancher => resolve_rancher(labels),
            Convention::Swarm => resolve_swarm(labels),
            Convention::Compose => Some(resolve_compose(labels)),
        }
    }
}

/// Resolves the identity of a container from its raw name and labels.
pub fn resolve_identity(raw_name: &str, labels: &HashMap<String, String>) -> Identity {
    let display_name = normalize_name(raw_name).to_owned();
    let StackService { stack, service } = Convention::PRECEDENCE
        .iter()
        .find_map(|convention| {
            let resolved = convention.resolve(labels)?;
            log::trace!("resolved `{display_name}` via {convention:?} labels");
            Some(resolved)
        })
        .unwrap_or_default();

    Identity {
        display_name,
        stack,
        service,
    }
}

/// Strips exactly one leading `/` as reported by the Docker API.
pub fn normalize_name(raw_name: &str) -> &str {
    raw_name.strip_prefix(NAME_SEPARATOR).unwrap_or(raw_name)
}

fn non_empty<'a>(labels: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    labels
        .get(key)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
}

fn resolve_rancher(labels: &HashMap<String, String>) -> Option<StackService> {
    let value = non_empty(labels, RANCHER_STACK_SERVICE_LABEL)?;
    match value.split_once('/') {
        Some((stack, service)) => Some(StackService::new(stack, service)),
        None => {
            log::warn!(
                target: "identity",
                "malformed label {}=`{}`: expected `<stack>/<service>`, using it as service",
                RANCHER_STACK_SERVICE_LABEL,
                value
            );
            Some(StackService::new("", value))
        }
    }
}

fn resolve_swarm(labels: &HashMap<String, String>) -> Option<StackService> {
    let service_name = non_empty(labels, SWARM_SERVICE_NAME_LABEL)?;

    if let Some(namespace) = non_empty(labels, SWARM_STACK_NAMESPACE_LABEL) {
        let service = service_name
            .strip_prefix(namespace)
            .and_then(|rest| rest.strip_prefix('_'))
            .unwrap_or(service_name);
        return Some(StackService::new(namespace, service));
    }

    Some(match service_name.split_once('_') {
        Some((stack, service)) => StackService::new(stack, service),
        None => StackService::new(UNKNOWN_STACK, service_name),
    })
}

fn resolve_compose(labels: &HashMap<String, String>) -> StackService {
    let get = |key: &str| labels.get(key).cloned().unwrap_or_default();
    StackService {
        stack: get(COMPOSE_PROJECT_LABEL),
        service: get(COMPOSE_SERVICE_LABEL),
    }
}
