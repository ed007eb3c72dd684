//! One scrape's worth of container memory metrics.
//!
//! An [`Assembler`] lists the running containers, resolves each one's
//! [`Identity`], reads its memory cgroup and asks the runtime for its limit and
//! reservation. Each container that survives ends up as one [`ContainerMetrics`]
//! entry, which always expands to exactly three [`MetricPoint`]s.
//!
//! Nothing is kept between scrapes.
mod assembler;
mod error;

use crate::cgroup::stats::MemoryCounters;
use crate::identity::Identity;

pub use assembler::Assembler;
pub use error::{ContainerError, ScrapeError};

/// The three gauges published per container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    MemoryUsage,
    MemoryReservation,
    MemoryLimit,
}

impl MetricName {
    pub const ALL: [MetricName; 3] = [
        MetricName::MemoryUsage,
        MetricName::MemoryReservation,
        MetricName::MemoryLimit,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MetricName::MemoryUsage => "docker_container_memory_usage_bytes",
            MetricName::MemoryReservation => "docker_container_memory_reservation_bytes",
            MetricName::MemoryLimit => "docker_container_memory_limit_bytes",
        }
    }

    pub fn help(self) -> &'static str {
        match self {
            MetricName::MemoryUsage => "Total memory usage in bytes",
            MetricName::MemoryReservation => "Memory reserved for the container in bytes",
            MetricName::MemoryLimit => "Memory limit for the container in bytes",
        }
    }
}

/// A single labelled gauge value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricPoint<'a> {
    pub name: MetricName,
    pub value: f64,
    /// `name`, `stack`, `service`.
    pub label_values: [&'a str; 3],
}

/// Everything read for one container during a scrape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerMetrics {
    pub identity: Identity,
    pub counters: MemoryCounters,
}

impl ContainerMetrics {
    pub fn value(&self, name: MetricName) -> i64 {
        match name {
            MetricName::MemoryUsage => self.counters.true_usage(),
            MetricName::MemoryReservation => self.counters.reservation_bytes,
            MetricName::MemoryLimit => self.counters.limit_bytes,
        }
    }

    /// Usage, reservation and limit, all carrying this container's labels.
    pub fn points(&self) -> [MetricPoint<'_>; 3] {
        MetricName::ALL.map(|name| MetricPoint {
            name,
            value: self.value(name) as f64,
            label_values: self.identity.label_values(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    containers: Vec<ContainerMetrics>,
}

impl Snapshot {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            containers: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, metrics: ContainerMetrics) {
        self.containers.push(metrics);
    }

    pub fn containers(&self) -> &[ContainerMetrics] {
        &self.containers
    }

    pub fn points(&self) -> impl Iterator<Item = MetricPoint<'_>> {
        self.containers.iter().flat_map(ContainerMetrics::points)
    }

    pub fn len(&self) -> usize {
        self.containers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }
}
