//! Renders a [`Snapshot`] in the Prometheus text exposition format.
//!
//! A fresh registry is built for every scrape, so series of containers that
//! have exited never linger.

use prometheus::{Encoder, GaugeVec, Opts, Registry, TextEncoder};

use crate::snapshot::{MetricName, Snapshot};

/// Label names in declaration order.
pub const LABEL_NAMES: [&str; 3] = ["name", "stack", "service"];

struct Gauges {
    usage: GaugeVec,
    reservation: GaugeVec,
    limit: GaugeVec,
}

impl Gauges {
    fn register(registry: &Registry) -> prometheus::Result<Self> {
        let gauge = |name: MetricName| -> prometheus::Result<GaugeVec> {
            let vec = GaugeVec::new(Opts::new(name.as_str(), name.help()), &LABEL_NAMES)?;
            registry.register(Box::new(vec.clone()))?;
            Ok(vec)
        };

        Ok(Self {
            usage: gauge(MetricName::MemoryUsage)?,
            reservation: gauge(MetricName::MemoryReservation)?,
            limit: gauge(MetricName::MemoryLimit)?,
        })
    }

    fn get(&self, name: MetricName) -> &GaugeVec {
        match name {
            MetricName::MemoryUsage => &self.usage,
            MetricName::MemoryReservation => &self.reservation,
            MetricName::MemoryLimit => &self.limit,
        }
    }
}

/// Encodes every point of the snapshot.
///
/// Returns the body together with its content type.
pub fn encode(snapshot: &Snapshot) -> prometheus::Result<(Vec<u8>, String)> {
    let registry = Registry::new();
    let gauges = Gauges::register(&registry)?;

    for point in snapshot.points() {
        gauges
            .get(point.name)
            .with_label_values(&point.label_values)
            .set(point.value);
    }

    let encoder = TextEncoder::new();
    let mut body = Vec::new();
    encoder.encode(&registry.gather(), &mut body)?;

    Ok((body, encoder.format_type().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cgroup::stats::MemoryCounters;
    use crate::identity::Identity;
    use crate::snapshot::ContainerMetrics;

    fn metrics(name: &str, stack: &str, service: &str, usage: i64) -> ContainerMetrics {
        ContainerMetrics {
            identity: Identity {
                display_name: name.to_string(),
                stack: stack.to_string(),
                service: service.to_string(),
            },
            counters: MemoryCounters {
                usage_bytes: usage,
                cache_bytes: None,
                limit_bytes: 2048,
                reservation_bytes: 0,
            },
        }
    }

    fn sample_line<'a>(text: &'a str, metric: &str, name: &str) -> &'a str {
        let prefix = format!("{metric}{{");
        let label = format!("name=\"{name}\"");
        text.lines()
            .find(|line| line.starts_with(&prefix) && line.contains(&label))
            .unwrap_or_else(|| panic!("no `{metric}` sample for `{name}` in:\n{text}"))
    }

    #[test]
    fn test_encode_all_three_gauges() {
        let mut snapshot = Snapshot::default();
        snapshot.push(metrics("web-1", "shop", "web", 1024));
        snapshot.push(metrics("db-1", "", "", 512));

        let (body, content_type) = encode(&snapshot).unwrap();
        let text = String::from_utf8(body).unwrap();
        assert!(content_type.starts_with("text/plain"));

        assert!(text.contains("# TYPE docker_container_memory_usage_bytes gauge"));
        assert!(text.contains("# HELP docker_container_memory_limit_bytes Memory limit for the container in bytes"));

        let line = sample_line(&text, "docker_container_memory_usage_bytes", "web-1");
        assert!(line.contains("stack=\"shop\""));
        assert!(line.contains("service=\"web\""));
        assert!(line.ends_with(" 1024"));

        let line = sample_line(&text, "docker_container_memory_limit_bytes", "db-1");
        assert!(line.contains("stack=\"\""));
        assert!(line.contains("service=\"\""));
        assert!(line.ends_with(" 2048"));

        let line = sample_line(&text, "docker_container_memory_reservation_bytes", "db-1");
        assert!(line.ends_with(" 0"));
    }

    #[test]
    fn test_encode_empty_snapshot() {
        let (body, _) = encode(&Snapshot::default()).unwrap();
        let text = String::from_utf8(body).unwrap();
        assert!(!text.contains("name=\""));
    }
}
