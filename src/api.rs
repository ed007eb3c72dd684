use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use tokio::net::ToSocketAddrs;

use crate::runtime::ContainerRuntime;
use crate::snapshot::{Assembler, ScrapeError};

pub mod exposition;

pub const METRICS_PATH: &str = "/metrics";

struct ScrapeState<R> {
    assembler: Arc<Assembler<R>>,
    scrape_timeout: Duration,
}

impl<R> Clone for ScrapeState<R> {
    fn clone(&self) -> Self {
        Self {
            assembler: Arc::clone(&self.assembler),
            scrape_timeout: self.scrape_timeout,
        }
    }
}

async fn export_metrics<R>(State(state): State<ScrapeState<R>>) -> Response
where
    R: ContainerRuntime + Send + Sync + 'static,
{
    let snapshot = match state.assembler.assemble_within(state.scrape_timeout).await {
        Ok(snapshot) => snapshot,
        Err(err @ ScrapeError::DeadlineExceeded(_)) => {
            log::error!("Scrape aborted: {}", err);
            return (StatusCode::SERVICE_UNAVAILABLE, "scrape deadline exceeded").into_response();
        }
        Err(err) => {
            log::error!("Scrape failed: {}", err);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to collect container metrics",
            )
                .into_response();
        }
    };

    match exposition::encode(&snapshot) {
        Ok((body, content_type)) => {
            (StatusCode::OK, [(header::CONTENT_TYPE, content_type)], body).into_response()
        }
        Err(err) => {
            log::error!("Failed to encode metrics: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to encode container metrics",
            )
                .into_response()
        }
    }
}

pub struct APIServer {
    router: axum::Router,
}

impl APIServer {
    pub fn new<R>(assembler: Arc<Assembler<R>>, scrape_timeout: Duration) -> Self
    where
        R: ContainerRuntime + Send + Sync + 'static,
    {
        let router = axum::Router::new()
            .route(METRICS_PATH, get(export_metrics::<R>))
            .with_state(ScrapeState {
                assembler,
                scrape_timeout,
            });
        Self { router }
    }

    pub async fn listen(self, addr: impl ToSocketAddrs) -> std::io::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        log::info!("Listening on {}", listener.local_addr()?);
        axum::serve(listener, self.router.into_make_service()).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    use super::*;
    use crate::runtime::MemorySettings;
    use crate::runtime::fake::{FakeRuntime, record};

    async fn get_metrics(server: APIServer) -> (StatusCode, String) {
        let response = server
            .router
            .oneshot(
                Request::builder()
                    .uri(METRICS_PATH)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_export_metrics() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("memory/docker/abc");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("memory.usage_in_bytes"), "524288000\n").unwrap();
        std::fs::write(
            dir.join("memory.stat"),
            "total_cache 104857600\ntotal_rss 52428800\n",
        )
        .unwrap();
        let runtime = FakeRuntime {
            containers: vec![record(
                "abc",
                "/web-1",
                &[
                    ("com.docker.compose.project", "shop"),
                    ("com.docker.compose.service", "web"),
                ],
            )],
            settings: HashMap::from([(
                "abc".to_string(),
                MemorySettings {
                    limit_bytes: 1073741824,
                    reservation_bytes: 536870912,
                },
            )]),
            ..Default::default()
        };
        let assembler = Arc::new(Assembler::new(Arc::new(runtime), root.path()));

        let (status, body) = get_metrics(APIServer::new(assembler, Duration::from_secs(5))).await;

        assert_eq!(status, StatusCode::OK);
        for (metric, value) in [
            ("docker_container_memory_usage_bytes", "419430400"),
            ("docker_container_memory_reservation_bytes", "536870912"),
            ("docker_container_memory_limit_bytes", "1073741824"),
        ] {
            let line = body
                .lines()
                .find(|line| line.starts_with(&format!("{metric}{{")))
                .unwrap_or_else(|| panic!("missing `{metric}` in:\n{body}"));
            assert!(line.contains("name=\"web-1\""));
            assert!(line.contains("stack=\"shop\""));
            assert!(line.contains("service=\"web\""));
            assert!(line.ends_with(&format!(" {value}")));
        }
    }

    #[tokio::test]
    async fn test_export_metrics_runtime_unavailable() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir(root.path().join("memory")).unwrap();
        let runtime = FakeRuntime {
            list_fails: true,
            ..Default::default()
        };
        let assembler = Arc::new(Assembler::new(Arc::new(runtime), root.path()));

        let (status, _) = get_metrics(APIServer::new(assembler, Duration::from_secs(5))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_export_metrics_deadline() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir(root.path().join("memory")).unwrap();
        let runtime = FakeRuntime {
            list_delay: Some(Duration::from_secs(5)),
            ..Default::default()
        };
        let assembler = Arc::new(Assembler::new(Arc::new(runtime), root.path()));

        let (status, _) =
            get_metrics(APIServer::new(assembler, Duration::from_millis(10))).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
