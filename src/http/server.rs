//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Take the router produced by module activation
//! - Apply the request timeout
//! - Bind server to listener
//! - Stop accepting and drain on shutdown

use std::time::Duration;

use axum::http::StatusCode;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;

use crate::config::HostConfig;
use crate::lifecycle::Shutdown;

/// HTTP server for the activated module pipeline.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server around an activated router.
    pub fn new(router: Router, config: &HostConfig) -> Self {
        Self {
            router: Self::build_router(router, config),
        }
    }

    /// Add the server-wide middleware layers.
    fn build_router(router: Router, config: &HostConfig) -> Router {
        router.layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.timeouts.request_secs),
        ))
    }

    /// Run the server until shutdown is triggered, then drain open requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: Shutdown,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.signalled().await;
                tracing::info!("Draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::get;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_configured_request_timeout_applies() {
        let mut config = HostConfig::default();
        config.timeouts.request_secs = 1;
        let slow = Router::new().route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(10)).await;
                "late"
            }),
        );

        let server = HttpServer::new(slow, &config);
        let response = server
            .router
            .oneshot(Request::builder().uri("/slow").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    }
}
