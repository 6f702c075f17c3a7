use super::health::{
    HealthState, ReadinessCheck, ServiceInfo, health_check, metrics_endpoint, readiness_check,
};
use crate::config::Config;
use crate::error::AppError;
use crate::middleware::{metrics_middleware, request_id_middleware};
use crate::observability::REQUEST_ID_HEADER;
use axum::{Router, body::Body, extract::Request, middleware, routing::get};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

pub struct ApplicationBuilder {
    info: ServiceInfo,
    routes: Router,
    readiness: Option<Arc<dyn ReadinessCheck>>,
}

impl ApplicationBuilder {
    /// Adds a route table. May be called more than once.
    pub fn routes(mut self, routes: Router) -> Self {
        self.routes = self.routes.merge(routes);
        self
    }

    pub fn readiness(mut self, check: Arc<dyn ReadinessCheck>) -> Self {
        self.readiness = Some(check);
        self
    }

    /// The complete router with health routes and middleware applied.
    pub fn into_router(self) -> Router {
        let health_routes = Router::new()
            .route("/health", get(health_check))
            .route("/ready", get(readiness_check))
            .route("/metrics", get(metrics_endpoint))
            .with_state(HealthState {
                info: self.info,
                readiness: self.readiness,
            });

        let service = self.info.name;
        health_routes
            .merge(self.routes)
            .layer(middleware::from_fn(metrics_middleware))
            .layer(
                TraceLayer::new_for_http().make_span_with(move |req: &Request<Body>| {
                    let request_id = req
                        .headers()
                        .get(REQUEST_ID_HEADER)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default();
                    tracing::info_span!(
                        "http_request",
                        service,
                        method = %req.method(),
                        uri = %req.uri(),
                        request_id
                    )
                }),
            )
            .layer(middleware::from_fn(request_id_middleware))
    }

    /// Binds `0.0.0.0:<port>`; port `0` picks a free port.
    pub async fn bind(self, config: &Config) -> Result<Application, AppError> {
        let info = self.info;
        let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(service = info.name, port, "Listening");

        Ok(Application {
            info,
            port,
            listener,
            router: self.into_router(),
        })
    }
}

pub struct Application {
    info: ServiceInfo,
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    pub fn builder(info: ServiceInfo) -> ApplicationBuilder {
        ApplicationBuilder {
            info,
            routes: Router::new(),
            readiness: None,
        }
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn info(&self) -> ServiceInfo {
        self.info
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
