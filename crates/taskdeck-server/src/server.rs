//! `TaskServer`: Axum HTTP server for the task list.

use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use axum::extract::{DefaultBodyLimit, State};
use axum::response::Json;
use axum::routing::{get, patch};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use taskdeck_store::ConnectionPool;

use crate::config::ServerConfig;
use crate::health::{self, HealthResponse};
use crate::routes;
use crate::shutdown::ShutdownCoordinator;

/// Shared state accessible from Axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// Task store connection pool.
    pub pool: ConnectionPool,
    /// When the server started.
    pub start_time: Instant,
}

/// The task server.
pub struct TaskServer {
    config: ServerConfig,
    pool: ConnectionPool,
    shutdown: Arc<ShutdownCoordinator>,
    start_time: Instant,
}

impl TaskServer {
    /// Create a new server over an already-migrated pool.
    pub fn new(config: ServerConfig, pool: ConnectionPool) -> Self {
        Self {
            config,
            pool,
            shutdown: Arc::new(ShutdownCoordinator::new()),
            start_time: Instant::now(),
        }
    }

    /// Build the Axum router with all routes.
    pub fn router(&self) -> Router {
        let state = AppState {
            pool: self.pool.clone(),
            start_time: self.start_time,
        };

        Router::new()
            .route("/health", get(health_handler))
            .route(
                "/api/tasks",
                get(routes::list_tasks).post(routes::create_task),
            )
            .route(
                "/api/tasks/{id}",
                patch(routes::update_task).delete(routes::delete_task),
            )
            .layer(DefaultBodyLimit::max(self.config.max_body_bytes))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Bind the configured address.
    pub async fn bind(&self) -> std::io::Result<TcpListener> {
        TcpListener::bind(self.config.bind_addr()).await
    }

    /// Serve on `listener` until the coordinator is stopped.
    pub async fn serve(self, listener: TcpListener) -> std::io::Result<()> {
        let addr = listener.local_addr()?;
        info!(%addr, "task server listening");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(self.shutdown.stopped())
            .await?;

        info!("task server stopped");
        Ok(())
    }

    /// Get the shutdown coordinator.
    pub fn shutdown(&self) -> &Arc<ShutdownCoordinator> {
        &self.shutdown
    }

    /// Get the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

/// GET /health
async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(health::health_check(state.start_time))
}
