//! REST routes over [`AsyncTaskService`].

mod error;
mod handlers;

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::{get, put};
use taskboard_app::{AsyncTaskService, TaskStore};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub use error::{ApiError, Operation};

/// Build the task router.
///
/// `cors` adds a permissive CORS layer so browser front ends on another
/// origin can call the API.
pub fn build_router<S>(service: AsyncTaskService<S>, cors: bool) -> Router
where
    S: TaskStore + Send + Sync + 'static,
{
    let router = Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/tasks",
            get(handlers::list_tasks::<S>).post(handlers::create_task::<S>),
        )
        .route(
            "/tasks/:id",
            put(handlers::update_task::<S>).delete(handlers::delete_task::<S>),
        )
        .with_state(service)
        .layer(TraceLayer::new_for_http());
    if cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

/// Bind `addr` and serve `router` until Ctrl-C.
///
/// # Errors
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(addr: SocketAddr, router: Router) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    let local = listener.local_addr()?;
    info!("taskboard listening on http://{local}");
    info!("API: http://{local}/tasks");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutting down"),
        // No signal handler available; run until the process is killed.
        Err(_) => std::future::pending::<()>().await,
    }
}
