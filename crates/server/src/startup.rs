use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Build the shared state from configuration. Fails on an unknown backend.
pub fn build_state(cfg: &AppConfig) -> Result<AppState, StartupError> {
    let repo = service::create_user_repository(&cfg.repository, &cfg.database)?;
    info!(
        backend = repo.backend_name(),
        sqlite_path = %cfg.repository.sqlite_path,
        "user repository selected"
    );
    Ok(AppState::new(repo))
}

pub fn build_app(state: AppState) -> Router {
    routes::build_router(state, build_cors())
}

/// Public entry: build the app from a loaded config and run the HTTP server
/// until `shutdown` resolves.
pub async fn run_with_config<F>(cfg: AppConfig, shutdown: F) -> Result<(), StartupError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let state = build_state(&cfg)?;

    let addr = bind_addr(&cfg)?;
    let listener = TcpListener::bind(addr).await.map_err(anyhow::Error::from)?;
    info!(%addr, "user registration API ready");
    serve(listener, state, shutdown).await
}

/// Serve on an already bound listener. Once `shutdown` resolves, in-flight
/// requests drain and the repository is closed.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<(), StartupError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let repo = Arc::clone(&state.repo);
    let app = build_app(state);
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(anyhow::Error::from);

    let closed = repo.close().await;
    if let Err(e) = &closed {
        warn!(code = e.code(), error = %e, "closing user repository failed");
    } else {
        info!(backend = repo.backend_name(), "user repository closed");
    }
    served?;
    closed?;
    Ok(())
}
