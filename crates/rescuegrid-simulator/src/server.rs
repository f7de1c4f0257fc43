//! Web server setup for the engine process

use crate::handlers;
use crate::SharedEngine;
use axum::http::{HeaderValue, Method};
use axum::{
    routing::{get, post},
    Router,
};
use rescuegrid_config::{validate_simulator, SimulatorConfig};
use rescuegrid_sim::Engine;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::info;

/// Create the application router
fn create_router(engine: SharedEngine, allowed_origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::health_check))
        .route("/simulation/state", get(handlers::get_simulation_state))
        .route("/simulation/reset", post(handlers::reset_simulation))
        .layer(cors)
        .with_state(engine)
}

/// Run the engine process: background tick loop plus HTTP surface.
///
/// Returns once the cancellation token fires and the server has drained.
pub async fn run(
    config: SimulatorConfig,
    port: u16,
    seed: Option<u64>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    validate_simulator(&config)?;

    let engine = match seed {
        Some(seed) => Engine::with_seed(config.clone(), seed),
        None => Engine::new(config.clone()),
    };
    let engine: SharedEngine = Arc::new(Mutex::new(engine));

    let tick_task = tokio::spawn(crate::runner::run_tick_loop(
        engine.clone(),
        Duration::from_secs_f64(config.tick_interval_seconds),
        cancel.clone(),
    ));

    let app = create_router(engine, &config.allowed_origins);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "simulator listening");

    let shutdown = cancel.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    tick_task.await?;
    Ok(())
}
