//! Web server setup for the aggregator process

use crate::advisor::{DecisionLog, DecisionProvider, GeminiAdvisor};
use crate::handlers::{self, AppState};
use crate::poller::EnginePoller;
use crate::store::StateStore;
use axum::http::{HeaderValue, Method};
use axum::{
    routing::{get, post},
    Router,
};
use rescuegrid_config::{validate_backend, BackendConfig};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::info;

/// Create the application router
fn create_router(state: AppState, frontend_origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/state", get(handlers::get_state))
        .route("/stream", get(handlers::stream_state))
        .route("/robots", get(handlers::get_robots))
        .route("/missions", get(handlers::get_missions))
        .route("/metrics", get(handlers::get_metrics))
        .route("/update", post(handlers::update_state))
        .route("/ai/decide", post(handlers::ai_decide));

    Router::new()
        .route("/", get(handlers::root))
        .nest("/api/v1", api_routes)
        .layer(cors)
        .with_state(state)
}

/// Run the aggregator: the poller task plus the HTTP surface.
///
/// Returns once the cancellation token fires and the server has drained.
pub async fn run(config: BackendConfig, port: u16, cancel: CancellationToken) -> anyhow::Result<()> {
    validate_backend(&config)?;

    let store = Arc::new(StateStore::new(config.grid_size));
    let advisor: Arc<dyn DecisionProvider> =
        Arc::new(GeminiAdvisor::new(config.gemini_api_key.clone())?);
    let decision_log = DecisionLog::new(config.decisions_log.clone());
    decision_log.ensure_dir()?;
    let state = AppState {
        store: store.clone(),
        advisor,
        decision_log,
    };

    let poller = EnginePoller::new(&config)?;
    let poll_task = tokio::spawn(poller.run(store, cancel.clone()));

    let app = create_router(state, &config.frontend_origins);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "backend listening");

    let shutdown = cancel.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    poll_task.await?;
    Ok(())
}
