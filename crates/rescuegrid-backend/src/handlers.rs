//! HTTP handlers for the aggregator surface

use crate::advisor::{DecisionLog, DecisionProvider};
use crate::store::StateStore;
use crate::types::{ErrorResponse, Metrics, Mission, RobotState, SimulationState};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use axum::Json;
use futures::stream::Stream;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<StateStore>,
    pub advisor: Arc<dyn DecisionProvider>,
    pub decision_log: DecisionLog,
}

/// `GET /` — banner
pub async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({"message": "RescueGrid backend operating normally"}))
}

/// `GET /api/v1/state` — the latest published snapshot
pub async fn get_state(State(state): State<AppState>) -> Json<SimulationState> {
    Json(state.store.snapshot().await)
}

/// `GET /api/v1/robots`
pub async fn get_robots(State(state): State<AppState>) -> Json<Vec<RobotState>> {
    Json(state.store.snapshot().await.robots)
}

/// `GET /api/v1/missions` — active (non-completed) missions only
pub async fn get_missions(State(state): State<AppState>) -> Json<Vec<Mission>> {
    Json(state.store.snapshot().await.active_missions)
}

/// `GET /api/v1/metrics`
pub async fn get_metrics(State(state): State<AppState>) -> Json<Metrics> {
    Json(state.store.metrics().await)
}

/// `POST /api/v1/update` — manual snapshot injection; ordinarily the poller
/// is authoritative
pub async fn update_state(
    State(state): State<AppState>,
    Json(new_state): Json<SimulationState>,
) -> Json<serde_json::Value> {
    let step = state.store.replace(new_state).await;
    info!(step, "received state update");
    Json(serde_json::json!({"status": "received", "step": step}))
}

/// `POST /api/v1/ai/decide` — forward the snapshot to the advisory model
pub async fn ai_decide(State(state): State<AppState>) -> Response {
    let snapshot = state.store.snapshot().await;
    if snapshot.robots.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("no robots in simulation state")),
        )
            .into_response();
    }

    match state.advisor.decide(&snapshot).await {
        Ok(decision) => {
            if let Err(err) = state.decision_log.append(snapshot.step, &decision) {
                warn!(error = %err, "failed to append advisory decision log");
            }
            Json(decision).into_response()
        }
        Err(err) => {
            error!(error = %err, "advisory decision failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse::new(err.to_string())),
            )
                .into_response()
        }
    }
}

/// Logs the end of a streaming session when the client connection drops
struct StreamGuard;

impl Drop for StreamGuard {
    fn drop(&mut self) {
        info!("stream client disconnected");
    }
}

/// The per-client emitter: one `update` event per second, payload
/// serialized under the snapshot guard, yield outside it. Dropping the
/// stream (client disconnect) ends the session at its next suspension
/// point.
fn update_stream(store: Arc<StateStore>) -> impl Stream<Item = Result<Event, Infallible>> {
    futures::stream::unfold(
        (store, StreamGuard, true),
        |(store, guard, first)| async move {
            if !first {
                tokio::time::sleep(Duration::from_secs(1)).await;
            }
            let payload = store.to_json().await;
            let event = Event::default().event("update").data(payload);
            Some((Ok(event), (store, guard, false)))
        },
    )
}

/// `GET /api/v1/stream` — server-sent events until the client disconnects
pub async fn stream_state(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    info!("stream client connected");
    Sse::new(update_stream(state.store.clone())).keep_alive(KeepAlive::default())
}
