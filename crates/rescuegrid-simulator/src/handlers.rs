//! HTTP handlers for the engine surface

use crate::SharedEngine;
use axum::{extract::State, Json};
use rescuegrid_sim::SimulationStateOut;

/// Health check: `GET /`
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// `GET /simulation/state` — snapshot under the engine guard
pub async fn get_simulation_state(State(engine): State<SharedEngine>) -> Json<SimulationStateOut> {
    let engine = engine.lock().await;
    Json(engine.snapshot())
}

/// `POST /simulation/reset` — rebuild the world under the engine guard
pub async fn reset_simulation(State(engine): State<SharedEngine>) -> Json<serde_json::Value> {
    let mut engine = engine.lock().await;
    engine.reset();
    Json(serde_json::json!({"status": "reset"}))
}
