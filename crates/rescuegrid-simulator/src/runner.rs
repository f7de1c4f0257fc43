//! Background tick loop

use crate::SharedEngine;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Tick the engine once per interval until cancelled.
///
/// Each tick runs under the engine guard, then the loop sleeps; the sleep
/// is the cancellation point, so shutdown never interrupts a tick halfway.
pub async fn run_tick_loop(engine: SharedEngine, interval: Duration, cancel: CancellationToken) {
    info!("simulation background loop started");
    loop {
        {
            let mut engine = engine.lock().await;
            engine.tick();
        }
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = tokio::time::sleep(interval) => {}
        }
    }
    info!("simulation background loop stopped");
}
