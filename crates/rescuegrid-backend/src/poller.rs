//! Engine polling loop
//!
//! One cooperative task: fetch the engine snapshot with a hard timeout,
//! translate it outside the guard, swap it in, sleep, repeat. Any failure
//! leaves the published snapshot untouched and the step counter parked.

use crate::store::StateStore;
use crate::translate::translate;
use rescuegrid_config::BackendConfig;
use rescuegrid_sim::SimulationStateOut;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

const FETCH_TIMEOUT: Duration = Duration::from_secs(4);

pub struct EnginePoller {
    client: reqwest::Client,
    state_url: String,
    interval: Duration,
    grid_size: u32,
}

impl EnginePoller {
    pub fn new(config: &BackendConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;
        Ok(Self {
            client,
            state_url: config.state_url(),
            interval: Duration::from_secs_f64(config.poll_interval_seconds),
            grid_size: config.grid_size,
        })
    }

    /// Poll until cancelled
    pub async fn run(self, store: Arc<StateStore>, cancel: CancellationToken) {
        info!(url = %self.state_url, "engine poller started");
        let mut step: u64 = 0;

        loop {
            match self.fetch().await {
                Ok(engine_state) => {
                    step += 1;
                    let avg = engine_state.metrics.avg_completion_time;
                    let distance = engine_state.metrics.total_distance_traveled;
                    let state = translate(&engine_state, step, self.grid_size);
                    store.publish(state, avg, distance).await;
                    debug!(step, "published engine snapshot");
                }
                Err(error) => {
                    warn!(%error, "engine poll failed, keeping last snapshot");
                }
            }

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }
        info!("engine poller stopped");
    }

    async fn fetch(&self) -> Result<SimulationStateOut, reqwest::Error> {
        self.client
            .get(&self.state_url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poller_builds_from_config() {
        let config = BackendConfig::default();
        let poller = EnginePoller::new(&config).unwrap();
        assert_eq!(poller.state_url, "http://127.0.0.1:8001/simulation/state");
        assert_eq!(poller.interval, Duration::from_secs(1));
    }

    /// A poll against a dead endpoint must leave the store untouched
    #[tokio::test]
    async fn test_failed_poll_preserves_snapshot() {
        let config = BackendConfig {
            // Nothing listens here
            simulator_base_url: "http://127.0.0.1:59999".to_string(),
            poll_interval_seconds: 0.05,
            ..Default::default()
        };
        let poller = EnginePoller::new(&config).unwrap();
        let store = Arc::new(StateStore::new(50));

        let mut seeded = crate::types::SimulationState::empty(50);
        seeded.step = 11;
        store.publish(seeded, 5.0, 9.0).await;

        let cancel = CancellationToken::new();
        let task = tokio::spawn(poller.run(store.clone(), cancel.clone()));
        tokio::time::sleep(Duration::from_millis(200)).await;
        cancel.cancel();
        task.await.unwrap();

        let state = store.snapshot().await;
        assert_eq!(state.step, 11, "step must not advance on failed polls");
        let metrics = store.metrics().await;
        assert_eq!(metrics.avg_delivery_time, 5.0);
    }
}
