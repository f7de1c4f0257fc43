//! RescueGrid Simulator - the engine process
//!
//! Owns the ground-truth world behind a single mutex. A background task
//! ticks the engine once per interval; the HTTP surface serves snapshots
//! and resets. Ticks and reads never interleave.

pub mod handlers;
pub mod runner;
pub mod server;

pub use server::run;

use rescuegrid_sim::Engine;
use std::sync::Arc;
use tokio::sync::Mutex;

/// The engine guard shared by the tick loop and the HTTP handlers
pub type SharedEngine = Arc<Mutex<Engine>>;
