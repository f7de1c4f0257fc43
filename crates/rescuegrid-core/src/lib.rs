//! RescueGrid Core - Core types for the rescue fleet simulation
//!
//! This crate provides the typed identifiers, grid coordinates, and seeded
//! RNG used throughout the RescueGrid system.

pub mod cell;
pub mod id;
pub mod rng;

pub use cell::Cell;
pub use id::*;
pub use rng::SimRng;
