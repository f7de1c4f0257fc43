//! RescueGrid Map - Bounded grid model and routing
//!
//! The disaster area is a square grid of cells. Obstacles block cells
//! outright; routing is four-connected with unit step cost.

pub mod grid;
pub mod routing;

pub use grid::GridMap;
pub use routing::{astar, Route};
