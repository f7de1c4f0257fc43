//! Obstacle entity

use rescuegrid_core::Cell;
use serde::{Deserialize, Serialize};

/// Kind tag attached to each obstacle on the wire
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ObstacleKind {
    #[default]
    Debris,
}

/// A blocked cell on the grid
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Obstacle {
    pub pos: Cell,
    pub kind: ObstacleKind,
}

impl Obstacle {
    pub fn new(pos: Cell) -> Self {
        Self {
            pos,
            kind: ObstacleKind::Debris,
        }
    }
}
