//! Charging station entity

use rescuegrid_core::{Cell, StationId};

/// A charging pad on the grid. Any robot standing here recharges.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChargingStation {
    pub id: StationId,
    pub pos: Cell,
}

impl ChargingStation {
    pub fn new(id: StationId, pos: Cell) -> Self {
        Self { id, pos }
    }
}
