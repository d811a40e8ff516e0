//! Ship definitions and the per-ship hit counter.

use serde::{Deserialize, Serialize};

use crate::common::{Coordinate, PlacementError};

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Type of ship: name and size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipType {
    name: String,
    size: usize,
}

impl ShipType {
    /// Create a new ship type.
    pub fn new(name: impl Into<String>, size: usize) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }

    /// Ship's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ship's size in cells.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Cells covered when anchored at `start` with `orientation` on a
    /// `board_size`×`board_size` board. Horizontal ships grow along the
    /// column, vertical ships along the row.
    pub fn cells(
        &self,
        start: Coordinate,
        orientation: Orientation,
        board_size: usize,
    ) -> Result<Vec<Coordinate>, PlacementError> {
        (0..self.size)
            .map(|i| {
                let coord = match orientation {
                    Orientation::Horizontal => Coordinate::new(start.row, start.col + i),
                    Orientation::Vertical => Coordinate::new(start.row + i, start.col),
                };
                if coord.row < board_size && coord.col < board_size {
                    Ok(coord)
                } else {
                    Err(PlacementError::OutOfBounds {
                        ship: self.name.clone(),
                        coord,
                    })
                }
            })
            .collect()
    }
}

/// A ship placed on a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ship {
    kind: ShipType,
    cells: Vec<Coordinate>,
    hits: usize,
}

impl Ship {
    pub(crate) fn new(kind: ShipType, cells: Vec<Coordinate>) -> Self {
        Self {
            kind,
            cells,
            hits: 0,
        }
    }

    pub fn kind(&self) -> &ShipType {
        &self.kind
    }

    pub fn name(&self) -> &str {
        self.kind.name()
    }

    pub fn size(&self) -> usize {
        self.kind.size()
    }

    /// Cells occupied by the ship, in placement order.
    pub fn cells(&self) -> &[Coordinate] {
        &self.cells
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    /// Check if the ship is sunk (every segment hit).
    pub fn is_sunk(&self) -> bool {
        self.hits == self.kind.size()
    }

    /// Count one more hit. The board guarantees each cell is hit at most once,
    /// so the counter never passes the ship's size.
    pub(crate) fn register_hit(&mut self) {
        debug_assert!(self.hits < self.kind.size());
        self.hits = (self.hits + 1).min(self.kind.size());
    }
}
