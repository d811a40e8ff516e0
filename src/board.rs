//! Board model: ship occupancy, shot history and the ships placed on it.

use core::fmt;
use std::collections::HashSet;

use crate::common::{Coordinate, OutOfBoundsError, PlacementError, ShipId, ShotResult, ShotState};
use crate::ship::{Ship, ShipType};

/// Per-cell record of which cells have been fired at and how it went.
///
/// This is the only part of a board a targeting strategy may look at.
#[derive(Clone, PartialEq, Eq)]
pub struct ShotLayer {
    size: usize,
    cells: Vec<ShotState>,
}

impl ShotLayer {
    /// Create a layer with every cell untried.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![ShotState::Untried; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// State of `coord`, or `None` when it lies off the board.
    pub fn get(&self, coord: Coordinate) -> Option<ShotState> {
        self.index(coord).map(|i| self.cells[i])
    }

    /// `true` when `coord` is on the board and has already been fired at.
    pub fn is_tried(&self, coord: Coordinate) -> bool {
        matches!(self.get(coord), Some(ShotState::Hit | ShotState::Miss))
    }

    /// First untried cell in row-major order.
    pub fn first_untried(&self) -> Option<Coordinate> {
        self.cells
            .iter()
            .position(|s| *s == ShotState::Untried)
            .map(|i| Coordinate::new(i / self.size, i % self.size))
    }

    /// Number of cells recorded as hits.
    pub fn hit_count(&self) -> usize {
        self.cells.iter().filter(|s| **s == ShotState::Hit).count()
    }

    /// Number of cells fired at so far.
    pub fn tried_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|s| **s != ShotState::Untried)
            .count()
    }

    fn set(&mut self, coord: Coordinate, state: ShotState) {
        if let Some(i) = self.index(coord) {
            self.cells[i] = state;
        }
    }

    fn index(&self, coord: Coordinate) -> Option<usize> {
        (coord.row < self.size && coord.col < self.size).then(|| coord.row * self.size + coord.col)
    }
}

impl fmt::Display for ShotLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size.max(1)) {
            let line: Vec<&str> = row
                .iter()
                .map(|s| match s {
                    ShotState::Untried => ".",
                    ShotState::Miss => "o",
                    ShotState::Hit => "X",
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

impl fmt::Debug for ShotLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ShotLayer {{ size: {}, tried: {} }}", self.size, self.tried_count())
    }
}

/// Square board holding the occupancy layer, the shot layer and its fleet.
#[derive(Clone)]
pub struct Board {
    size: usize,
    occupancy: Vec<Option<ShipId>>,
    shots: ShotLayer,
    ships: Vec<Ship>,
}

impl Board {
    /// Create an empty `size`×`size` board (no ships placed, nothing tried).
    pub fn new(size: usize) -> Self {
        Self {
            size,
            occupancy: vec![None; size * size],
            shots: ShotLayer::new(size),
            ships: Vec::new(),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Bounds check only.
    pub fn valid_coordinate(&self, coord: Coordinate) -> bool {
        coord.row < self.size && coord.col < self.size
    }

    /// Read-only view of the shot history.
    pub fn shots(&self) -> &ShotLayer {
        &self.shots
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn ship(&self, id: ShipId) -> Option<&Ship> {
        self.ships.get(id)
    }

    /// Ship occupying `coord`, if any.
    pub fn ship_at(&self, coord: Coordinate) -> Option<ShipId> {
        self.index(coord).and_then(|i| self.occupancy[i])
    }

    /// Total number of cells covered by ships.
    pub fn ship_cells(&self) -> usize {
        self.ships.iter().map(Ship::size).sum()
    }

    /// Sum of every ship's hit counter.
    pub fn total_ship_hits(&self) -> usize {
        self.ships.iter().map(Ship::hits).sum()
    }

    /// Returns `true` when every ship is sunk. An empty fleet is vacuously sunk.
    pub fn all_sunk(&self) -> bool {
        self.ships.iter().all(Ship::is_sunk)
    }

    /// Check whether `coords` could hold `ship` right now, without mutating.
    pub fn check_placement(
        &self,
        ship: &ShipType,
        coords: &[Coordinate],
    ) -> Result<(), PlacementError> {
        if coords.len() != ship.size() {
            return Err(PlacementError::WrongLength {
                ship: ship.name().to_string(),
                size: ship.size(),
                given: coords.len(),
            });
        }
        let mut seen = HashSet::with_capacity(coords.len());
        for &coord in coords {
            if !self.valid_coordinate(coord) {
                return Err(PlacementError::OutOfBounds {
                    ship: ship.name().to_string(),
                    coord,
                });
            }
            if !seen.insert(coord) {
                return Err(PlacementError::DuplicateCell {
                    ship: ship.name().to_string(),
                    coord,
                });
            }
            if let Some(other) = self.ship_at(coord) {
                return Err(PlacementError::Overlap {
                    ship: ship.name().to_string(),
                    other: self.ships[other].name().to_string(),
                    coord,
                });
            }
        }
        Ok(())
    }

    /// Place `ship` on `coords`. Nothing changes unless every cell is in
    /// bounds and free.
    pub fn place(
        &mut self,
        ship: ShipType,
        coords: Vec<Coordinate>,
    ) -> Result<ShipId, PlacementError> {
        self.check_placement(&ship, &coords)?;
        let id = self.ships.len();
        for &coord in &coords {
            if let Some(i) = self.index(coord) {
                self.occupancy[i] = Some(id);
            }
        }
        self.ships.push(Ship::new(ship, coords));
        Ok(id)
    }

    /// Fire at `coord`. A repeated shot reports `AlreadyAttacked` and leaves
    /// the board untouched.
    pub fn receive_attack(&mut self, coord: Coordinate) -> Result<ShotResult, OutOfBoundsError> {
        let i = self.index(coord).ok_or(OutOfBoundsError {
            coord,
            size: self.size,
        })?;
        if self.shots.is_tried(coord) {
            return Ok(ShotResult::AlreadyAttacked);
        }
        match self.occupancy[i] {
            Some(id) => {
                self.shots.set(coord, ShotState::Hit);
                self.ships[id].register_hit();
                Ok(ShotResult::Hit(id))
            }
            None => {
                self.shots.set(coord, ShotState::Miss);
                Ok(ShotResult::Miss)
            }
        }
    }

    /// Text grid of the board. With `reveal`, unhit ship cells show as `S`.
    pub fn render(&self, reveal: bool) -> String {
        let mut out = String::new();
        for row in 0..self.size {
            let line: Vec<&str> = (0..self.size)
                .map(|col| {
                    let coord = Coordinate::new(row, col);
                    match self.shots.get(coord) {
                        Some(ShotState::Hit) => "X",
                        Some(ShotState::Miss) => "o",
                        _ if reveal && self.ship_at(coord).is_some() => "S",
                        _ => ".",
                    }
                })
                .collect();
            out.push_str(&line.join(" "));
            out.push('\n');
        }
        out
    }

    fn index(&self, coord: Coordinate) -> Option<usize> {
        self.valid_coordinate(coord)
            .then(|| coord.row * self.size + coord.col)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Board {{\n  size: {},\n  ships: {:?},\n  shots: {:?}\n}}",
            self.size, self.ships, self.shots
        )
    }
}
