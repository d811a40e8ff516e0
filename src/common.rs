//! Common types for the hunt: coordinates, shot outcomes and the error taxonomy.

use core::fmt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Index of a ship within the board that owns it.
pub type ShipId = usize;

/// A (row, column) cell on a square board.
///
/// Ordering is row-major, so sorting a set of coordinates yields the same
/// order as a scan of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The up/down/left/right neighbours that fall inside an `size`×`size` board.
    pub fn neighbours(self, size: usize) -> impl Iterator<Item = Coordinate> {
        let Coordinate { row, col } = self;
        [
            row.checked_sub(1).map(|r| (r, col)),
            Some((row + 1, col)),
            col.checked_sub(1).map(|c| (row, c)),
            Some((row, col + 1)),
        ]
        .into_iter()
        .flatten()
        .filter(move |&(r, c)| r < size && c < size)
        .map(|(r, c)| Coordinate::new(r, c))
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((row, col): (usize, usize)) -> Self {
        Coordinate::new(row, col)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// What the shot layer remembers about a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShotState {
    #[default]
    Untried,
    Miss,
    Hit,
}

/// Outcome of a single attack against a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShotResult {
    Miss,
    /// Hit the ship with the given id.
    Hit(ShipId),
    /// The cell had already been fired at; nothing changed.
    AlreadyAttacked,
}

impl ShotResult {
    pub fn is_hit(&self) -> bool {
        matches!(self, ShotResult::Hit(_))
    }
}

/// Coordinate outside `[0, size)` on either axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("coordinate {coord} is outside the {size}x{size} board")]
pub struct OutOfBoundsError {
    pub coord: Coordinate,
    pub size: usize,
}

/// Invalid ship placement request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("{ship} would extend past the board edge at {coord}")]
    OutOfBounds { ship: String, coord: Coordinate },
    #[error("{ship} overlaps {other} at {coord}")]
    Overlap {
        ship: String,
        other: String,
        coord: Coordinate,
    },
    #[error("{ship} has size {size} but {given} coordinates were given")]
    WrongLength {
        ship: String,
        size: usize,
        given: usize,
    },
    #[error("{ship} repeats coordinate {coord}")]
    DuplicateCell { ship: String, coord: Coordinate },
    #[error("unable to place {ship} after {attempts} attempts")]
    Exhausted { ship: String, attempts: usize },
}

/// No untried cell remains although the game has not been declared over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no untried cell left on the {size}x{size} board while ships remain afloat")]
pub struct TargetingExhaustedError {
    pub size: usize,
}

/// Setup rejected before any ship is placed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("board size must be between 1 and {max}, got {size}")]
    InvalidBoardSize { size: usize, max: usize },
    #[error("the fleet is empty")]
    EmptyFleet,
    #[error("{ship} has size zero")]
    ZeroLengthShip { ship: String },
    #[error("{ship} (size {size}) does not fit on a {board}x{board} board")]
    ShipTooLong {
        ship: String,
        size: usize,
        board: usize,
    },
    #[error("fleet needs {cells} cells but the board only has {available}")]
    FleetTooLarge { cells: usize, available: usize },
    #[error("{anchors} fixed anchors given for a fleet of {ships} ships")]
    AnchorCountMismatch { anchors: usize, ships: usize },
    #[error("invalid config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Anything that can stop a game.
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Placement(#[from] PlacementError),
    #[error(transparent)]
    OutOfBounds(#[from] OutOfBoundsError),
    #[error(transparent)]
    TargetingExhausted(#[from] TargetingExhaustedError),
    #[error("game still in progress after {moves} moves")]
    Unfinished { moves: usize },
    #[error("{side} has no ships to defend")]
    EmptyFleet { side: String },
    /// Shot layer and ship hit counters disagree.
    #[error(
        "bookkeeping desync: {shot_hits} hits recorded on the shot layer, {ship_hits} on ships"
    )]
    Desync { shot_hits: usize, ship_hits: usize },
}
