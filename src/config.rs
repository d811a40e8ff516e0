//! Board size, fleet definitions and game modes.

use serde::{Deserialize, Serialize};

use crate::common::{ConfigError, Coordinate};
use crate::ship::{Orientation, ShipType};

pub const DEFAULT_BOARD_SIZE: usize = 10;
/// Largest board the CLI accepts.
pub const MAX_BOARD_SIZE: usize = 64;

/// Random samples tried for one ship before the layout is restarted.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 200;
/// Fresh layouts tried before random placement gives up.
pub const MAX_LAYOUT_ATTEMPTS: usize = 50;

pub const CLASSIC_FLEET: [(&str, usize); 5] = [
    ("Carrier", 5),
    ("Battleship", 4),
    ("Cruiser", 3),
    ("Submarine", 3),
    ("Destroyer", 2),
];

/// The classic five-ship fleet.
pub fn classic_fleet() -> Vec<ShipType> {
    CLASSIC_FLEET
        .iter()
        .map(|&(name, size)| ShipType::new(name, size))
        .collect()
}

/// Where a ship's first cell goes when placement is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchor {
    pub row: usize,
    pub col: usize,
    pub orientation: Orientation,
}

impl Anchor {
    pub fn new(row: usize, col: usize, orientation: Orientation) -> Self {
        Self { row, col, orientation }
    }

    pub fn start(&self) -> Coordinate {
        Coordinate::new(self.row, self.col)
    }
}

/// How the fleet is laid out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Placement {
    Random,
    /// One anchor per fleet entry, in fleet order.
    Fixed { anchors: Vec<Anchor> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// One hunter against a target board.
    Single,
    /// Two sides alternating shots.
    Duel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board_size: usize,
    pub fleet: Vec<ShipType>,
    pub placement: Placement,
    pub mode: GameMode,
    /// Shuffle freshly queued neighbours of a hit.
    pub shuffle_adjacent: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            fleet: classic_fleet(),
            placement: Placement::Random,
            mode: GameMode::Single,
            shuffle_adjacent: false,
        }
    }
}

impl GameConfig {
    /// Two fixed fleets: a Carrier across the top row and a Battleship
    /// running down from (2, 2).
    pub fn demo_duel() -> Self {
        Self {
            fleet: vec![ShipType::new("Carrier", 5), ShipType::new("Battleship", 4)],
            placement: Placement::Fixed {
                anchors: vec![
                    Anchor::new(0, 0, Orientation::Horizontal),
                    Anchor::new(2, 2, Orientation::Vertical),
                ],
            },
            mode: GameMode::Duel,
            shuffle_adjacent: true,
            ..Self::default()
        }
    }

    /// Parse a JSON config; missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Total number of cells the fleet occupies.
    pub fn total_ship_cells(&self) -> usize {
        self.fleet.iter().map(ShipType::size).sum()
    }

    /// Reject setups that cannot produce a playable board.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let size = self.board_size;
        if size == 0 || size > MAX_BOARD_SIZE {
            return Err(ConfigError::InvalidBoardSize {
                size,
                max: MAX_BOARD_SIZE,
            });
        }
        if self.fleet.is_empty() {
            return Err(ConfigError::EmptyFleet);
        }
        for ship in &self.fleet {
            if ship.size() == 0 {
                return Err(ConfigError::ZeroLengthShip {
                    ship: ship.name().to_string(),
                });
            }
            if ship.size() > size {
                return Err(ConfigError::ShipTooLong {
                    ship: ship.name().to_string(),
                    size: ship.size(),
                    board: size,
                });
            }
        }
        let cells = self.total_ship_cells();
        if cells > size * size {
            return Err(ConfigError::FleetTooLarge {
                cells,
                available: size * size,
            });
        }
        if let Placement::Fixed { anchors } = &self.placement {
            if anchors.len() != self.fleet.len() {
                return Err(ConfigError::AnchorCountMismatch {
                    anchors: anchors.len(),
                    ships: self.fleet.len(),
                });
            }
        }
        Ok(())
    }
}
