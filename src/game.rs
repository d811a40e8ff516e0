//! Turn driver: single-side simulations and two-side duels.

use core::fmt;

use log::{debug, info};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::board::Board;
use crate::common::{Coordinate, GameError, ShotResult};
use crate::config::{GameConfig, GameMode};
use crate::placement::place_fleet;
use crate::targeting::{HuntTargeting, TargetingStrategy};

/// Production targeting engine driven by a seeded `SmallRng`.
pub type Hunter = HuntTargeting<SmallRng>;

/// One attack as it appears in the game log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShotRecord {
    /// Attacking side; `None` in single-side play.
    pub shooter: Option<String>,
    pub coord: Coordinate,
    pub result: ShotResult,
    /// Name of the ship hit, if any.
    pub ship: Option<String>,
    /// The hit completed the ship.
    pub sunk: bool,
}

impl fmt::Display for ShotRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(shooter) = &self.shooter {
            write!(f, "{}: ", shooter)?;
        }
        write!(f, "Shot at {}: ", self.coord)?;
        match (&self.result, &self.ship) {
            (ShotResult::Hit(_), Some(name)) => write!(f, "Hit (Ship {})", name)?,
            (ShotResult::Hit(id), None) => write!(f, "Hit (Ship {})", id)?,
            (ShotResult::Miss, _) => write!(f, "Miss")?,
            (ShotResult::AlreadyAttacked, _) => write!(f, "Already attacked")?,
        }
        if self.sunk {
            write!(f, " - sunk")?;
        }
        Ok(())
    }
}

/// Summary of a finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameReport {
    pub moves: usize,
    pub hits: usize,
    pub shots: Vec<ShotRecord>,
    /// Set in duels only.
    pub winner: Option<String>,
}

impl fmt::Display for GameReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.winner {
            Some(name) => write!(f, "Game over! Winner: {}", name),
            None => write!(f, "Game over in {} moves! All ships have been hit.", self.moves),
        }
    }
}

/// Fire at `coord` on `board`, feed the result to `targeting` and build the log entry.
fn attack<T: TargetingStrategy>(
    board: &mut Board,
    targeting: &mut T,
    coord: Coordinate,
    shooter: Option<&str>,
) -> Result<ShotRecord, GameError> {
    let result = board.receive_attack(coord)?;
    targeting.record_result(coord, result, board.shots());
    let (ship, sunk) = match result {
        ShotResult::Hit(id) => match board.ship(id) {
            Some(s) => (Some(s.name().to_string()), s.is_sunk()),
            None => (None, false),
        },
        _ => (None, false),
    };
    let record = ShotRecord {
        shooter: shooter.map(str::to_string),
        coord,
        result,
        ship,
        sunk,
    };
    debug!("{}", record);
    if let (true, Some(name)) = (sunk, &record.ship) {
        info!("{} sunk at {}", name, coord);
    }
    Ok(record)
}

/// Shot-layer hits must match the ships' hit counters.
fn audit(board: &Board) -> Result<(), GameError> {
    let shot_hits = board.shots().hit_count();
    let ship_hits = board.total_ship_hits();
    if shot_hits == ship_hits {
        Ok(())
    } else {
        Err(GameError::Desync { shot_hits, ship_hits })
    }
}

/// A single hunter working through one target board.
pub struct Simulation<T> {
    board: Board,
    targeting: T,
    moves: usize,
    hits: usize,
    shots: Vec<ShotRecord>,
}

impl<T: TargetingStrategy> Simulation<T> {
    /// The board must already carry its fleet.
    pub fn new(board: Board, targeting: T) -> Result<Self, GameError> {
        if board.ships().is_empty() {
            return Err(GameError::EmptyFleet {
                side: "target".to_string(),
            });
        }
        Ok(Self {
            board,
            targeting,
            moves: 0,
            hits: 0,
            shots: Vec::new(),
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn moves(&self) -> usize {
        self.moves
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    /// Every ship cell has been hit, counting hits from before the driver took over.
    pub fn is_over(&self) -> bool {
        self.board.shots().hit_count() >= self.board.ship_cells()
    }

    /// Fire at a caller-chosen cell. Out-of-bounds input is rejected without
    /// counting a move.
    pub fn fire_at(&mut self, coord: Coordinate) -> Result<&ShotRecord, GameError> {
        let record = attack(&mut self.board, &mut self.targeting, coord, None)?;
        self.moves += 1;
        if record.result.is_hit() {
            self.hits += 1;
        }
        self.shots.push(record);
        Ok(&self.shots[self.shots.len() - 1])
    }

    /// Let the targeting strategy pick the next cell and fire at it.
    pub fn step(&mut self) -> Result<&ShotRecord, GameError> {
        let coord = self.targeting.next_shot(self.board.shots())?;
        self.fire_at(coord)
    }

    /// Play until every ship cell is hit.
    pub fn run(mut self) -> Result<GameReport, GameError> {
        while !self.is_over() {
            self.step()?;
        }
        self.finish()
    }

    /// Check bookkeeping and produce the report. Fails while ships remain afloat.
    pub fn finish(self) -> Result<GameReport, GameError> {
        if !self.is_over() {
            return Err(GameError::Unfinished { moves: self.moves });
        }
        audit(&self.board)?;
        info!("game over in {} moves", self.moves);
        Ok(GameReport {
            moves: self.moves,
            hits: self.hits,
            shots: self.shots,
            winner: None,
        })
    }
}

/// One participant in a duel: its own fleet and its own targeting engine.
pub struct Side<T> {
    pub name: String,
    pub board: Board,
    pub targeting: T,
}

impl<T> Side<T> {
    pub fn new(name: impl Into<String>, board: Board, targeting: T) -> Self {
        Self {
            name: name.into(),
            board,
            targeting,
        }
    }
}

/// Two sides alternating attacks on each other's boards.
pub struct Duel<T> {
    sides: [Side<T>; 2],
    current: usize,
    moves: usize,
    hits: usize,
    shots: Vec<ShotRecord>,
    winner: Option<usize>,
}

impl<T: TargetingStrategy> Duel<T> {
    /// `first` moves first.
    pub fn new(first: Side<T>, second: Side<T>) -> Result<Self, GameError> {
        for side in [&first, &second] {
            if side.board.ships().is_empty() {
                return Err(GameError::EmptyFleet {
                    side: side.name.clone(),
                });
            }
        }
        Ok(Self {
            sides: [first, second],
            current: 0,
            moves: 0,
            hits: 0,
            shots: Vec::new(),
            winner: None,
        })
    }

    /// Side whose turn it is.
    pub fn current(&self) -> &Side<T> {
        &self.sides[self.current]
    }

    /// Side being attacked this turn.
    pub fn opponent(&self) -> &Side<T> {
        &self.sides[1 - self.current]
    }

    pub fn side(&self, index: usize) -> Option<&Side<T>> {
        self.sides.get(index)
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    pub fn winner(&self) -> Option<&str> {
        self.winner.map(|i| self.sides[i].name.as_str())
    }

    /// Play one turn for the current side, then hand over.
    pub fn play_turn(&mut self) -> Result<&ShotRecord, GameError> {
        let [first, second] = &mut self.sides;
        let (attacker, defender) = if self.current == 0 {
            (first, second)
        } else {
            (second, first)
        };
        let coord = attacker.targeting.next_shot(defender.board.shots())?;
        let record = attack(
            &mut defender.board,
            &mut attacker.targeting,
            coord,
            Some(attacker.name.as_str()),
        )?;
        self.moves += 1;
        if record.result.is_hit() {
            self.hits += 1;
        }
        if defender.board.all_sunk() {
            info!("{} has sunk every ship of {}", attacker.name, defender.name);
            self.winner = Some(self.current);
        } else {
            self.current = 1 - self.current;
        }
        self.shots.push(record);
        Ok(&self.shots[self.shots.len() - 1])
    }

    /// Play until one fleet is gone.
    pub fn run(mut self) -> Result<GameReport, GameError> {
        while !self.is_over() {
            self.play_turn()?;
        }
        self.finish()
    }

    /// Fails until one fleet is gone.
    pub fn finish(self) -> Result<GameReport, GameError> {
        if !self.is_over() {
            return Err(GameError::Unfinished { moves: self.moves });
        }
        for side in &self.sides {
            audit(&side.board)?;
        }
        let winner = self.winner.map(|i| self.sides[i].name.clone());
        Ok(GameReport {
            moves: self.moves,
            hits: self.hits,
            shots: self.shots,
            winner,
        })
    }
}

/// Board with `config`'s fleet laid out and a hunter to attack it, both
/// derived from `seed`.
fn armed_board(config: &GameConfig, seed: u64) -> Result<(Board, Hunter), GameError> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut board = Board::new(config.board_size);
    place_fleet(&mut board, config, &mut rng)?;
    let hunter = HuntTargeting::new(config.board_size, SmallRng::from_rng(&mut rng))
        .with_shuffled_adjacency(config.shuffle_adjacent);
    Ok((board, hunter))
}

/// Single-side game against a fresh target board.
pub fn new_simulation(
    config: &GameConfig,
    seed: u64,
) -> Result<Simulation<Hunter>, GameError> {
    let (board, hunter) = armed_board(config, seed)?;
    Simulation::new(board, hunter)
}

/// Duel between "Player1" and "Player2", each side seeded separately.
pub fn new_duel(config: &GameConfig, seeds: (u64, u64)) -> Result<Duel<Hunter>, GameError> {
    let (board1, hunter1) = armed_board(config, seeds.0)?;
    let (board2, hunter2) = armed_board(config, seeds.1)?;
    Duel::new(
        Side::new("Player1", board1, hunter1),
        Side::new("Player2", board2, hunter2),
    )
}

/// Play the game `config.mode` asks for. Duels seed the second side with `seed + 1`.
pub fn run_game(config: &GameConfig, seed: u64) -> Result<GameReport, GameError> {
    match config.mode {
        GameMode::Single => new_simulation(config, seed)?.run(),
        GameMode::Duel => new_duel(config, (seed, seed.wrapping_add(1)))?.run(),
    }
}
