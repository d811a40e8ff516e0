//! Fleet placement: fixed anchors or bounded random sampling.

use log::{debug, warn};
use rand::Rng;

use crate::board::Board;
use crate::common::{Coordinate, GameError, PlacementError, ShipId};
use crate::config::{Anchor, GameConfig, Placement, MAX_LAYOUT_ATTEMPTS, MAX_PLACEMENT_ATTEMPTS};
use crate::ship::{Orientation, ShipType};

/// Place every ship at its anchor. Either the whole layout lands or the board
/// is left as it was and the first bad placement is returned.
pub fn place_fixed(
    board: &mut Board,
    layout: &[(ShipType, Anchor)],
) -> Result<Vec<ShipId>, PlacementError> {
    let mut candidate = board.clone();
    let mut ids = Vec::with_capacity(layout.len());
    for (ship, anchor) in layout {
        let cells = ship.cells(anchor.start(), anchor.orientation, candidate.size())?;
        ids.push(candidate.place(ship.clone(), cells)?);
    }
    *board = candidate;
    Ok(ids)
}

/// Returns a random free (start, orientation) for `ship`, or `None` after
/// `MAX_PLACEMENT_ATTEMPTS` rejected samples.
pub fn random_placement<R: Rng + ?Sized>(
    board: &Board,
    ship: &ShipType,
    rng: &mut R,
) -> Result<Option<(Coordinate, Orientation)>, PlacementError> {
    let n = board.size();
    if n == 0 {
        return Ok(None);
    }
    if ship.size() > n {
        // Surfaces the out-of-bounds cell for ships that can never fit.
        ship.cells(Coordinate::new(0, 0), Orientation::Horizontal, n)?;
    }
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let orientation = if rng.random() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        let (max_r, max_c) = match orientation {
            Orientation::Horizontal => (n - 1, n - ship.size()),
            Orientation::Vertical => (n - ship.size(), n - 1),
        };
        let start = Coordinate::new(rng.random_range(0..=max_r), rng.random_range(0..=max_c));
        let cells = ship.cells(start, orientation, n)?;
        if board.check_placement(ship, &cells).is_ok() {
            return Ok(Some((start, orientation)));
        }
    }
    Ok(None)
}

/// Randomly place `fleet` in order. A ship that cannot be placed restarts the
/// whole layout; after `MAX_LAYOUT_ATTEMPTS` restarts the call fails and the
/// board is left untouched.
pub fn place_random<R: Rng + ?Sized>(
    board: &mut Board,
    fleet: &[ShipType],
    rng: &mut R,
) -> Result<Vec<ShipId>, PlacementError> {
    let mut stuck = None;
    'layout: for attempt in 1..=MAX_LAYOUT_ATTEMPTS {
        let mut candidate = board.clone();
        let mut ids = Vec::with_capacity(fleet.len());
        for ship in fleet {
            match random_placement(&candidate, ship, rng)? {
                Some((start, orientation)) => {
                    let cells = ship.cells(start, orientation, candidate.size())?;
                    debug!("placed {} at {} {:?}", ship.name(), start, orientation);
                    ids.push(candidate.place(ship.clone(), cells)?);
                }
                None => {
                    warn!("no room for {} on layout attempt {}, restarting", ship.name(), attempt);
                    stuck = Some(ship.name().to_string());
                    continue 'layout;
                }
            }
        }
        *board = candidate;
        return Ok(ids);
    }
    Err(PlacementError::Exhausted {
        ship: stuck.unwrap_or_default(),
        attempts: MAX_LAYOUT_ATTEMPTS * MAX_PLACEMENT_ATTEMPTS,
    })
}

/// Validate `config` and lay its fleet out on `board`.
pub fn place_fleet<R: Rng + ?Sized>(
    board: &mut Board,
    config: &GameConfig,
    rng: &mut R,
) -> Result<Vec<ShipId>, GameError> {
    config.validate()?;
    let ids = match &config.placement {
        Placement::Random => place_random(board, &config.fleet, rng)?,
        Placement::Fixed { anchors } => {
            let layout: Vec<(ShipType, Anchor)> = config
                .fleet
                .iter()
                .cloned()
                .zip(anchors.iter().copied())
                .collect();
            place_fixed(board, &layout)?
        }
    };
    Ok(ids)
}
