//! Shot selection: checkerboard parity search plus adjacent-cell hunting.
//!
//! Before anything is hit the engine works through a shuffled backlog of one
//! checkerboard colour class. Every ship of length two or more covers at least
//! one cell of each colour, so sweeping a single class is enough to find every
//! ship. Once a hit lands, its untried neighbours go into a FIFO priority
//! queue that is drained before the parity sweep resumes.

use std::collections::VecDeque;

use log::trace;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::ShotLayer;
use crate::common::{Coordinate, ShotResult, TargetingExhaustedError};

/// Something that picks where to fire next and learns from the outcome.
pub trait TargetingStrategy {
    /// Choose the next cell to fire at. `shots` is the defender's shot layer.
    fn next_shot(&mut self, shots: &ShotLayer) -> Result<Coordinate, TargetingExhaustedError>;

    /// Feed back the result of firing at `coord`. `shots` already reflects it.
    fn record_result(&mut self, coord: Coordinate, result: ShotResult, shots: &ShotLayer);
}

/// Parity search with a hunt queue around hits.
#[derive(Debug, Clone)]
pub struct HuntTargeting<R> {
    size: usize,
    priority: VecDeque<Coordinate>,
    parity: VecDeque<Coordinate>,
    shuffle_adjacent: bool,
    rng: R,
}

impl<R: Rng> HuntTargeting<R> {
    /// Engine for an `size`×`size` board with a freshly shuffled parity backlog.
    pub fn new(size: usize, mut rng: R) -> Self {
        let mut parity = parity_cells(size);
        parity.shuffle(&mut rng);
        Self {
            size,
            priority: VecDeque::new(),
            parity: parity.into(),
            shuffle_adjacent: false,
            rng,
        }
    }

    /// Shuffle each batch of neighbours as it is queued.
    pub fn with_shuffled_adjacency(mut self, shuffle: bool) -> Self {
        self.shuffle_adjacent = shuffle;
        self
    }

    /// Cells waiting in the hunt queue, front first.
    pub fn pending(&self) -> impl Iterator<Item = &Coordinate> {
        self.priority.iter()
    }

    /// Parity cells not yet handed out.
    pub fn parity_remaining(&self) -> usize {
        self.parity.len()
    }

    fn enqueue_neighbours(&mut self, coord: Coordinate, shots: &ShotLayer) {
        let first_new = self.priority.len();
        for n in coord.neighbours(self.size) {
            if !shots.is_tried(n) && !self.priority.contains(&n) {
                self.priority.push_back(n);
            }
        }
        if self.shuffle_adjacent {
            self.priority.make_contiguous()[first_new..].shuffle(&mut self.rng);
        }
        trace!(
            "hit at {} queued {} neighbours, {} pending",
            coord,
            self.priority.len() - first_new,
            self.priority.len()
        );
    }
}

impl<R: Rng> TargetingStrategy for HuntTargeting<R> {
    fn next_shot(&mut self, shots: &ShotLayer) -> Result<Coordinate, TargetingExhaustedError> {
        debug_assert_eq!(shots.size(), self.size);
        while let Some(coord) = self.priority.pop_front() {
            if !shots.is_tried(coord) {
                trace!("hunting {}", coord);
                return Ok(coord);
            }
        }
        while let Some(coord) = self.parity.pop_front() {
            if !shots.is_tried(coord) {
                trace!("searching {}", coord);
                return Ok(coord);
            }
        }
        shots
            .first_untried()
            .ok_or(TargetingExhaustedError { size: self.size })
    }

    fn record_result(&mut self, coord: Coordinate, result: ShotResult, shots: &ShotLayer) {
        self.priority.retain(|c| *c != coord);
        // A sunk ship still reads as a hit here, so its neighbours get queued too.
        if let ShotResult::Hit(_) = result {
            self.enqueue_neighbours(coord, shots);
        }
    }
}

/// Cells with an even row + column sum, row-major.
pub fn parity_cells(size: usize) -> Vec<Coordinate> {
    (0..size)
        .flat_map(|row| (0..size).map(move |col| Coordinate::new(row, col)))
        .filter(|c| (c.row + c.col) % 2 == 0)
        .collect()
}
