//! Batch statistics over many independent single-side games.

use std::thread;

use log::info;
use serde::Serialize;

use crate::common::GameError;
use crate::config::GameConfig;
use crate::game::new_simulation;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    pub games: usize,
    pub board_cells: usize,
    pub min_moves: usize,
    pub max_moves: usize,
    pub mean_moves: f64,
}

impl BatchSummary {
    fn from_moves(moves: &[usize], board_cells: usize) -> Self {
        let total: usize = moves.iter().sum();
        Self {
            games: moves.len(),
            board_cells,
            min_moves: moves.iter().copied().min().unwrap_or(0),
            max_moves: moves.iter().copied().max().unwrap_or(0),
            mean_moves: if moves.is_empty() {
                0.0
            } else {
                total as f64 / moves.len() as f64
            },
        }
    }
}

/// Move counts for seeds `seeds`, in seed order.
fn play_seeds(
    config: &GameConfig,
    seeds: impl Iterator<Item = u64>,
) -> Result<Vec<usize>, GameError> {
    seeds
        .map(|seed| new_simulation(config, seed)?.run().map(|r| r.moves))
        .collect()
}

/// Play `games` simulations with seeds `base_seed..base_seed + games`, split
/// across up to `threads` worker threads. Each game owns all of its state.
pub fn run_batch(
    config: &GameConfig,
    games: usize,
    base_seed: u64,
    threads: usize,
) -> Result<BatchSummary, GameError> {
    config.validate()?;
    let threads = threads.clamp(1, games.max(1));
    let chunk = games.div_ceil(threads).max(1);
    let seeds: Vec<u64> = (0..games as u64).map(|i| base_seed.wrapping_add(i)).collect();

    let moves = if threads == 1 {
        play_seeds(config, seeds.iter().copied())?
    } else {
        let results: Vec<Result<Vec<usize>, GameError>> = thread::scope(|scope| {
            let handles: Vec<_> = seeds
                .chunks(chunk)
                .map(|part| scope.spawn(move || play_seeds(config, part.iter().copied())))
                .collect();
            handles
                .into_iter()
                .map(|h| match h.join() {
                    Ok(res) => res,
                    Err(panic) => std::panic::resume_unwind(panic),
                })
                .collect()
        });
        let mut all = Vec::with_capacity(games);
        for part in results {
            all.extend(part?);
        }
        all
    };

    let summary = BatchSummary::from_moves(&moves, config.board_size * config.board_size);
    info!(
        "{} games: min {} max {} mean {:.2}",
        summary.games, summary.min_moves, summary.max_moves, summary.mean_moves
    );
    Ok(summary)
}
