mod board;
mod common;
mod config;
mod game;
pub mod input;
mod logging;
mod placement;
mod ship;
pub mod stats;
mod targeting;

pub use board::*;
pub use common::*;
pub use config::*;
pub use game::*;
pub use input::{parse_coord, ParseCoordError};
pub use logging::init_logging;
pub use placement::*;
pub use ship::*;
pub use stats::{run_batch, BatchSummary};
pub use targeting::*;
