use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use battleship_hunt::{
    init_logging, new_duel, new_simulation, parse_coord, run_batch, run_game, GameConfig,
    GameError, GameMode, Placement,
};
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use rand::Rng;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
struct Setup {
    /// JSON game config; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    size: Option<usize>,
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
    /// Shuffle the neighbours queued after each hit.
    #[arg(long)]
    shuffle_adjacent: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Play whichever mode the config selects.
    Run {
        #[command(flatten)]
        setup: Setup,
        /// Print only the summary line.
        #[arg(long)]
        quiet: bool,
    },
    /// Hunt a randomly placed fleet until every ship cell is hit.
    Simulate {
        #[command(flatten)]
        setup: Setup,
        /// Print only the summary line.
        #[arg(long)]
        quiet: bool,
    },
    /// Two hunters fire at each other's fleets in turn.
    Duel {
        #[command(flatten)]
        setup: Setup,
        /// Use the fixed demo layout (Carrier at (0,0) horizontal, Battleship at (2,2) vertical).
        #[arg(long)]
        fixed: bool,
        /// Print the attacked board after every turn.
        #[arg(long)]
        verbose: bool,
    },
    /// Run many seeded simulations and print move statistics as JSON.
    Batch {
        #[command(flatten)]
        setup: Setup,
        #[arg(long, default_value_t = 100)]
        games: usize,
        #[arg(long, default_value_t = 1)]
        threads: usize,
    },
    /// Fire at a hidden random fleet by typing coordinates.
    Play {
        #[command(flatten)]
        setup: Setup,
    },
}

/// Load the config file (or `base`) and apply flag overrides. With `mode`,
/// a config selecting a different game mode is rejected.
fn load_config(
    setup: &Setup,
    base: GameConfig,
    mode: Option<GameMode>,
) -> anyhow::Result<GameConfig> {
    let mut config = match &setup.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            GameConfig::from_json(&text)?
        }
        None => base,
    };
    if let Some(size) = setup.size {
        config.board_size = size;
    }
    if setup.shuffle_adjacent {
        config.shuffle_adjacent = true;
    }
    config.validate()?;
    if let Some(mode) = mode {
        if config.mode != mode {
            anyhow::bail!(
                "config selects {:?} mode but this command plays {:?}; use `run` instead",
                config.mode,
                mode
            );
        }
    }
    Ok(config)
}

fn resolve_seed(seed: Option<u64>) -> u64 {
    match seed {
        Some(s) => {
            println!("Using fixed seed: {} (game will be reproducible)", s);
            s
        }
        None => rand::rng().random(),
    }
}

fn main() -> anyhow::Result<()> {
    init_logging(LevelFilter::Info);
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { setup, quiet } => {
            let config = load_config(&setup, GameConfig::default(), None)?;
            let seed = resolve_seed(setup.seed);
            let report = run_game(&config, seed)?;
            if !quiet {
                for shot in &report.shots {
                    println!("{}", shot);
                }
            }
            println!("{}", report);
        }
        Commands::Simulate { setup, quiet } => {
            let config = load_config(&setup, GameConfig::default(), Some(GameMode::Single))?;
            let seed = resolve_seed(setup.seed);
            let report = new_simulation(&config, seed)?.run()?;
            if !quiet {
                for shot in &report.shots {
                    println!("{}", shot);
                }
            }
            println!("{}", report);
        }
        Commands::Duel {
            setup,
            fixed,
            verbose,
        } => {
            let base = if fixed {
                GameConfig::demo_duel()
            } else {
                GameConfig {
                    mode: GameMode::Duel,
                    ..GameConfig::default()
                }
            };
            let config = load_config(&setup, base, Some(GameMode::Duel))?;
            let seed = resolve_seed(setup.seed);
            let mut duel = new_duel(&config, (seed, seed.wrapping_add(1)))?;
            while !duel.is_over() {
                println!("{}", duel.play_turn()?);
                if verbose {
                    // The turn hands over to the defender unless it ended the game.
                    let attacked = if duel.is_over() {
                        duel.opponent()
                    } else {
                        duel.current()
                    };
                    println!("Board of {}:", attacked.name);
                    println!("{}", attacked.board.render(true));
                }
            }
            println!("{}", duel.finish()?);
        }
        Commands::Batch {
            setup,
            games,
            threads,
        } => {
            let config = load_config(&setup, GameConfig::default(), Some(GameMode::Single))?;
            let seed = setup.seed.unwrap_or(0);
            let summary = run_batch(&config, games, seed, threads)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Commands::Play { setup } => {
            let mut config = load_config(&setup, GameConfig::default(), Some(GameMode::Single))?;
            config.placement = Placement::Random;
            let seed = resolve_seed(setup.seed);
            play(&config, seed)?;
        }
    }
    Ok(())
}

fn play(config: &GameConfig, seed: u64) -> anyhow::Result<()> {
    let mut game = new_simulation(config, seed)?;
    let size = config.board_size;
    println!(
        "Sink {} ships on a {}x{} board. Enter `row col` (0-based), or `q` to quit.",
        config.fleet.len(),
        size,
        size
    );
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    while !game.is_over() {
        print!("{}", game.board().shots());
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            println!();
            return Ok(());
        };
        let line = line?;
        if line.trim().eq_ignore_ascii_case("q") {
            return Ok(());
        }
        let coord = match parse_coord(&line) {
            Ok(c) => c,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };
        match game.fire_at(coord) {
            Ok(record) => println!("{}", record),
            Err(GameError::OutOfBounds(e)) => println!("{}", e),
            Err(e) => return Err(e.into()),
        }
    }
    println!("{}", game.finish()?);
    Ok(())
}
