use anyhow::Context;
use battleship_hunt::{init_logging, new_duel, new_simulation, GameConfig};
use log::LevelFilter;
use serde_json::json;

fn main() -> anyhow::Result<()> {
    init_logging(LevelFilter::Warn);
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <seed1> <seed2>", args[0]);
        std::process::exit(1);
    }
    let seed1: u64 = args[1].parse().context("seed1 must be an integer")?;
    let seed2: u64 = args[2].parse().context("seed2 must be an integer")?;

    let config = GameConfig::default();
    let solo1 = new_simulation(&config, seed1)?.run()?;
    let solo2 = new_simulation(&config, seed2)?.run()?;
    let duel = new_duel(&config, (seed1, seed2))?.run()?;

    let result = json!({
        "player1": {"seed": seed1, "solo_moves": solo1.moves},
        "player2": {"seed": seed2, "solo_moves": solo2.moves},
        "duel_moves": duel.moves,
        "winner": duel.winner,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
