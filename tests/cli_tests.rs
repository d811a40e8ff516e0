use std::fs;
use std::path::PathBuf;
use std::process::Command;

fn write_config(name: &str, json: &str) -> PathBuf {
    let file = format!("battleship-hunt-{}-{}.json", name, std::process::id());
    let path = std::env::temp_dir().join(file);
    fs::write(&path, json).expect("failed to write config");
    path
}

#[test]
fn run_plays_the_configured_duel() {
    let path = write_config("run-duel", r#"{"mode":"duel"}"#);
    let output = Command::new(env!("CARGO_BIN_EXE_battleship-hunt"))
        .args(["run", "--quiet", "--seed", "1", "--config"])
        .arg(&path)
        .output()
        .expect("failed to run battleship-hunt");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("non utf8 output");
    assert!(stdout.trim().starts_with("Game over! Winner: "), "{}", stdout);
}

#[test]
fn simulate_rejects_a_duel_config() {
    let path = write_config("simulate-duel", r#"{"mode":"duel"}"#);
    let output = Command::new(env!("CARGO_BIN_EXE_battleship-hunt"))
        .args(["simulate", "--quiet", "--seed", "1", "--config"])
        .arg(&path)
        .output()
        .expect("failed to run battleship-hunt");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn duel_rejects_a_single_config() {
    let path = write_config("duel-single", r#"{"mode":"single"}"#);
    let output = Command::new(env!("CARGO_BIN_EXE_battleship-hunt"))
        .args(["duel", "--seed", "1", "--config"])
        .arg(&path)
        .output()
        .expect("failed to run battleship-hunt");
    assert!(!output.status.success());
}
