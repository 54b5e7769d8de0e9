//! sim-runner: headless driver for the ship-movement simulator.
//!
//! Usage:
//!   sim-runner --seed 12345 --ships 5 --ticks 10 --state-dir ./data
//!   sim-runner --ships 3 --ticks 1 --memory

use anyhow::{bail, Result};
use marisim_core::{
    config::SimConfig,
    engine::{Outcome, SimEngine},
    store::{FsStore, MemoryStore, StateStore},
    vessel::StoredVessel,
};
use std::env;
use std::io::{self, Write};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    // Fleet size follows the property-parsing policy: anything
    // unparseable falls back to the default instead of failing.
    let ships = SimConfig::from_property(flag_value(&args, "--ships")).fleet_size;
    let ticks = parse_arg(&args, "--ticks", 1u64);
    let in_memory = args.iter().any(|a| a == "--memory");
    let state_dir = flag_value(&args, "--state-dir").unwrap_or("./data");

    log::info!("sim-runner: seed={seed} ships={ships} ticks={ticks} memory={in_memory}");

    if in_memory {
        run(SimEngine::build(MemoryStore::new(), seed), ships, ticks)
    } else {
        run(SimEngine::build(FsStore::open(state_dir)?, seed), ships, ticks)
    }
}

fn run<S: StateStore>(mut engine: SimEngine<S>, ships: usize, ticks: u64) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut last_payload = String::new();
    for _ in 0..ticks {
        let output = engine.tick(ships);
        if output.outcome == Outcome::Failure {
            bail!(
                "tick {} failed: {}",
                engine.ticks_run() + 1,
                output
                    .attributes
                    .get("error")
                    .map(String::as_str)
                    .unwrap_or("unknown error")
            );
        }
        out.write_all(&output.contents)?;
        last_payload = String::from_utf8(output.contents)?;
    }
    out.flush()?;

    print_summary(&engine, ships, &last_payload);
    Ok(())
}

fn print_summary<S: StateStore>(engine: &SimEngine<S>, ships: usize, last_payload: &str) {
    let moored = last_payload
        .lines()
        .filter_map(|line| serde_json::from_str::<StoredVessel>(line).ok())
        .filter(|v| v.speed == 0.0)
        .count();

    eprintln!("=== RUN SUMMARY ===");
    eprintln!("  ticks run:  {}", engine.ticks_run());
    eprintln!("  fleet size: {ships}");
    eprintln!("  moored:     {moored}");
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    flag_value(args, flag)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
