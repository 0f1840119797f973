//! Strictly Connect4 - headless driver
//!
//! Runs the connect-four engine frame by frame with a simulated falling
//! piece, for scripted games, stdin play and config inspection.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod animator;
mod cli;
mod driver;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command, FrameArgs};
use driver::Driver;
use std::io::BufRead;
use std::path::Path;
use strictly_connect4::{DropResponse, EngineConfig, TurnEngine};
use tracing::{info, instrument, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    initialize_tracing();

    let config = load_config(&cli.config)?;

    match cli.command {
        Command::Simulate {
            moves,
            until_restart,
            json,
            frames,
        } => run_simulation(config, moves, until_restart, json, frames),
        Command::Play { frames } => run_play(config, frames),
        Command::Config => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,strictly_connect4=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[instrument(skip(config_path), fields(config_path = %config_path.display()))]
fn load_config(config_path: &Path) -> Result<EngineConfig> {
    if config_path.exists() {
        Ok(EngineConfig::from_file(config_path)?)
    } else {
        info!("Config file not found, using classic rules");
        Ok(EngineConfig::default())
    }
}

/// Play a scripted game
#[instrument(skip(config, moves), fields(moves = moves.len()))]
fn run_simulation(
    config: EngineConfig,
    moves: Vec<usize>,
    until_restart: bool,
    json: bool,
    frames: FrameArgs,
) -> Result<()> {
    info!("Starting simulation");
    let mut driver = Driver::new(TurnEngine::new(config), frames);
    let mut played = 0;

    for column in &moves {
        if let DropResponse::Accepted { .. } = driver.drop_piece(*column)? {
            let snapshot = driver.settle()?;
            played += 1;
            if snapshot.phase().is_terminal() {
                break;
            }
        }
    }

    if played < moves.len() && driver.engine().phase().is_terminal() {
        warn!(
            unplayed = moves.len() - played,
            "Game ended before all moves were played"
        );
    }

    let final_board = driver.engine().board_snapshot();
    let final_snapshot = driver.engine().current_phase();
    info!(phase = %final_snapshot.phase(), drops = played, "Simulation finished");

    if json {
        let report = serde_json::json!({
            "snapshot": final_snapshot,
            "board": final_board,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}\n", final_board.display());
        println!("{}", final_snapshot.phase());
    }

    if until_restart && final_snapshot.phase().is_terminal() {
        driver.wait_for_restart()?;
        println!("{}", driver.engine().phase());
    }

    Ok(())
}

/// Play interactively, one column per stdin line
#[instrument(skip(config))]
fn run_play(config: EngineConfig, frames: FrameArgs) -> Result<()> {
    let mut driver = Driver::new(TurnEngine::new(config), frames);
    println!("{}\n", driver.engine().board().display());
    println!("{}", driver.engine().phase());

    for line in std::io::stdin().lock().lines() {
        let line = line?;
        let input = line.trim();
        if input.eq_ignore_ascii_case("q") {
            break;
        }

        let Ok(column) = input.parse::<usize>() else {
            println!("Enter a column number or q");
            continue;
        };

        match driver.drop_piece(column) {
            Ok(DropResponse::Accepted { .. }) => {}
            Ok(DropResponse::Rejected(reason)) => {
                println!("{reason}");
                continue;
            }
            Err(e) => {
                println!("{e}");
                continue;
            }
        }

        let snapshot = driver.settle()?;
        println!("{}\n", driver.engine().board().display());
        println!("{}", snapshot.phase());

        if snapshot.phase().is_terminal() {
            let snapshot = driver.wait_for_restart()?;
            println!("{}\n", driver.engine().board().display());
            println!("{}", snapshot.phase());
        }
    }

    info!("Leaving play");
    Ok(())
}
