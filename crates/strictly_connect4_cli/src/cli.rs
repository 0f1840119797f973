//! Command-line interface for the connect4 driver.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Connect4 - headless frame-driven connect-four engine driver
#[derive(Parser, Debug)]
#[command(name = "connect4")]
#[command(about = "Drive the connect-four engine frame by frame", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to engine configuration (TOML). Classic rules if missing.
    #[arg(short, long, global = true, default_value = "connect4.toml")]
    pub config: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Frame timing shared by the commands that run the engine.
#[derive(clap::Args, Debug, Clone, Copy)]
pub struct FrameArgs {
    /// Simulated frame length in milliseconds
    #[arg(long, default_value = "16")]
    pub frame_ms: u64,

    /// Frames a falling piece spends passing each row
    #[arg(long, default_value = "3")]
    pub frames_per_row: u32,

    /// Safety cap on simulated frames
    #[arg(long, default_value = "1000000")]
    pub max_frames: u64,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a scripted sequence of columns, alternating players from A
    Simulate {
        /// Columns to drop into, comma separated (e.g. 3,0,3,0,3,0,3)
        #[arg(short, long, value_delimiter = ',', required = true)]
        moves: Vec<usize>,

        /// Keep ticking after the game ends until the automatic restart
        #[arg(long)]
        until_restart: bool,

        /// Print the final snapshot and board as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        frames: FrameArgs,
    },

    /// Read one column per line from stdin (`q` quits)
    Play {
        #[command(flatten)]
        frames: FrameArgs,
    },

    /// Print the effective configuration as TOML
    Config,
}
