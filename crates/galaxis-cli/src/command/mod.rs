use std::path::PathBuf;

use clap::{Parser, Subcommand};

use self::{play::PlayArg, reset::ResetArg, stats::StatsArg};

mod play;
mod reset;
mod stats;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play in the terminal (default)
    Play(#[clap(flatten)] PlayArg),
    /// Show high score, achievements and lifetime statistics
    Stats(#[clap(flatten)] StatsArg),
    /// Erase all saved progress
    Reset(#[clap(flatten)] ResetArg),
}

const DEFAULT_STORE_PATH: &str = "./data/galaxis-progress.json";

/// Location of the progress file, shared by every subcommand.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct StoreArg {
    /// Path of the JSON file holding saved progress
    #[clap(long = "store", default_value = DEFAULT_STORE_PATH)]
    path: PathBuf,
}

impl Default for StoreArg {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_STORE_PATH),
        }
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Stats(arg) => stats::run(&arg)?,
        Mode::Reset(arg) => reset::run(&arg)?,
    }
    Ok(())
}
