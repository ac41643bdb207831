// crates/gbtx-cli/src/main.rs

use clap::{Parser, Subcommand};

mod cmd;
mod io;

#[derive(Parser)]
#[command(name = "gbtx-cli")]
#[command(about = "GBTX memory-monitor decoder and pattern verifier", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decode a memory-monitor dump into per-channel CSV
    Parse(cmd::parse::ParseArgs),

    /// Compare a dump against a fixed/cyclic reference pattern (match statistics)
    Verify(cmd::verify::VerifyArgs),

    /// Per-position bit-rotation distances vs the reference (plot-ready CSV)
    Shifts(cmd::shifts::ShiftsArgs),

    /// Generate a reference sequence as CSV or as a synthetic hex dump
    Gen(cmd::generate::GenArgs),
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Parse(args) => cmd::parse::run(args),
        Commands::Verify(args) => cmd::verify::run(args),
        Commands::Shifts(args) => cmd::shifts::run(args),
        Commands::Gen(args) => cmd::generate::run(args),
    }
}
