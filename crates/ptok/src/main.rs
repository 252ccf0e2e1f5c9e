//! # `ptok` Command Line Tool
//!
//! Train, encode and decode with `pairtok` vocabularies.
mod commands;
mod config;
mod input_output;
mod logging;

use clap::Parser;

use crate::commands::Commands;

/// Byte-pair tokenizer command line tool.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Subcommand to run.
    #[clap(subcommand)]
    pub command: Commands,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    args.command.run()
}
