//! CLI for the Ivan Prints API server

pub mod serve;

use clap::{Parser, Subcommand};

/// Ivan Prints - print shop business management API
#[derive(Parser)]
#[command(name = "ivan-prints-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the API server
    Serve,
}
