use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "devbyte", version, about = "Offline cache of the DevBytes video playlist")]
pub struct Cli {
    /// Configuration file (TOML, YAML or JSON)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the playlist once and store it in the cache
    Refresh,
    /// Print the cached videos
    List {
        /// Print full descriptions instead of shortened ones
        #[arg(long)]
        full: bool,
    },
    /// Print the cached list every time it changes, until interrupted
    Watch {
        /// Refresh the cache once after subscribing
        #[arg(long)]
        refresh: bool,
    },
}
