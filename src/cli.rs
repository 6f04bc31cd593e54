use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "FFTT tournament map and feed builder")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Start the local tournament API
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
    /// Fetch tournaments from the federation API into the cache
    Ingest,
    /// Build the map datasets from cached tournaments
    Map {
        /// Output file (defaults to <OUTPUT_DIR>/map-data.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Generate tournament pages, RSS feed and sitemap from cached tournaments
    Feed,
    /// Ingest, then build the map and the feed
    Build,
    /// Print shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}
