use anyhow::Result;
use colored::Colorize;

use tournois_tt::cli::Command;
use tournois_tt::{
    handle_build, handle_completions, handle_feed, handle_ingest, handle_map, handle_serve,
    interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("{} {e:#}", "Error:".red().bold());
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Serve { port } => handle_serve(*port),
        Command::Ingest => handle_ingest(),
        Command::Map { output } => handle_map(output.as_ref()),
        Command::Feed => handle_feed(),
        Command::Build => handle_build(),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
