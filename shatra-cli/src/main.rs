//! Shatra CLI - Command-line interface
//!
//! Commands:
//! - show: Print the board after replaying moves
//! - moves: List the legal moves of one cell
//! - play: Replay moves and report each outcome
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`.

mod notation;
mod replay_cmd;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use replay_cmd::{MovesArgs, PlayArgs, ShowArgs};

#[derive(Parser)]
#[command(name = "shatra")]
#[command(about = "Shatra rule engine: replay and inspect positions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the board after replaying moves
    Show(ShowArgs),
    /// List the legal moves of one cell
    Moves(MovesArgs),
    /// Replay moves and report each outcome
    Play(PlayArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Show(args) => replay_cmd::run_show(args),
        Commands::Moves(args) => replay_cmd::run_moves(args),
        Commands::Play(args) => replay_cmd::run_play(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use replay_cmd::Side;

    #[test]
    fn test_parse_show() {
        let cli = Cli::try_parse_from(["shatra", "show", "--perspective", "black"]).unwrap();
        match cli.command {
            Commands::Show(args) => {
                assert_eq!(args.perspective, Side::Black);
                assert!(args.replay.moves.is_empty());
            }
            _ => panic!("expected show"),
        }
    }

    #[test]
    fn test_parse_moves() {
        let cli = Cli::try_parse_from(["shatra", "moves", "--cell", "42", "--moves", "53-32", "--json"]).unwrap();
        match cli.command {
            Commands::Moves(args) => {
                assert_eq!(args.cell, 42);
                assert_eq!(args.replay.moves, "53-32");
                assert!(args.json);
            }
            _ => panic!("expected moves"),
        }
    }

    #[test]
    fn test_parse_rejects_bad_cell() {
        assert!(Cli::try_parse_from(["shatra", "moves", "--cell", "999"]).is_err());
        assert!(Cli::try_parse_from(["shatra", "moves"]).is_err());
    }
}
