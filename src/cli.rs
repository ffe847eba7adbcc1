//! Command line interface definition

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "chess_trainer")]
#[command(about = "Step through openings, solve puzzles, save games", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Debug-level logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the built-in openings and puzzles
    List,

    /// Step through an opening line
    Replay {
        /// Opening id (see `list`)
        opening_id: u32,

        /// Number of moves to step (default: the whole line)
        #[arg(long)]
        steps: Option<usize>,
    },

    /// Attempt a puzzle with the given moves
    Puzzle {
        /// Puzzle id (see `list`)
        puzzle_id: u32,

        /// Moves as SAN (`Nf3`) or coordinates (`g1f3`, `e7e8q`)
        moves: Vec<String>,
    },

    /// Play moves freely and print the game as PGN
    Play {
        /// Moves as SAN (`Nf3`) or coordinates (`g1f3`, `e7e8q`)
        moves: Vec<String>,
    },

    /// Check backend connectivity
    Health {
        /// Keep probing at the configured interval and print every result
        #[arg(long)]
        watch: bool,
    },

    /// Validate a move list and save it to the backend
    Save {
        /// Game title (default: "Game (N moves)")
        #[arg(long)]
        title: Option<String>,

        /// Moves as SAN or coordinates
        moves: Vec<String>,
    },

    /// List games saved on the backend
    Games,
}
