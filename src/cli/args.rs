//! CLI argument parsing using StructOpt.

use structopt::StructOpt;

use crate::cli::commands::{evaluate::EvaluateArgs, strategies::StrategiesArgs};

#[derive(StructOpt)]
#[structopt(
    name = "game-search",
    about = "Alpha-beta game-tree search with pluggable chess evaluation strategies"
)]
pub enum GameSearch {
    #[structopt(
        name = "evaluate",
        about = "Score a piece placement, provided in FEN notation with `--fen` (default: starting position), using the evaluation `--strategy` (default: full). Castling, move count and move-list signal flags describe what the static placement cannot."
    )]
    Evaluate(EvaluateArgs),
    #[structopt(
        name = "strategies",
        about = "List the available evaluation strategies."
    )]
    Strategies(StrategiesArgs),
}

impl crate::cli::commands::Command for GameSearch {
    fn execute(self) {
        match self {
            Self::Evaluate(cmd) => cmd.execute(),
            Self::Strategies(cmd) => cmd.execute(),
        }
    }
}
