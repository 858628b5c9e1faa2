//! Evaluate command - score a static position.

use game_search::evaluate::position::{square, STARTING_PLACEMENT};
use game_search::evaluate::{
    BoardEvaluation, Color, EvaluationStrategy, Piece, Position, PositionSignal, PIECE_SLOTS,
};
use log::{debug, warn};
use structopt::StructOpt;

use super::Command;

/// Move count of one piece kind, written as `<fen piece>=<count>`, e.g. `N=5`.
#[derive(Debug)]
pub struct MobilityEntry {
    piece: Piece,
    count: i32,
}

fn parse_mobility(s: &str) -> Result<MobilityEntry, String> {
    let (piece, count) = s
        .split_once('=')
        .ok_or_else(|| format!("expected `<piece>=<count>`, found `{}`", s))?;
    let mut chars = piece.chars();
    let piece = match (chars.next(), chars.next()) {
        (Some(c), None) => Piece::from_fen(c).ok_or_else(|| format!("unknown piece `{}`", c))?,
        _ => return Err(format!("expected a single FEN piece letter, found `{}`", piece)),
    };
    let count = count
        .parse()
        .map_err(|err| format!("invalid move count `{}`: {}", count, err))?;
    Ok(MobilityEntry { piece, count })
}

#[derive(StructOpt)]
pub struct EvaluateArgs {
    #[structopt(long = "fen", default_value = STARTING_PLACEMENT)]
    pub position: Position,
    #[structopt(short, long, default_value = "full")]
    pub strategy: EvaluationStrategy,
    #[structopt(long)]
    pub white_castled: bool,
    #[structopt(long)]
    pub black_castled: bool,
    /// White's legal move count minus Black's.
    #[structopt(long, default_value = "0", allow_hyphen_values = true)]
    pub delta: i32,
    #[structopt(long)]
    pub white_in_check: bool,
    #[structopt(long)]
    pub black_in_check: bool,
    #[structopt(long, default_value = "0")]
    pub white_shield: i32,
    #[structopt(long, default_value = "0")]
    pub black_shield: i32,
    /// Moves available per piece kind, e.g. `--mobility N=5 b=7`.
    #[structopt(long, parse(try_from_str = parse_mobility))]
    pub mobility: Vec<MobilityEntry>,
}

impl EvaluateArgs {
    fn signal(&self) -> PositionSignal {
        let mut mobility = [0; PIECE_SLOTS];
        for entry in &self.mobility {
            mobility[entry.piece.slot()] += entry.count;
        }
        PositionSignal::new(0, 0, mobility)
            .with_checks(self.white_in_check, self.black_in_check)
            .with_king_shields(self.white_shield, self.black_shield)
    }
}

impl Command for EvaluateArgs {
    fn execute(self) {
        let evaluation = self.strategy.build();
        let signal = self.signal();
        let white_king = self.position.king_square(Color::White);
        let black_king = self.position.king_square(Color::Black);
        if white_king.is_none() || black_king.is_none() {
            warn!("a king is missing, the score will be decisive");
        }

        debug!("evaluating with {:?}", signal);
        let score = evaluation.score(
            &self.position,
            &self.position.piece_counts(),
            &signal,
            white_king.unwrap_or(square(0, 4)),
            black_king.unwrap_or(square(7, 4)),
            self.white_castled,
            self.black_castled,
            self.delta,
        );

        print!("{}", self.position);
        println!("{} score: {}", evaluation.name(), score);
    }
}
