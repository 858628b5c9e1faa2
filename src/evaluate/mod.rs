//! Static evaluation of chess-like positions.
//!
//! A strategy turns a [`Position`], its piece counts and the
//! [`PositionSignal`] of the last generated move list into a single score.
//! Positive scores favor White, negative scores favor Black. Losing a king
//! costs [`KING_VALUE`], which pushes the score into the decisive range the
//! search treats specially.
//!
//! Three strategies ship with the crate and are selected at runtime through
//! [`EvaluationStrategy`]:
//!
//! * `positional`: material, castling, net mobility and king-relative advancement.
//! * `full`: everything `positional` does plus checks, pawn structure, king
//!   safety and the bishop pair.
//! * `mobility`: material plus per-piece mobility weights.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub mod piece;
pub mod piece_values;
pub mod position;
pub mod signal;
pub mod strategies;
pub mod terms;

pub use piece::{Color, Piece, PieceCounts, PieceKind, PIECE_SLOTS};
pub use piece_values::{PieceValues, KING_VALUE};
pub use position::{Position, PositionError, Square};
pub use signal::PositionSignal;
pub use strategies::{FullEvaluation, MobilityEvaluation, PositionalEvaluation};

/// A pure scoring function over a position. Implementations hold only
/// immutable tables and may be shared freely between search workers.
pub trait BoardEvaluation: Send + Sync {
    fn name(&self) -> &'static str;

    /// Scores the position from White's point of view.
    ///
    /// `move_count_delta` is the mover's legal move count minus the
    /// opponent's, already signed towards White.
    #[allow(clippy::too_many_arguments)]
    fn score(
        &self,
        position: &Position,
        piece_counts: &PieceCounts,
        signal: &PositionSignal,
        white_king: Square,
        black_king: Square,
        white_castled: bool,
        black_castled: bool,
        move_count_delta: i32,
    ) -> i32;
}

#[derive(Error, Debug, PartialEq)]
#[error("unknown evaluation strategy `{0}`, expected one of: positional, full, mobility")]
pub struct UnknownStrategy(pub String);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EvaluationStrategy {
    Positional,
    Full,
    Mobility,
}

impl Default for EvaluationStrategy {
    fn default() -> Self {
        EvaluationStrategy::Full
    }
}

impl EvaluationStrategy {
    pub const ALL: [EvaluationStrategy; 3] = [
        EvaluationStrategy::Positional,
        EvaluationStrategy::Full,
        EvaluationStrategy::Mobility,
    ];

    pub fn build(&self) -> Box<dyn BoardEvaluation> {
        match self {
            EvaluationStrategy::Positional => Box::new(PositionalEvaluation::new()),
            EvaluationStrategy::Full => Box::new(FullEvaluation::new()),
            EvaluationStrategy::Mobility => Box::new(MobilityEvaluation::new()),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EvaluationStrategy::Positional => "positional",
            EvaluationStrategy::Full => "full",
            EvaluationStrategy::Mobility => "mobility",
        }
    }
}

impl fmt::Display for EvaluationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for EvaluationStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|strategy| strategy.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownStrategy(s.to_string()))
    }
}
