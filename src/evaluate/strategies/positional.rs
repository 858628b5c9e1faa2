use crate::evaluate::piece::PieceCounts;
use crate::evaluate::piece_values::{PieceValues, QUEEN_VALUE};
use crate::evaluate::position::{Position, Square};
use crate::evaluate::signal::PositionSignal;
use crate::evaluate::terms;
use crate::evaluate::BoardEvaluation;

const PIECE_ADVANCEMENT_WEIGHT: i32 = 5;
const MIDDLE_GAME_KING_WEIGHT: i32 = 55;

/// Cheap evaluation: material, castling, net mobility and king-relative
/// piece advancement.
#[derive(Clone, Debug)]
pub struct PositionalEvaluation {
    values: PieceValues,
}

impl Default for PositionalEvaluation {
    fn default() -> Self {
        Self {
            values: PieceValues::signed(QUEEN_VALUE),
        }
    }
}

impl PositionalEvaluation {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BoardEvaluation for PositionalEvaluation {
    fn name(&self) -> &'static str {
        "positional"
    }

    fn score(
        &self,
        position: &Position,
        piece_counts: &PieceCounts,
        _signal: &PositionSignal,
        white_king: Square,
        black_king: Square,
        white_castled: bool,
        black_castled: bool,
        move_count_delta: i32,
    ) -> i32 {
        let king_weight = terms::endgame_weight(&self.values, piece_counts, MIDDLE_GAME_KING_WEIGHT);

        terms::material(&self.values, piece_counts)
            + terms::opening_pawn(position)
            + terms::castling(white_castled, black_castled)
            + move_count_delta
            + terms::king_relative_advancement(
                position,
                white_king,
                black_king,
                PIECE_ADVANCEMENT_WEIGHT,
                king_weight,
            )
    }
}
