use crate::evaluate::piece::PieceCounts;
use crate::evaluate::piece_values::PieceValues;
use crate::evaluate::position::{Position, Square};
use crate::evaluate::signal::PositionSignal;
use crate::evaluate::terms;
use crate::evaluate::BoardEvaluation;

const QUEEN_VALUE: i32 = 950;
const PIECE_ADVANCEMENT_WEIGHT: i32 = 3;
const MIDDLE_GAME_KING_WEIGHT: i32 = 35;

/// Expensive evaluation combining every heuristic family: material,
/// king-relative advancement, pawn structure, king safety and checks.
#[derive(Clone, Debug)]
pub struct FullEvaluation {
    values: PieceValues,
}

impl Default for FullEvaluation {
    fn default() -> Self {
        Self {
            values: PieceValues::signed(QUEEN_VALUE),
        }
    }
}

impl FullEvaluation {
    pub fn new() -> Self {
        Self::default()
    }

    fn pawn_structure(&self, position: &Position) -> i32 {
        terms::doubled_pawns(position)
            + terms::connected_pawns(position)
            + terms::defended_pawns(position)
            + terms::passed_pawns(position)
    }
}

impl BoardEvaluation for FullEvaluation {
    fn name(&self) -> &'static str {
        "full"
    }

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
    ) -> i32 {
        let king_weight = terms::endgame_weight(&self.values, piece_counts, MIDDLE_GAME_KING_WEIGHT);

        terms::material(&self.values, piece_counts)
            + terms::opening_pawn(position)
            + terms::castling(white_castled, black_castled)
            + move_count_delta
            + terms::checks(signal)
            + terms::king_relative_advancement(
                position,
                white_king,
                black_king,
                PIECE_ADVANCEMENT_WEIGHT,
                king_weight,
            )
            + self.pawn_structure(position)
            + terms::king_shield(signal)
            + terms::bishop_pair(piece_counts)
            + terms::pawn_mobility(signal)
    }
}
