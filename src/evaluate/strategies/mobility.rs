use crate::evaluate::piece::{Color, Piece, PieceCounts, PieceKind, PIECE_SLOTS};
use crate::evaluate::piece_values::{PieceValues, QUEEN_VALUE};
use crate::evaluate::position::{Position, Square};
use crate::evaluate::signal::PositionSignal;
use crate::evaluate::terms;
use crate::evaluate::BoardEvaluation;

/// Evaluation driven by how many moves each piece has available, on top of
/// material and basic pawn structure.
#[derive(Clone, Debug)]
pub struct MobilityEvaluation {
    values: PieceValues,
    mobility_weights: [i32; PIECE_SLOTS],
}

impl Default for MobilityEvaluation {
    fn default() -> Self {
        Self {
            values: PieceValues::signed(QUEEN_VALUE),
            mobility_weights: mobility_weights(),
        }
    }
}

fn mobility_weights() -> [i32; PIECE_SLOTS] {
    let mut weights = [0; PIECE_SLOTS];
    for &kind in &PieceKind::ALL {
        let weight = match kind {
            PieceKind::Pawn => 1,
            PieceKind::Knight => 8,
            PieceKind::Bishop => 5,
            PieceKind::Rook => 3,
            PieceKind::Queen => 3,
            PieceKind::King => 0,
        };
        weights[Piece::new(kind, Color::White).slot()] = weight;
        weights[Piece::new(kind, Color::Black).slot()] = -weight;
    }
    weights
}

impl MobilityEvaluation {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BoardEvaluation for MobilityEvaluation {
    fn name(&self) -> &'static str {
        "mobility"
    }

    fn score(
        &self,
        position: &Position,
        piece_counts: &PieceCounts,
        signal: &PositionSignal,
        _white_king: Square,
        _black_king: Square,
        white_castled: bool,
        black_castled: bool,
        move_count_delta: i32,
    ) -> i32 {
        terms::material(&self.values, piece_counts)
            + terms::opening_pawn(position)
            + terms::castling(white_castled, black_castled)
            + move_count_delta
            + terms::checks(signal)
            + terms::weighted_mobility(signal, &self.mobility_weights)
            + terms::doubled_pawns(position)
            + terms::connected_pawns(position)
            + terms::king_shield(signal)
            + terms::bishop_pair(piece_counts)
    }
}
