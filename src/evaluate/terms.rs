//! Heuristic terms shared by the evaluation strategies.
//!
//! Every term is a pure function of its inputs and returns points from
//! White's point of view. Strategies decide which terms they add up.

use super::piece::{Color, Piece, PieceCounts, PieceKind, PIECE_SLOTS};
use super::piece_values::PieceValues;
use super::position::{file_of, rank_of, square, Position, Square};
use super::signal::PositionSignal;

pub const OPENING_PAWN_PENALTY: i32 = 4;
pub const CASTLE_BONUS: i32 = 50;
pub const CHECK_PENALTY: i32 = 15;
pub const ENDGAME_MATERIAL_THRESHOLD: i32 = 1000;
pub const ENDGAME_KING_WEIGHT: i32 = -15;
pub const DOUBLED_PAWN_PENALTY: i32 = 13;
pub const CONNECTED_PAWN_BONUS: i32 = 10;
pub const DEFENDED_PAWN_BONUS: i32 = 17;
pub const PASSED_PAWN_BONUS: i32 = 55;
pub const PASSED_PAWN_RANK_BONUS: i32 = 20;
pub const BISHOP_PAIR_BONUS: i32 = 30;
pub const KING_SHIELD_BONUS: i32 = 33;

const WHITE_PAWN: Piece = Piece::white(PieceKind::Pawn);
const BLACK_PAWN: Piece = Piece::black(PieceKind::Pawn);

/// Pawns per file, `[white, black]`.
type PawnFiles = [[i32; 2]; 8];

pub fn material(values: &PieceValues, counts: &PieceCounts) -> i32 {
    values.material(counts)
}

/// Small tie-break that nudges both sides into moving their king's pawn.
pub fn opening_pawn(position: &Position) -> i32 {
    let mut points = 0;
    if position.is(square(1, 4), WHITE_PAWN) {
        points -= OPENING_PAWN_PENALTY;
    }
    if position.is(square(6, 4), BLACK_PAWN) {
        points += OPENING_PAWN_PENALTY;
    }
    points
}

pub fn castling(white_castled: bool, black_castled: bool) -> i32 {
    let mut points = 0;
    if white_castled {
        points += CASTLE_BONUS;
    }
    if black_castled {
        points -= CASTLE_BONUS;
    }
    points
}

pub fn checks(signal: &PositionSignal) -> i32 {
    let mut points = 0;
    if signal.white_in_check {
        points -= CHECK_PENALTY;
    }
    if signal.black_in_check {
        points += CHECK_PENALTY;
    }
    points
}

/// King weight for the advancement term: the middle-game weight, or a
/// negative weight that pulls the kings forward once little material is left.
pub fn endgame_weight(values: &PieceValues, counts: &PieceCounts, middle_game_weight: i32) -> i32 {
    if values.non_king_material(counts) < ENDGAME_MATERIAL_THRESHOLD {
        ENDGAME_KING_WEIGHT
    } else {
        middle_game_weight
    }
}

/// Rank advancement measured relative to the owner's king: while the king
/// stays on the lower half of the board ranks count upwards, otherwise they
/// count downwards.
#[inline(always)]
fn advancement(sq: Square, king: Square) -> i32 {
    let rank = rank_of(sq) as i32;
    if king < 32 {
        rank
    } else {
        7 - rank
    }
}

pub fn king_relative_advancement(
    position: &Position,
    white_king: Square,
    black_king: Square,
    piece_weight: i32,
    king_weight: i32,
) -> i32 {
    let mut points = 0;
    for (sq, piece) in position.iter() {
        match piece.color {
            Color::White => {
                let pos = advancement(sq, white_king);
                if piece.kind == PieceKind::King {
                    points -= pos * king_weight;
                } else {
                    points += pos * piece_weight;
                }
            }
            Color::Black => {
                let pos = advancement(sq, black_king);
                if piece.kind == PieceKind::King {
                    points += pos * king_weight;
                } else {
                    points -= pos * piece_weight;
                }
            }
        }
    }
    points
}

fn pawn_files(position: &Position) -> PawnFiles {
    let mut files = [[0; 2]; 8];
    for (sq, piece) in position.iter() {
        if piece.kind == PieceKind::Pawn {
            let side = match piece.color {
                Color::White => 0,
                Color::Black => 1,
            };
            files[file_of(sq)][side] += 1;
        }
    }
    files
}

/// Doubled pawn penalty, quadratic in the number of pawns sharing a file.
pub fn doubled_pawns(position: &Position) -> i32 {
    pawn_files(position)
        .iter()
        .map(|[white, black]| {
            -DOUBLED_PAWN_PENALTY * white * (white - 1) + DOUBLED_PAWN_PENALTY * black * (black - 1)
        })
        .sum()
}

/// Bonus for each pair of neighbouring files that both hold pawns of one side.
pub fn connected_pawns(position: &Position) -> i32 {
    let files = pawn_files(position);
    let mut points = 0;
    for pair in files.windows(2) {
        if pair[0][0] > 0 && pair[1][0] > 0 {
            points += CONNECTED_PAWN_BONUS;
        }
        if pair[0][1] > 0 && pair[1][1] > 0 {
            points -= CONNECTED_PAWN_BONUS;
        }
    }
    points
}

/// Bonus for every pawn protected by a friendly pawn diagonally behind it.
pub fn defended_pawns(position: &Position) -> i32 {
    let mut points = 0;
    for (sq, piece) in position.iter() {
        let (behind, sign) = match piece {
            WHITE_PAWN if rank_of(sq) > 0 => (rank_of(sq) - 1, 1),
            BLACK_PAWN if rank_of(sq) < 7 => (rank_of(sq) + 1, -1),
            _ => continue,
        };
        let file = file_of(sq);
        let defenders = [file.checked_sub(1), Some(file + 1).filter(|&f| f < 8)]
            .iter()
            .flatten()
            .filter(|&&f| position.is(square(behind, f), piece))
            .count() as i32;
        points += sign * defenders * DEFENDED_PAWN_BONUS;
    }
    points
}

/// Bonus for pawns with no enemy pawn ahead on their own or adjacent files,
/// growing with how far the pawn has advanced.
pub fn passed_pawns(position: &Position) -> i32 {
    let files = pawn_files(position);
    let mut points = 0;
    for file in 0..8usize {
        let neighbours = file.saturating_sub(1)..=(file + 1).min(7);
        let white_blocked = neighbours.clone().any(|f| files[f][1] > 0);
        let black_blocked = neighbours.into_iter().any(|f| files[f][0] > 0);

        if files[file][0] > 0 && !white_blocked {
            points += PASSED_PAWN_BONUS;
            for rank in 0..8 {
                if position.is(square(rank, file), WHITE_PAWN) {
                    points += PASSED_PAWN_RANK_BONUS * rank as i32;
                }
            }
        }
        if files[file][1] > 0 && !black_blocked {
            points -= PASSED_PAWN_BONUS;
            for rank in 0..8 {
                if position.is(square(rank, file), BLACK_PAWN) {
                    points -= PASSED_PAWN_RANK_BONUS * (7 - rank as i32);
                }
            }
        }
    }
    points
}

pub fn bishop_pair(counts: &PieceCounts) -> i32 {
    let mut points = 0;
    if counts[Piece::white(PieceKind::Bishop).slot()] >= 2 {
        points += BISHOP_PAIR_BONUS;
    }
    if counts[Piece::black(PieceKind::Bishop).slot()] >= 2 {
        points -= BISHOP_PAIR_BONUS;
    }
    points
}

pub fn king_shield(signal: &PositionSignal) -> i32 {
    KING_SHIELD_BONUS * (signal.white_king_shield - signal.black_king_shield)
}

/// Mobility weighted per piece slot; `weights` carries the sign of each color.
pub fn weighted_mobility(signal: &PositionSignal, weights: &[i32; PIECE_SLOTS]) -> i32 {
    weights
        .iter()
        .zip(signal.mobility.iter())
        .map(|(w, m)| w * m)
        .sum()
}

/// Pawn pushes are cheap moves; discount them from each side's mobility.
pub fn pawn_mobility(signal: &PositionSignal) -> i32 {
    signal.mobility[BLACK_PAWN.slot()] - signal.mobility[WHITE_PAWN.slot()]
}
