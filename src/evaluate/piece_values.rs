use super::piece::{Color, Piece, PieceCounts, PieceKind, PIECE_SLOTS};

/// Value of a king. Large enough that losing it outweighs any combination of
/// other material, so a missing king reads as a decisive score.
pub const KING_VALUE: i32 = 1_000_000;

pub const PAWN_VALUE: i32 = 100;
pub const KNIGHT_VALUE: i32 = 300;
pub const BISHOP_VALUE: i32 = 325;
pub const ROOK_VALUE: i32 = 500;
pub const QUEEN_VALUE: i32 = 900;

/// Per-slot piece values, built once and never mutated.
///
/// White slots hold positive values; black slots hold either negated values
/// (for material scoring) or the same values (for exchange arithmetic).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PieceValues {
    table: [i32; PIECE_SLOTS],
}

impl Default for PieceValues {
    fn default() -> Self {
        Self::signed(QUEEN_VALUE)
    }
}

impl PieceValues {
    /// Material table: positive for White, negative for Black.
    pub fn signed(queen_value: i32) -> Self {
        Self::build(queen_value, -1)
    }

    /// Exchange table: the same magnitude for both colors.
    pub fn unsigned(queen_value: i32) -> Self {
        Self::build(queen_value, 1)
    }

    fn build(queen_value: i32, black_sign: i32) -> Self {
        let mut table = [0; PIECE_SLOTS];
        for &kind in &PieceKind::ALL {
            let value = match kind {
                PieceKind::Pawn => PAWN_VALUE,
                PieceKind::Knight => KNIGHT_VALUE,
                PieceKind::Bishop => BISHOP_VALUE,
                PieceKind::Rook => ROOK_VALUE,
                PieceKind::Queen => queen_value,
                PieceKind::King => KING_VALUE,
            };
            table[Piece::new(kind, Color::White).slot()] = value;
            table[Piece::new(kind, Color::Black).slot()] = value * black_sign;
        }
        Self { table }
    }

    #[inline(always)]
    pub fn value(&self, piece: Piece) -> i32 {
        self.table[piece.slot()]
    }

    #[inline(always)]
    pub fn slot_value(&self, slot: usize) -> i32 {
        self.table[slot]
    }

    /// Sum of value times count over every slot.
    pub fn material(&self, counts: &PieceCounts) -> i32 {
        self.table
            .iter()
            .zip(counts.iter())
            .map(|(&value, &count)| value * count as i32)
            .sum()
    }

    /// Sum of absolute values of all pieces on the board, kings excluded.
    pub fn non_king_material(&self, counts: &PieceCounts) -> i32 {
        let total: i64 = self
            .table
            .iter()
            .zip(counts.iter())
            .map(|(&value, &count)| value.abs() as i64 * count as i64)
            .sum();
        let kings = counts[Piece::white(PieceKind::King).slot()] as i64
            + counts[Piece::black(PieceKind::King).slot()] as i64;
        (total - kings * KING_VALUE as i64) as i32
    }
}
