use super::piece::{mirrored_slot, PIECE_SLOTS};

/// Attack, defense and mobility counts for one generated move list.
///
/// The move generator produces a snapshot once per ply; evaluation and move
/// ordering only read it. Color-independent counts are signed from the
/// mover's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PositionSignal {
    /// Number of enemy pieces attacked by the mover's pieces.
    pub pieces_attacked: i32,
    /// Number of the mover's pieces that are defended.
    pub pieces_defending: i32,
    /// Available moves for each piece slot.
    pub mobility: [i32; PIECE_SLOTS],
    pub white_in_check: bool,
    pub black_in_check: bool,
    /// Pawn cover around the white king.
    pub white_king_shield: i32,
    /// Pawn cover around the black king.
    pub black_king_shield: i32,
}

impl Default for PositionSignal {
    fn default() -> Self {
        Self::NULL
    }
}

impl PositionSignal {
    /// The "no information" snapshot, used for the side whose moves were not generated.
    pub const NULL: PositionSignal = PositionSignal {
        pieces_attacked: 0,
        pieces_defending: 0,
        mobility: [0; PIECE_SLOTS],
        white_in_check: false,
        black_in_check: false,
        white_king_shield: 0,
        black_king_shield: 0,
    };

    pub fn new(pieces_attacked: i32, pieces_defending: i32, mobility: [i32; PIECE_SLOTS]) -> Self {
        Self {
            pieces_attacked,
            pieces_defending,
            mobility,
            ..Self::NULL
        }
    }

    pub fn with_checks(mut self, white_in_check: bool, black_in_check: bool) -> Self {
        self.white_in_check = white_in_check;
        self.black_in_check = black_in_check;
        self
    }

    pub fn with_king_shields(mut self, white: i32, black: i32) -> Self {
        self.white_king_shield = white;
        self.black_king_shield = black;
        self
    }

    pub fn is_null(&self) -> bool {
        *self == Self::NULL
    }

    /// The same snapshot as seen after swapping the colors of every piece.
    pub fn mirrored(&self) -> Self {
        let mut mobility = [0; PIECE_SLOTS];
        for (slot, &count) in self.mobility.iter().enumerate() {
            mobility[mirrored_slot(slot)] = count;
        }
        Self {
            pieces_attacked: self.pieces_attacked,
            pieces_defending: self.pieces_defending,
            mobility,
            white_in_check: self.black_in_check,
            black_in_check: self.white_in_check,
            white_king_shield: self.black_king_shield,
            black_king_shield: self.white_king_shield,
        }
    }
}
