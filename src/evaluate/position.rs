use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::piece::{Color, Piece, PieceCounts, PieceKind, PIECE_SLOTS};

/// Square index, `rank * 8 + file`. Rank 0 is White's back rank, file 0 is the a-file.
pub type Square = usize;

pub const SQUARE_COUNT: usize = 64;

pub const STARTING_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

#[inline(always)]
pub const fn square(rank: usize, file: usize) -> Square {
    rank * 8 + file
}

#[inline(always)]
pub const fn rank_of(sq: Square) -> usize {
    sq / 8
}

#[inline(always)]
pub const fn file_of(sq: Square) -> usize {
    sq % 8
}

#[derive(Error, Debug, PartialEq)]
pub enum PositionError {
    #[error("expected 8 ranks separated by `/`, found {found}")]
    WrongRankCount { found: usize },
    #[error("rank `{rank}` does not describe exactly 8 files")]
    WrongFileCount { rank: String },
    #[error("unexpected character `{character}` in piece placement")]
    InvalidCharacter { character: char },
}

/// A 64-square board of optional pieces, the representation every evaluation
/// strategy scores.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Position {
    squares: [Option<Piece>; SQUARE_COUNT],
}

impl Default for Position {
    fn default() -> Self {
        Self::empty()
    }
}

impl Position {
    pub fn empty() -> Self {
        Self {
            squares: [None; SQUARE_COUNT],
        }
    }

    pub fn starting_position() -> Self {
        Self::from_placement(STARTING_PLACEMENT).expect("starting placement is well formed")
    }

    /// Parses the piece placement field of a FEN string. Anything after the
    /// first space (turn, castling rights, clocks) is ignored.
    pub fn from_placement(fen: &str) -> Result<Self, PositionError> {
        let placement = fen.split_whitespace().next().unwrap_or("");
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(PositionError::WrongRankCount { found: ranks.len() });
        }

        let mut position = Self::empty();
        for (i, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - i;
            let mut file = 0;
            for c in rank_str.chars() {
                if let Some(empty) = c.to_digit(10) {
                    if empty == 0 || empty > 8 {
                        return Err(PositionError::InvalidCharacter { character: c });
                    }
                    file += empty as usize;
                } else {
                    let piece =
                        Piece::from_fen(c).ok_or(PositionError::InvalidCharacter { character: c })?;
                    if file >= 8 {
                        return Err(PositionError::WrongFileCount {
                            rank: rank_str.to_string(),
                        });
                    }
                    position.put(square(rank, file), piece);
                    file += 1;
                }
            }
            if file != 8 {
                return Err(PositionError::WrongFileCount {
                    rank: rank_str.to_string(),
                });
            }
        }

        Ok(position)
    }

    #[inline(always)]
    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.squares[sq]
    }

    #[inline(always)]
    pub fn put(&mut self, sq: Square, piece: Piece) {
        self.squares[sq] = Some(piece);
    }

    #[inline(always)]
    pub fn remove(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq].take()
    }

    #[inline(always)]
    pub fn is(&self, sq: Square, piece: Piece) -> bool {
        self.squares[sq] == Some(piece)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter_map(|(sq, piece)| piece.map(|p| (sq, p)))
    }

    pub fn piece_counts(&self) -> PieceCounts {
        let mut counts = [0; PIECE_SLOTS];
        for (_, piece) in self.iter() {
            counts[piece.slot()] += 1;
        }
        counts
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        let king = Piece::new(PieceKind::King, color);
        self.iter().find(|&(_, p)| p == king).map(|(sq, _)| sq)
    }

    /// Flips the board vertically and swaps the color of every piece.
    pub fn mirrored(&self) -> Self {
        let mut mirrored = Self::empty();
        for (sq, piece) in self.iter() {
            mirrored.put(mirror_square(sq), piece.flipped());
        }
        mirrored
    }
}

/// Square seen from the other side of the board.
#[inline(always)]
pub const fn mirror_square(sq: Square) -> Square {
    square(7 - rank_of(sq), file_of(sq))
}

impl FromStr for Position {
    type Err = PositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_placement(s)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            let row: String = (0..8)
                .map(|file| self.get(square(rank, file)).map_or('.', |p| p.to_fen()))
                .collect();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n{}", self)
    }
}
