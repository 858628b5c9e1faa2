//! Capability traits the search is written against.
//!
//! The engine never sees a concrete game. A game plugs in by implementing
//! [`GameBoard`] for its state and [`SearchMove`] for its move token; caches,
//! traces and move orderers plug in through the remaining traits.

use std::fmt::Debug;

use crate::evaluate::{Color, Piece, PositionSignal, Square, KING_VALUE};

use super::move_ordering::AttackMap;
use super::state::SearchState;

/// Scores at or beyond this magnitude mean a king was captured somewhere
/// down the line.
pub const DECISIVE_THRESHOLD: i32 = KING_VALUE / 2;

/// The two sides of the game. The first player maximizes the score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    First,
    Second,
}

impl Player {
    pub fn opponent(&self) -> Self {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }

    pub fn is_maximizing(&self) -> bool {
        matches!(self, Player::First)
    }
}

impl From<Color> for Player {
    fn from(color: Color) -> Self {
        match color {
            Color::White => Player::First,
            Color::Black => Player::Second,
        }
    }
}

/// An opaque move token plus the three facts move ordering needs.
pub trait SearchMove: Clone + PartialEq + Debug + Send + Sync {
    fn start(&self) -> Square;
    fn end(&self) -> Square;
    /// The piece removed from `end` by this move, if any.
    fn captured(&self) -> Option<Piece>;
}

/// A two-player game state the search can explore.
///
/// Every worker owns its own clone, so implementations may keep whatever
/// mutable scratch state they need.
pub trait GameBoard: Clone + Send + Sync {
    type Move: SearchMove;

    /// Plays a move without recording it in any game history. Returns `false`
    /// when the move turns out to be illegal in this context; the caller
    /// still calls [`GameBoard::undo_move`] afterwards.
    fn apply_move(&mut self, game_move: &Self::Move) -> bool;

    fn undo_move(&mut self, game_move: &Self::Move);

    /// Legal moves for `player` and the signal describing them.
    fn legal_moves(&mut self, player: Player) -> (Vec<Self::Move>, PositionSignal);

    /// Decides whether the node is a leaf. Returns the leaf score when it is,
    /// typically when the remaining depth is exhausted, no move is available
    /// or `canceled` is set.
    fn terminal_score(
        &mut self,
        player: Player,
        moves: &[Self::Move],
        state: &SearchState<'_>,
        canceled: bool,
    ) -> Option<i32>;

    fn zobrist_key(&self) -> u64;

    /// Hash-relevant flags that the zobrist key does not cover (castling
    /// rights, en passant file and the like).
    fn extra_info(&self) -> u32;

    fn is_move_valid(&self, game_move: &Self::Move) -> bool;

    fn is_decisive(&self, score: i32) -> bool {
        score.abs() >= DECISIVE_THRESHOLD
    }

    fn is_in_check(&self, _player: Player) -> bool {
        false
    }

    fn piece_at(&self, _square: Square) -> Option<Piece> {
        None
    }

    /// Exchange information for the side to move, used for move ordering.
    fn attack_map(&self) -> Option<AttackMap> {
        None
    }
}

/// Shared cache of fully evaluated subtrees. Races between workers are
/// benign: a lost entry only costs a re-search.
pub trait TranspositionCache: Send + Sync {
    /// `depth` and `extensions` are the remaining depth and check-extension
    /// budget of the child; a subtree's score depends on both.
    fn probe(&self, player: Player, key: u64, extra_info: u32, depth: i32, extensions: u8) -> Option<i32>;

    fn record(&self, player: Player, key: u64, extra_info: u32, score: i32, depth: i32, extensions: u8);

    fn reset_hits(&self);

    fn hits(&self) -> u64;
}

/// Fire-and-forget notification of completed search depths.
pub trait SearchTrace: Send + Sync {
    fn depth_completed(&self, depth: u8, player: Player, best_move: &dyn Debug, score: i32);
}

/// Orders moves to improve alpha-beta pruning efficiency.
pub trait MoveOrderer<B: GameBoard>: Clone + Send + Sync {
    /// Sorts moves in-place, placing "better" moves first.
    fn order_moves(&self, moves: &mut [B::Move], board: &B);
}

/// A no-op move orderer for games without move ordering heuristics.
#[derive(Clone, Default, Debug)]
pub struct NoOpMoveOrderer;

impl<B: GameBoard> MoveOrderer<B> for NoOpMoveOrderer {
    #[inline(always)]
    fn order_moves(&self, _moves: &mut [B::Move], _board: &B) {}
}
