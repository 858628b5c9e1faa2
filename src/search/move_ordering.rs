//! Capture-exchange move ordering.
//!
//! Moves are ranked by a single exchange key:
//!
//! `key = value(captured) + rescue(start) - risk(end)`
//!
//! * `rescue` credits moving a piece away from a square where it would be
//!   lost: the whole piece when the square's exchange balance is negative,
//!   otherwise the difference to a cheaper attacker.
//! * `risk` debits landing on a square where the piece can be taken: the
//!   whole piece when the balance there is not positive, otherwise the
//!   difference to a cheaper attacker.
//!
//! Higher keys go first, equal keys fall back to the landing square's
//! balance, and fully equal moves keep their relative order.

use std::cmp::Reverse;

use crate::evaluate::piece_values::QUEEN_VALUE;
use crate::evaluate::{Piece, PieceValues, Square};

use super::traits::{GameBoard, MoveOrderer, SearchMove};

/// Per-square exchange information for the side to move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttackMap {
    /// Net material the side to move ends up with after the capture
    /// sequence on each square. Negative means a piece there is lost.
    pub exchange_balance: Vec<i32>,
    /// Cheapest enemy piece attacking each square.
    pub weakest_attacker: Vec<Option<Piece>>,
}

impl AttackMap {
    pub fn new(square_count: usize) -> Self {
        Self {
            exchange_balance: vec![0; square_count],
            weakest_attacker: vec![None; square_count],
        }
    }

    #[inline(always)]
    pub fn balance(&self, square: Square) -> i32 {
        self.exchange_balance.get(square).copied().unwrap_or(0)
    }

    #[inline(always)]
    pub fn weakest_attacker(&self, square: Square) -> Option<Piece> {
        self.weakest_attacker.get(square).copied().flatten()
    }
}

#[derive(Clone, Debug)]
pub struct ExchangeOrderer {
    values: PieceValues,
}

impl Default for ExchangeOrderer {
    fn default() -> Self {
        Self {
            values: PieceValues::unsigned(QUEEN_VALUE),
        }
    }
}

impl ExchangeOrderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exchange key of a move whose moving piece is `mover`.
    pub fn exchange_key<M: SearchMove>(&self, game_move: &M, mover: Option<Piece>, map: &AttackMap) -> i32 {
        let captured = game_move.captured().map_or(0, |piece| self.values.value(piece));
        let mover = mover.map_or(0, |piece| self.values.value(piece));

        let rescue = if map.balance(game_move.start()) < 0 {
            mover
        } else {
            self.cheaper_attacker_gain(mover, map.weakest_attacker(game_move.start()))
        };
        let risk = if map.balance(game_move.end()) <= 0 {
            mover
        } else {
            self.cheaper_attacker_gain(mover, map.weakest_attacker(game_move.end()))
        };

        captured + rescue - risk
    }

    fn cheaper_attacker_gain(&self, mover: i32, attacker: Option<Piece>) -> i32 {
        match attacker.map(|piece| self.values.value(piece)) {
            Some(attacker) if attacker < mover => mover - attacker,
            _ => 0,
        }
    }

    /// Stable sort of `moves`, best exchange first.
    pub fn sort_moves<M, F>(&self, moves: &mut [M], map: &AttackMap, piece_at: F)
    where
        M: SearchMove,
        F: Fn(Square) -> Option<Piece>,
    {
        moves.sort_by_cached_key(|game_move| {
            let key = self.exchange_key(game_move, piece_at(game_move.start()), map);
            (Reverse(key), Reverse(map.balance(game_move.end())))
        });
    }
}

impl<B: GameBoard> MoveOrderer<B> for ExchangeOrderer {
    fn order_moves(&self, moves: &mut [B::Move], board: &B) {
        if let Some(map) = board.attack_map() {
            self.sort_moves(moves, &map, |square| board.piece_at(square));
        }
    }
}
