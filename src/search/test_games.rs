//! Small games used to exercise the search.
//!
//! - [`Nim`]: players take 1-3 objects, whoever takes the last one wins.
//! - [`TreeGame`]: a synthetic tree whose moves commute, so the same
//!   position is reached through many move orders.
//! - [`Skirmish`]: chess pieces without castling, en passant, promotion or
//!   check rules. Kings can be captured, which ends the game.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::evaluate::position::{file_of, rank_of, square};
use crate::evaluate::{
    BoardEvaluation, Color, EvaluationStrategy, Piece, PieceKind, Position, PositionSignal, Square,
    PIECE_SLOTS,
};

use super::move_ordering::AttackMap;
use super::state::SearchState;
use super::traits::{GameBoard, Player, SearchMove};

pub const NIM_WIN: i32 = 1000;

#[derive(Clone, Debug)]
pub struct Nim {
    pub pile: u8,
    taken: Vec<u8>,
}

impl Nim {
    pub fn new(pile: u8) -> Self {
        Self {
            pile,
            taken: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NimMove {
    pub take: u8,
}

impl SearchMove for NimMove {
    fn start(&self) -> Square {
        0
    }

    fn end(&self) -> Square {
        0
    }

    fn captured(&self) -> Option<Piece> {
        None
    }
}

impl GameBoard for Nim {
    type Move = NimMove;

    fn apply_move(&mut self, game_move: &NimMove) -> bool {
        if self.is_move_valid(game_move) {
            self.pile -= game_move.take;
            self.taken.push(game_move.take);
            true
        } else {
            self.taken.push(0);
            false
        }
    }

    fn undo_move(&mut self, _game_move: &NimMove) {
        if let Some(take) = self.taken.pop() {
            self.pile += take;
        }
    }

    fn legal_moves(&mut self, _player: Player) -> (Vec<NimMove>, PositionSignal) {
        let moves = (1..=self.pile.min(3)).map(|take| NimMove { take }).collect();
        (moves, PositionSignal::NULL)
    }

    fn terminal_score(
        &mut self,
        player: Player,
        moves: &[NimMove],
        state: &SearchState<'_>,
        canceled: bool,
    ) -> Option<i32> {
        let sign = if player.is_maximizing() { 1 } else { -1 };
        if moves.is_empty() {
            // the previous player took the last object
            return Some(-sign * NIM_WIN);
        }
        if state.depth() <= 0 || canceled {
            // a multiple of four is lost for the player to move
            let mover_wins = self.pile % 4 != 0;
            return Some(if mover_wins { sign * 100 } else { -sign * 100 });
        }
        None
    }

    fn zobrist_key(&self) -> u64 {
        self.pile as u64
    }

    fn extra_info(&self) -> u32 {
        0
    }

    fn is_move_valid(&self, game_move: &NimMove) -> bool {
        (1..=3).contains(&game_move.take) && game_move.take <= self.pile
    }
}

fn mix(mut value: u64) -> u64 {
    value = value.wrapping_add(0x9e37_79b9_7f4a_7c15);
    value = (value ^ (value >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    value = (value ^ (value >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    value ^ (value >> 31)
}

#[derive(Clone, Debug, PartialEq)]
pub struct TreeMove {
    pub index: usize,
    pub key: u64,
}

impl SearchMove for TreeMove {
    fn start(&self) -> Square {
        self.index
    }

    fn end(&self) -> Square {
        self.index
    }

    fn captured(&self) -> Option<Piece> {
        None
    }
}

/// Every ply offers the same moves. A position is the sum of the keys
/// played so far, and leaves score a hash of that sum.
#[derive(Clone, Debug)]
pub struct TreeGame {
    keys: Arc<Vec<u64>>,
    salt: u64,
    bias: i32,
    sum: u64,
    played: Vec<u64>,
    rejected: Option<u64>,
    leaf_delay: Option<Duration>,
    valid: bool,
}

impl TreeGame {
    pub fn new(keys: Vec<u64>, salt: u64) -> Self {
        Self {
            keys: Arc::new(keys),
            salt,
            bias: 500,
            sum: 0,
            played: Vec::new(),
            rejected: None,
            leaf_delay: None,
            valid: true,
        }
    }

    /// Leaf scores fall in `[bias - 1000, bias]`.
    pub fn with_bias(mut self, bias: i32) -> Self {
        self.bias = bias;
        self
    }

    /// The board refuses to play the move with this key.
    pub fn with_rejected(mut self, key: u64) -> Self {
        self.rejected = Some(key);
        self
    }

    pub fn with_leaf_delay(mut self, delay: Duration) -> Self {
        self.leaf_delay = Some(delay);
        self
    }

    /// Makes [`GameBoard::is_move_valid`] refuse every move.
    pub fn with_invalid_moves(mut self) -> Self {
        self.valid = false;
        self
    }

    pub fn moves(&self) -> Vec<TreeMove> {
        self.keys
            .iter()
            .enumerate()
            .map(|(index, &key)| TreeMove { index, key })
            .collect()
    }

    pub fn leaf_score(&self, sum: u64) -> i32 {
        (mix(sum ^ self.salt) % 1001) as i32 - 1000 + self.bias
    }

    /// Plain minimax without pruning or caching.
    pub fn minimax(&self, player: Player, depth: u32) -> i32 {
        self.minimax_from(self.sum, player, depth)
    }

    /// Minimax value of playing `key` first.
    pub fn minimax_after(&self, key: u64, player: Player, depth: u32) -> i32 {
        if self.rejected == Some(key) {
            return 0;
        }
        self.minimax_from(self.sum.wrapping_add(key), player.opponent(), depth - 1)
    }

    fn minimax_from(&self, sum: u64, player: Player, depth: u32) -> i32 {
        if depth == 0 {
            return self.leaf_score(sum);
        }
        let values = self.keys.iter().map(|&key| {
            if self.rejected == Some(key) {
                0
            } else {
                self.minimax_from(sum.wrapping_add(key), player.opponent(), depth - 1)
            }
        });
        if player.is_maximizing() {
            values.max().unwrap_or(0)
        } else {
            values.min().unwrap_or(0)
        }
    }
}

impl GameBoard for TreeGame {
    type Move = TreeMove;

    fn apply_move(&mut self, game_move: &TreeMove) -> bool {
        if self.rejected == Some(game_move.key) {
            self.played.push(0);
            return false;
        }
        self.sum = self.sum.wrapping_add(game_move.key);
        self.played.push(game_move.key);
        true
    }

    fn undo_move(&mut self, _game_move: &TreeMove) {
        if let Some(key) = self.played.pop() {
            self.sum = self.sum.wrapping_sub(key);
        }
    }

    fn legal_moves(&mut self, _player: Player) -> (Vec<TreeMove>, PositionSignal) {
        (self.moves(), PositionSignal::NULL)
    }

    fn terminal_score(
        &mut self,
        _player: Player,
        moves: &[TreeMove],
        state: &SearchState<'_>,
        canceled: bool,
    ) -> Option<i32> {
        if state.depth() <= 0 || canceled || moves.is_empty() {
            if let Some(delay) = self.leaf_delay {
                thread::sleep(delay);
            }
            Some(self.leaf_score(self.sum))
        } else {
            None
        }
    }

    fn zobrist_key(&self) -> u64 {
        self.sum
    }

    fn extra_info(&self) -> u32 {
        0
    }

    fn is_move_valid(&self, game_move: &TreeMove) -> bool {
        self.valid && self.keys.contains(&game_move.key)
    }
}

const KNIGHT_JUMPS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];
const ORTHOGONAL: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ALL_DIRECTIONS: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

fn offset(sq: Square, rank_delta: i32, file_delta: i32) -> Option<Square> {
    let rank = rank_of(sq) as i32 + rank_delta;
    let file = file_of(sq) as i32 + file_delta;
    if (0..8).contains(&rank) && (0..8).contains(&file) {
        Some(square(rank as usize, file as usize))
    } else {
        None
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SkirmishMove {
    pub from: Square,
    pub to: Square,
    pub captured: Option<Piece>,
}

impl SearchMove for SkirmishMove {
    fn start(&self) -> Square {
        self.from
    }

    fn end(&self) -> Square {
        self.to
    }

    fn captured(&self) -> Option<Piece> {
        self.captured
    }
}

#[derive(Clone)]
pub struct Skirmish {
    position: Position,
    to_move: Color,
    evaluation: Arc<dyn BoardEvaluation>,
    played: Vec<Option<(Piece, Option<Piece>)>>,
}

impl Skirmish {
    pub fn new(placement: &str, to_move: Color) -> Self {
        Self::with_strategy(placement, to_move, EvaluationStrategy::Positional)
    }

    pub fn with_strategy(placement: &str, to_move: Color, strategy: EvaluationStrategy) -> Self {
        Self {
            position: Position::from_placement(placement).expect("test placement is valid"),
            to_move,
            evaluation: Arc::from(strategy.build()),
            played: Vec::new(),
        }
    }

    /// Squares a piece on `sq` attacks, whatever stands there.
    fn attacks(&self, sq: Square, piece: Piece) -> Vec<Square> {
        let mut targets = Vec::new();
        match piece.kind {
            PieceKind::Pawn => {
                let forward = if piece.color == Color::White { 1 } else { -1 };
                targets.extend([-1, 1].iter().filter_map(|&df| offset(sq, forward, df)));
            }
            PieceKind::Knight => {
                targets.extend(KNIGHT_JUMPS.iter().filter_map(|&(dr, df)| offset(sq, dr, df)));
            }
            PieceKind::King => {
                targets.extend(ALL_DIRECTIONS.iter().filter_map(|&(dr, df)| offset(sq, dr, df)));
            }
            PieceKind::Bishop => self.slide(sq, &DIAGONAL, &mut targets),
            PieceKind::Rook => self.slide(sq, &ORTHOGONAL, &mut targets),
            PieceKind::Queen => self.slide(sq, &ALL_DIRECTIONS, &mut targets),
        }
        targets
    }

    fn slide(&self, sq: Square, directions: &[(i32, i32)], targets: &mut Vec<Square>) {
        for &(dr, df) in directions {
            let mut current = sq;
            while let Some(next) = offset(current, dr, df) {
                targets.push(next);
                if self.position.get(next).is_some() {
                    break;
                }
                current = next;
            }
        }
    }

    fn generate(&self, color: Color) -> Vec<SkirmishMove> {
        let mut moves = Vec::new();
        for (from, piece) in self.position.iter().filter(|(_, p)| p.color == color) {
            if piece.kind == PieceKind::Pawn {
                self.pawn_pushes(from, piece, &mut moves);
            }
            for to in self.attacks(from, piece) {
                match self.position.get(to) {
                    Some(target) if target.color == color => {}
                    Some(target) => moves.push(SkirmishMove {
                        from,
                        to,
                        captured: Some(target),
                    }),
                    None if piece.kind != PieceKind::Pawn => moves.push(SkirmishMove {
                        from,
                        to,
                        captured: None,
                    }),
                    None => {}
                }
            }
        }
        moves
    }

    fn pawn_pushes(&self, from: Square, pawn: Piece, moves: &mut Vec<SkirmishMove>) {
        let (forward, start_rank) = match pawn.color {
            Color::White => (1, 1),
            Color::Black => (-1, 6),
        };
        if let Some(one) = offset(from, forward, 0).filter(|&sq| self.position.get(sq).is_none()) {
            moves.push(SkirmishMove {
                from,
                to: one,
                captured: None,
            });
            if rank_of(from) == start_rank {
                if let Some(two) = offset(one, forward, 0).filter(|&sq| self.position.get(sq).is_none()) {
                    moves.push(SkirmishMove {
                        from,
                        to: two,
                        captured: None,
                    });
                }
            }
        }
    }

    fn king_attacked(&self, color: Color) -> bool {
        self.position.king_square(color).map_or(false, |king| {
            self.position
                .iter()
                .filter(|(_, p)| p.color != color)
                .any(|(sq, p)| self.attacks(sq, p).contains(&king))
        })
    }
}

impl GameBoard for Skirmish {
    type Move = SkirmishMove;

    fn apply_move(&mut self, game_move: &SkirmishMove) -> bool {
        match self.position.get(game_move.from) {
            Some(piece) if piece.color == self.to_move => {
                self.position.remove(game_move.from);
                let captured = self.position.remove(game_move.to);
                self.position.put(game_move.to, piece);
                self.played.push(Some((piece, captured)));
                self.to_move = self.to_move.opposite();
                true
            }
            _ => {
                self.played.push(None);
                false
            }
        }
    }

    fn undo_move(&mut self, game_move: &SkirmishMove) {
        if let Some(Some((piece, captured))) = self.played.pop() {
            self.position.remove(game_move.to);
            if let Some(captured) = captured {
                self.position.put(game_move.to, captured);
            }
            self.position.put(game_move.from, piece);
            self.to_move = self.to_move.opposite();
        }
    }

    fn legal_moves(&mut self, player: Player) -> (Vec<SkirmishMove>, PositionSignal) {
        let color = match player {
            Player::First => Color::White,
            Player::Second => Color::Black,
        };
        let moves = self.generate(color);

        let mut mobility = [0; PIECE_SLOTS];
        for game_move in &moves {
            if let Some(piece) = self.position.get(game_move.from) {
                mobility[piece.slot()] += 1;
            }
        }
        let attacked = moves.iter().filter(|m| m.captured.is_some()).count() as i32;
        let signal = PositionSignal::new(attacked, 0, mobility)
            .with_checks(self.king_attacked(Color::White), self.king_attacked(Color::Black));

        (moves, signal)
    }

    fn terminal_score(
        &mut self,
        _player: Player,
        moves: &[SkirmishMove],
        state: &SearchState<'_>,
        canceled: bool,
    ) -> Option<i32> {
        let white_king = self.position.king_square(Color::White);
        let black_king = self.position.king_square(Color::Black);
        let game_over = white_king.is_none() || black_king.is_none() || moves.is_empty();
        if !(game_over || state.depth() <= 0 || canceled) {
            return None;
        }
        Some(self.evaluation.score(
            &self.position,
            &self.position.piece_counts(),
            state.signal(),
            white_king.unwrap_or(square(0, 4)),
            black_king.unwrap_or(square(7, 4)),
            false,
            false,
            0,
        ))
    }

    fn zobrist_key(&self) -> u64 {
        let pieces = self
            .position
            .iter()
            .fold(0, |hash, (sq, piece)| hash ^ mix((sq * PIECE_SLOTS + piece.slot()) as u64));
        match self.to_move {
            Color::White => pieces,
            Color::Black => !pieces,
        }
    }

    fn extra_info(&self) -> u32 {
        0
    }

    fn is_move_valid(&self, game_move: &SkirmishMove) -> bool {
        self.generate(self.to_move).contains(game_move)
    }

    fn is_in_check(&self, player: Player) -> bool {
        match player {
            Player::First => self.king_attacked(Color::White),
            Player::Second => self.king_attacked(Color::Black),
        }
    }

    fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.position.get(sq)
    }

    fn attack_map(&self) -> Option<AttackMap> {
        let mut map = AttackMap::new(64);
        for (sq, piece) in self.position.iter() {
            for target in self.attacks(sq, piece) {
                if piece.color == self.to_move {
                    map.exchange_balance[target] += 1;
                } else {
                    map.exchange_balance[target] -= 1;
                    let weakest = &mut map.weakest_attacker[target];
                    if weakest.map_or(true, |current| (piece.kind as u8) < (current.kind as u8)) {
                        *weakest = Some(piece);
                    }
                }
            }
        }
        Some(map)
    }
}

/// A hand-built game graph. Moves name the node they lead to; leaves score
/// from `scores`, and `checks` marks nodes where the side to move is in check.
#[derive(Clone, Debug)]
pub struct GraphGame {
    edges: Arc<Vec<Vec<usize>>>,
    scores: Arc<Vec<i32>>,
    checks: Arc<Vec<bool>>,
    path: Vec<usize>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphMove {
    pub from: usize,
    pub to: usize,
}

impl SearchMove for GraphMove {
    fn start(&self) -> Square {
        self.from
    }

    fn end(&self) -> Square {
        self.to
    }

    fn captured(&self) -> Option<Piece> {
        None
    }
}

impl GraphGame {
    pub fn new(edges: Vec<Vec<usize>>, scores: Vec<i32>, checks: Vec<bool>) -> Self {
        Self {
            edges: Arc::new(edges),
            scores: Arc::new(scores),
            checks: Arc::new(checks),
            path: vec![0],
        }
    }

    fn node(&self) -> usize {
        self.path.last().copied().unwrap_or(0)
    }
}

impl GameBoard for GraphGame {
    type Move = GraphMove;

    fn apply_move(&mut self, game_move: &GraphMove) -> bool {
        self.path.push(game_move.to);
        true
    }

    fn undo_move(&mut self, _game_move: &GraphMove) {
        self.path.pop();
    }

    fn legal_moves(&mut self, _player: Player) -> (Vec<GraphMove>, PositionSignal) {
        let from = self.node();
        let moves = self.edges[from].iter().map(|&to| GraphMove { from, to }).collect();
        (moves, PositionSignal::NULL)
    }

    fn terminal_score(
        &mut self,
        _player: Player,
        moves: &[GraphMove],
        state: &SearchState<'_>,
        canceled: bool,
    ) -> Option<i32> {
        if state.depth() <= 0 || canceled || moves.is_empty() {
            Some(self.scores[self.node()])
        } else {
            None
        }
    }

    fn zobrist_key(&self) -> u64 {
        self.node() as u64
    }

    fn extra_info(&self) -> u32 {
        0
    }

    fn is_move_valid(&self, game_move: &GraphMove) -> bool {
        self.edges[self.node()].contains(&game_move.to)
    }

    fn is_in_check(&self, _player: Player) -> bool {
        self.checks[self.node()]
    }
}
