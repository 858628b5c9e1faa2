//! The alpha-beta recursion.
//!
//! Every call is one node of the game tree. A node:
//!
//! 1. polls the deadline and the cancel token,
//! 2. asks the board whether it is a leaf,
//! 3. orders its moves,
//! 4. plays each move, reusing a cached subtree score when one
//!    exists and recursing with the roles flipped when not,
//! 5. narrows the window and stops early on a cutoff.
//!
//! # Caching
//!
//! Entries are keyed by the child's remaining depth and check-extension
//! budget. A child score is recorded only when it is exact: nothing was pruned
//! anywhere below it, it is not decisive, and neither the deadline nor a
//! cancellation cut the search short. Decisive scores depend on the exact
//! path that led to them, so nodes above one are never cached either.
//!
//! # Interruption
//!
//! Once the deadline passes or the search is canceled, nodes still finish
//! their move loops, but every child they open is scored as a leaf. The root
//! is never treated as a leaf, so an interrupted search still produces a move.

#[cfg(feature = "instrumentation")]
use tracing::instrument;

use super::state::SearchState;
use super::traits::{GameBoard, MoveOrderer, Player};
use super::DRAW_SCORE;

/// Result of searching one node.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeOutcome<M> {
    pub score: i32,
    pub best_move: Option<M>,
    /// No sibling was pruned and no interruption happened anywhere below.
    pub fully_evaluated: bool,
    /// Number of moves actually searched, in order.
    pub evaluated: usize,
}

/// Searches `moves` for `player` within the `[alpha, beta]` window.
///
/// `moves` is reordered in place by `orderer`. When `scores` is given, the
/// score of the i-th searched move is written to `scores[i]`, lined up with
/// the reordered `moves`.
#[allow(clippy::too_many_arguments)]
#[cfg_attr(feature = "instrumentation", instrument(skip_all))]
pub fn alpha_beta<B, O>(
    board: &mut B,
    player: Player,
    moves: &mut [B::Move],
    mut alpha: i32,
    mut beta: i32,
    state: &mut SearchState<'_>,
    orderer: &O,
    check_extension: bool,
    mut scores: Option<&mut [i32]>,
) -> NodeOutcome<B::Move>
where
    B: GameBoard,
    O: MoveOrderer<B>,
{
    let maximizing = player.is_maximizing();
    let canceled = state.poll();

    let mut outcome = NodeOutcome {
        score: if maximizing { i32::MIN } else { i32::MAX },
        best_move: None,
        fully_evaluated: true,
        evaluated: 0,
    };

    if state.ply() > 0 {
        if let Some(score) = board.terminal_score(player, moves, state, canceled) {
            state.count_node();
            outcome.score = score;
            outcome.fully_evaluated = !canceled;
            return outcome;
        }
    }

    orderer.order_moves(moves, board);
    let move_count = moves.len();

    for (index, game_move) in moves.iter().enumerate() {
        let value = if board.apply_move(game_move) {
            let (value, child_complete) = search_child(
                board,
                player,
                alpha,
                beta,
                state,
                orderer,
                check_extension,
            );
            outcome.fully_evaluated &= child_complete;
            board.undo_move(game_move);
            value
        } else {
            board.undo_move(game_move);
            DRAW_SCORE
        };

        if let Some(slot) = scores.as_deref_mut().and_then(|scores| scores.get_mut(index)) {
            *slot = value;
        }
        outcome.evaluated += 1;

        if maximizing {
            if value > outcome.score {
                outcome.score = value;
                outcome.best_move = Some(game_move.clone());
                if value >= beta {
                    if outcome.evaluated < move_count {
                        outcome.fully_evaluated = false;
                    }
                    break;
                }
                alpha = alpha.max(value);
            }
        } else if value < outcome.score {
            outcome.score = value;
            outcome.best_move = Some(game_move.clone());
            if value <= alpha {
                if outcome.evaluated < move_count {
                    outcome.fully_evaluated = false;
                }
                break;
            }
            beta = beta.min(value);
        }
    }

    if state.is_interrupted() {
        outcome.fully_evaluated = false;
    }
    outcome
}

/// Scores the position reached after `player` moved: from the cache when
/// possible, by recursion otherwise. Returns the score and whether it is
/// exact.
fn search_child<B, O>(
    board: &mut B,
    player: Player,
    alpha: i32,
    beta: i32,
    state: &mut SearchState<'_>,
    orderer: &O,
    check_extension: bool,
) -> (i32, bool)
where
    B: GameBoard,
    O: MoveOrderer<B>,
{
    let opponent = player.opponent();
    let key = board.zobrist_key();
    let extra_info = board.extra_info();
    let extended = check_extension && state.captures_depth() > 0 && board.is_in_check(opponent);

    state.descend(extended);
    let cache = state.cache();

    let probed = cache.and_then(|cache| {
        cache.probe(player, key, extra_info, state.depth(), state.captures_depth())
    });
    let result = match probed {
        Some(score) => (score, true),
        None => {
            let (mut replies, signal) = board.legal_moves(opponent);
            let parent_signal = state.replace_signal(signal);
            let child = alpha_beta(
                board,
                opponent,
                &mut replies,
                alpha,
                beta,
                state,
                orderer,
                check_extension,
                None,
            );
            state.replace_signal(parent_signal);

            let complete = child.fully_evaluated && !board.is_decisive(child.score);
            if complete && !state.is_interrupted() {
                if let Some(cache) = cache {
                    cache.record(
                        player,
                        key,
                        extra_info,
                        child.score,
                        state.depth(),
                        state.captures_depth(),
                    );
                }
            }
            (child.score, complete)
        }
    };

    state.ascend(extended);
    result
}
