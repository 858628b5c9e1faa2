use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::evaluate::PositionSignal;

use super::traits::{Player, TranspositionCache};

/// Cooperative cancellation flag shared between a caller and running searches.
///
/// Cloning the token shares the flag. Searches poll it at every node and,
/// once it is set, finish their current move loops with leaf evaluations only.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn reset(&self) {
        self.0.store(false, Ordering::Relaxed);
    }

    pub fn is_canceled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Bookkeeping for one root-level search at one depth on one worker.
///
/// The state is threaded by `&mut` through the whole recursion, so node
/// counts and the timeout flag accumulate without synchronization. Boards
/// read it from [`GameBoard::terminal_score`](super::GameBoard::terminal_score).
pub struct SearchState<'a> {
    depth: i32,
    max_depth: u8,
    ply: u32,
    deadline: Option<Instant>,
    nodes: u64,
    timed_out: bool,
    first_signal: PositionSignal,
    second_signal: PositionSignal,
    signal: PositionSignal,
    first_move_count: usize,
    second_move_count: usize,
    cache: Option<&'a dyn TranspositionCache>,
    captures_depth: u8,
    cancel: CancelToken,
}

impl<'a> SearchState<'a> {
    pub fn new(
        max_depth: u8,
        deadline: Option<Instant>,
        cache: Option<&'a dyn TranspositionCache>,
        captures_depth: u8,
        cancel: CancelToken,
    ) -> Self {
        Self {
            depth: max_depth as i32,
            max_depth,
            ply: 0,
            deadline,
            nodes: 0,
            timed_out: false,
            first_signal: PositionSignal::NULL,
            second_signal: PositionSignal::NULL,
            signal: PositionSignal::NULL,
            first_move_count: 0,
            second_move_count: 0,
            cache,
            captures_depth,
            cancel,
        }
    }

    /// Seeds the root: the mover's signal and move count. The other side
    /// keeps the null signal and a zero count.
    pub fn with_root_signal(mut self, player: Player, signal: PositionSignal, move_count: usize) -> Self {
        match player {
            Player::First => {
                self.first_signal = signal;
                self.first_move_count = move_count;
            }
            Player::Second => {
                self.second_signal = signal;
                self.second_move_count = move_count;
            }
        }
        self.signal = signal;
        self
    }

    /// Remaining depth. It reaches zero at the horizon and may go negative
    /// when a board keeps extending past it.
    pub fn depth(&self) -> i32 {
        self.depth
    }

    pub fn max_depth(&self) -> u8 {
        self.max_depth
    }

    /// Distance from the root, in half-moves.
    pub fn ply(&self) -> u32 {
        self.ply
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    pub fn timed_out(&self) -> bool {
        self.timed_out
    }

    /// Root signal of `player`, or the null signal for the side that did not move at the root.
    pub fn root_signal(&self, player: Player) -> &PositionSignal {
        match player {
            Player::First => &self.first_signal,
            Player::Second => &self.second_signal,
        }
    }

    /// Signal of the move list at the current node.
    pub fn signal(&self) -> &PositionSignal {
        &self.signal
    }

    pub fn root_move_count(&self, player: Player) -> usize {
        match player {
            Player::First => self.first_move_count,
            Player::Second => self.second_move_count,
        }
    }

    /// Remaining plies of forced-line extension.
    pub fn captures_depth(&self) -> u8 {
        self.captures_depth
    }

    pub fn cache(&self) -> Option<&'a dyn TranspositionCache> {
        self.cache
    }

    pub fn is_canceled(&self) -> bool {
        self.cancel.is_canceled()
    }

    /// True once the deadline passed or the search was canceled.
    pub fn is_interrupted(&self) -> bool {
        self.timed_out || self.cancel.is_canceled()
    }

    /// Updates the sticky timeout flag and reports whether the node must stop expanding.
    pub(crate) fn poll(&mut self) -> bool {
        if let Some(deadline) = self.deadline {
            self.timed_out |= Instant::now() >= deadline;
        }
        self.is_interrupted()
    }

    pub(crate) fn count_node(&mut self) {
        self.nodes += 1;
    }

    /// Moves one ply down. An extended ply keeps the depth and spends
    /// extension budget instead. Must be paired with [`SearchState::ascend`].
    pub(crate) fn descend(&mut self, extended: bool) {
        if extended {
            self.captures_depth -= 1;
        } else {
            self.depth -= 1;
        }
        self.ply += 1;
    }

    pub(crate) fn ascend(&mut self, extended: bool) {
        if extended {
            self.captures_depth += 1;
        } else {
            self.depth += 1;
        }
        self.ply -= 1;
    }

    pub(crate) fn replace_signal(&mut self, signal: PositionSignal) -> PositionSignal {
        std::mem::replace(&mut self.signal, signal)
    }
}
