//! Top-level search requests.
//!
//! [`SearchEngine::find_best_move`] splits the root moves into contiguous
//! partitions, searches each partition on its own clone of the board and
//! reduces the per-worker answers into one [`SearchOutcome`].
//!
//! # Modes
//!
//! * [`SearchMode::FixedDepth`] searches once at the given depth, optionally
//!   bounded by [`SearchSettings::timeout`].
//! * [`SearchMode::IterativeDepth`] and [`SearchMode::TimedIterative`] search
//!   depth 1 without a deadline, then keep re-sorting the root moves by the
//!   previous iteration's scores and deepening by one ply. An iteration's
//!   answer is only kept when it finished before the deadline.
//!
//! # Workers
//!
//! Workers run on a rayon pool built for the request and joined before
//! returning. They share the transposition cache and the cancel token and
//! nothing else.

use std::sync::Arc;
use std::time::Instant;

use log::{debug, info, warn};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
#[cfg(feature = "instrumentation")]
use tracing::instrument;

use crate::evaluate::PositionSignal;

use super::alpha_beta::{alpha_beta, NodeOutcome};
use super::error::SearchError;
use super::move_ordering::ExchangeOrderer;
use super::settings::{SearchMode, SearchSettings};
use super::state::{CancelToken, SearchState};
use super::traits::{GameBoard, MoveOrderer, Player, SearchTrace, TranspositionCache};
use super::transposition_table::TranspositionTable;
use super::{ROOT_ALPHA, ROOT_BETA};

/// Answer to one search request.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchOutcome<M> {
    /// `None` only when there was no legal move to choose from.
    pub best_move: Option<M>,
    pub score: i32,
    pub nodes: u64,
    pub cache_hits: u64,
    /// Smallest depth completed by the workers that found a move.
    pub max_depth: u8,
    /// The answer comes from a depth the deadline cut short.
    pub timed_out: bool,
}

impl<M> SearchOutcome<M> {
    fn no_move() -> Self {
        Self {
            best_move: None,
            score: 0,
            nodes: 0,
            cache_hits: 0,
            max_depth: 0,
            timed_out: false,
        }
    }
}

/// The part of a request every worker sees.
struct RootJob<'a> {
    player: Player,
    signal: PositionSignal,
    total_moves: usize,
    cache: Option<&'a dyn TranspositionCache>,
}

/// One worker's accepted answer.
struct WorkerResult<M> {
    best_move: Option<M>,
    score: i32,
    nodes: u64,
    depth: u8,
    timed_out: bool,
}

/// One search of a worker's partition at one depth.
struct Iteration<M> {
    node: NodeOutcome<M>,
    nodes: u64,
    timed_out: bool,
    /// Timed out or canceled before the depth was finished.
    interrupted: bool,
}

pub struct SearchEngine<O = ExchangeOrderer> {
    settings: SearchSettings,
    orderer: O,
    cache: Option<Arc<dyn TranspositionCache>>,
    trace: Option<Arc<dyn SearchTrace>>,
    cancel: CancelToken,
}

impl SearchEngine<ExchangeOrderer> {
    /// Engine with exchange move ordering and, if the settings ask for one,
    /// a fresh [`TranspositionTable`].
    pub fn new(settings: SearchSettings) -> Self {
        let cache: Option<Arc<dyn TranspositionCache>> = if settings.transposition_table {
            Some(Arc::new(TranspositionTable::new()))
        } else {
            None
        };
        Self {
            settings,
            orderer: ExchangeOrderer::new(),
            cache,
            trace: None,
            cancel: CancelToken::new(),
        }
    }
}

impl<O> SearchEngine<O> {
    pub fn with_orderer<P>(self, orderer: P) -> SearchEngine<P> {
        SearchEngine {
            settings: self.settings,
            orderer,
            cache: self.cache,
            trace: self.trace,
            cancel: self.cancel,
        }
    }

    /// Replaces the cache. Ignored when the settings disable the transposition table.
    pub fn with_cache(mut self, cache: Arc<dyn TranspositionCache>) -> Self {
        if self.settings.transposition_table {
            self.cache = Some(cache);
        }
        self
    }

    pub fn with_trace(mut self, trace: Arc<dyn SearchTrace>) -> Self {
        self.trace = Some(trace);
        self
    }

    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    pub fn cache(&self) -> Option<&Arc<dyn TranspositionCache>> {
        self.cache.as_ref()
    }

    /// Finds the best of `moves` for `player`, whose move list is described by `signal`.
    ///
    /// # Returns
    ///
    /// - `Ok(outcome)` - `outcome.best_move` is `None` only if `moves` is empty
    /// - `Err(SearchError::DepthTooLow)` - a zero depth was configured
    /// - `Err(SearchError::ZeroTimeLimit)` - an empty time budget was configured
    /// - `Err(SearchError::ThreadPool)` - the worker pool could not be started
    ///
    /// # Panics
    ///
    /// When the board reports the chosen move as invalid. That means the
    /// board and the search disagree about the position.
    #[cfg_attr(feature = "instrumentation", instrument(skip_all))]
    pub fn find_best_move<B>(
        &self,
        board: &B,
        player: Player,
        moves: &[B::Move],
        signal: PositionSignal,
    ) -> Result<SearchOutcome<B::Move>, SearchError>
    where
        B: GameBoard,
        O: MoveOrderer<B>,
    {
        self.settings.validate()?;
        let start = Instant::now();

        if let Some(cache) = &self.cache {
            cache.reset_hits();
        }
        if moves.is_empty() {
            debug!("no legal moves for {:?}", player);
            return Ok(SearchOutcome::no_move());
        }

        let workers = self.settings.threading.worker_count(moves.len());
        let job = RootJob {
            player,
            signal,
            total_moves: moves.len(),
            cache: self.cache.as_deref(),
        };

        let results: Vec<WorkerResult<B::Move>> = if workers == 1 {
            vec![self.search_partition(board.clone(), moves.to_vec(), &job)]
        } else {
            let pool = ThreadPoolBuilder::new()
                .num_threads(workers)
                .thread_name(|index| format!("search-worker-{}", index))
                .build()?;
            let partitions = partition(moves, workers);
            pool.install(|| {
                partitions
                    .par_iter()
                    .map(|chunk| self.search_partition(board.clone(), chunk.to_vec(), &job))
                    .collect()
            })
        };

        let mut outcome = reduce(player, results);
        outcome.cache_hits = self.cache.as_ref().map_or(0, |cache| cache.hits());

        if let Some(best_move) = &outcome.best_move {
            assert!(
                board.is_move_valid(best_move),
                "search selected a move the board reports as invalid: {:?}",
                best_move
            );
        }
        if outcome.timed_out {
            warn!(
                "search for {:?} timed out, answering from an incomplete depth {}",
                player, outcome.max_depth
            );
        }
        info!(
            "{:?} plays {:?} (score {}, depth {}, {} nodes, {} cache hits, {} workers, {:?})",
            player,
            outcome.best_move,
            outcome.score,
            outcome.max_depth,
            outcome.nodes,
            outcome.cache_hits,
            workers,
            start.elapsed()
        );

        Ok(outcome)
    }

    fn search_partition<B>(&self, mut board: B, mut moves: Vec<B::Move>, job: &RootJob<'_>) -> WorkerResult<B::Move>
    where
        B: GameBoard,
        O: MoveOrderer<B>,
    {
        match self.settings.mode {
            SearchMode::FixedDepth(depth) => {
                let deadline = self.settings.timeout.map(|timeout| Instant::now() + timeout);
                let iteration = self.search_at_depth(&mut board, &mut moves, depth, deadline, None, job);
                WorkerResult {
                    best_move: iteration.node.best_move,
                    score: iteration.node.score,
                    nodes: iteration.nodes,
                    depth,
                    timed_out: iteration.timed_out,
                }
            }
            SearchMode::IterativeDepth(max_depth) => self.deepen(&mut board, moves, max_depth, None, job),
            SearchMode::TimedIterative(limit) => {
                let deadline = Instant::now() + limit;
                self.deepen(&mut board, moves, u8::MAX, Some(deadline), job)
            }
        }
    }

    /// Iterative deepening over one partition.
    fn deepen<B>(
        &self,
        board: &mut B,
        mut moves: Vec<B::Move>,
        max_depth: u8,
        deadline: Option<Instant>,
        job: &RootJob<'_>,
    ) -> WorkerResult<B::Move>
    where
        B: GameBoard,
        O: MoveOrderer<B>,
    {
        let mut scores = vec![0; moves.len()];
        let mut depth = 1;
        let first = self.search_at_depth(board, &mut moves, depth, None, Some(scores.as_mut_slice()), job);

        let mut result = WorkerResult {
            best_move: None,
            score: first.node.score,
            nodes: first.nodes,
            depth: 0,
            timed_out: false,
        };
        if first.node.best_move.is_some() {
            result.best_move = first.node.best_move;
            result.depth = depth;
        }
        let mut evaluated = first.node.evaluated;
        let mut timed_out = false;

        while !timed_out
            && depth < max_depth
            && !self.cancel.is_canceled()
            && deadline.map_or(true, |deadline| Instant::now() < deadline)
        {
            sort_by_scores(&mut moves, &scores[..evaluated], job.player.is_maximizing());
            depth += 1;

            let iteration = self.search_at_depth(board, &mut moves, depth, deadline, Some(scores.as_mut_slice()), job);
            result.nodes += iteration.nodes;
            evaluated = iteration.node.evaluated;
            timed_out = iteration.timed_out;

            if iteration.node.best_move.is_some() && !iteration.interrupted {
                result.best_move = iteration.node.best_move;
                result.score = iteration.node.score;
                result.depth = depth;
            }
        }

        result
    }

    fn search_at_depth<B>(
        &self,
        board: &mut B,
        moves: &mut [B::Move],
        depth: u8,
        deadline: Option<Instant>,
        scores: Option<&mut [i32]>,
        job: &RootJob<'_>,
    ) -> Iteration<B::Move>
    where
        B: GameBoard,
        O: MoveOrderer<B>,
    {
        let mut state = SearchState::new(
            depth,
            deadline,
            job.cache,
            self.settings.captures_depth,
            self.cancel.clone(),
        )
        .with_root_signal(job.player, job.signal, job.total_moves);

        let node = alpha_beta(
            board,
            job.player,
            moves,
            ROOT_ALPHA,
            ROOT_BETA,
            &mut state,
            &self.orderer,
            self.settings.check_extension,
            scores,
        );

        let interrupted = state.is_interrupted();
        match &node.best_move {
            Some(best_move) if !interrupted => {
                debug!(
                    "depth {} on {} moves: {:?} scores {} after {} nodes",
                    depth,
                    moves.len(),
                    best_move,
                    node.score,
                    state.nodes()
                );
                if let Some(trace) = &self.trace {
                    trace.depth_completed(depth, job.player, best_move, node.score);
                }
            }
            _ => debug!("depth {} interrupted after {} nodes", depth, state.nodes()),
        }

        Iteration {
            node,
            nodes: state.nodes(),
            timed_out: state.timed_out(),
            interrupted,
        }
    }
}

/// Splits `moves` into `workers` contiguous partitions whose sizes differ by
/// at most one, the larger ones first.
fn partition<M>(moves: &[M], workers: usize) -> Vec<&[M]> {
    let per_worker = moves.len() / workers;
    let overflow = moves.len() % workers;
    let mut partitions = Vec::with_capacity(workers);
    let mut start = 0;
    for worker in 0..workers {
        let len = per_worker + usize::from(worker < overflow);
        partitions.push(&moves[start..start + len]);
        start += len;
    }
    partitions
}

/// Best-first order of the moves searched last time; moves that were not
/// reached keep their order behind them.
fn sort_by_scores<M>(moves: &mut Vec<M>, scores: &[i32], maximizing: bool) {
    let searched = scores.len().min(moves.len());
    let unreached = moves.split_off(searched);

    let mut ranked: Vec<(M, i32)> = moves.drain(..).zip(scores.iter().copied()).collect();
    if maximizing {
        ranked.sort_by(|(_, a), (_, b)| b.cmp(a));
    } else {
        ranked.sort_by(|(_, a), (_, b)| a.cmp(b));
    }

    moves.extend(ranked.into_iter().map(|(game_move, _)| game_move));
    moves.extend(unreached);
}

/// Strictly better scores win, so ties go to the earlier partition.
fn reduce<M>(player: Player, results: Vec<WorkerResult<M>>) -> SearchOutcome<M> {
    let maximizing = player.is_maximizing();
    let mut outcome = SearchOutcome::no_move();
    outcome.score = if maximizing { i32::MIN } else { i32::MAX };
    let mut min_depth: Option<u8> = None;

    for result in results {
        outcome.nodes += result.nodes;
        let best_move = match result.best_move {
            Some(best_move) => best_move,
            None => continue,
        };

        min_depth = Some(min_depth.map_or(result.depth, |depth| depth.min(result.depth)));
        outcome.timed_out |= result.timed_out;

        let better = if maximizing {
            result.score > outcome.score
        } else {
            result.score < outcome.score
        };
        if better || outcome.best_move.is_none() {
            outcome.score = result.score;
            outcome.best_move = Some(best_move);
        }
    }

    outcome.max_depth = min_depth.unwrap_or(0);
    if outcome.best_move.is_none() {
        outcome.score = 0;
    }
    outcome
}
