//! Generic alpha-beta game-tree search.
//!
//! A game implements [`GameBoard`] and [`SearchMove`]; the [`SearchEngine`]
//! then finds the best move for either player under a depth or time budget,
//! optionally sharing a [`TranspositionCache`] between worker threads.

pub mod alpha_beta;
mod error;
pub mod move_ordering;
pub mod orchestrator;
pub mod settings;
pub mod state;
pub mod trace;
pub mod traits;
pub mod transposition_table;

#[cfg(test)]
mod test_games;

pub use alpha_beta::{alpha_beta, NodeOutcome};
pub use error::SearchError;
pub use move_ordering::{AttackMap, ExchangeOrderer};
pub use orchestrator::{SearchEngine, SearchOutcome};
pub use settings::{SearchMode, SearchSettings, SettingsError, ThreadingMode};
pub use state::{CancelToken, SearchState};
pub use trace::LogTrace;
pub use traits::{
    GameBoard, MoveOrderer, NoOpMoveOrderer, Player, SearchMove, SearchTrace, TranspositionCache,
    DECISIVE_THRESHOLD,
};
pub use transposition_table::TranspositionTable;

/// Lower bound of the root window, beyond any score a board can produce.
pub const ROOT_ALPHA: i32 = -10_000_000;
pub const ROOT_BETA: i32 = 10_000_000;

/// Score of a move the board refuses to play, and of a drawn position.
pub const DRAW_SCORE: i32 = 0;

/// Default extension budget along a single line of play.
pub const CAPTURES_DEPTH: u8 = 10;
