use std::fmt::Debug;

use log::info;

use super::traits::{Player, SearchTrace};

/// Writes every completed depth to the `log` facade.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogTrace;

impl SearchTrace for LogTrace {
    fn depth_completed(&self, depth: u8, player: Player, best_move: &dyn Debug, score: i32) {
        info!(
            "depth {} completed for {:?}: best move {:?} scores {}",
            depth, player, best_move, score
        );
    }
}
