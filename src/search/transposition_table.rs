//! Concurrent transposition table shared by all search workers.

use std::hash::BuildHasherDefault;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use rustc_hash::FxHasher;

use super::traits::{Player, TranspositionCache};

/// (mover, zobrist key, extra info, remaining depth and extension budget of the child)
type CacheKey = (Player, u64, u32, i32, u8);

/// Exact scores of fully evaluated subtrees. Concurrent writers of the same
/// key simply overwrite each other.
#[derive(Default)]
pub struct TranspositionTable {
    table: DashMap<CacheKey, i32, BuildHasherDefault<FxHasher>>,
    hits: AtomicU64,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            table: DashMap::with_capacity_and_hasher(capacity, BuildHasherDefault::default()),
            hits: AtomicU64::new(0),
        }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn clear(&self) {
        self.table.clear();
        self.hits.store(0, Ordering::Relaxed);
    }
}

impl TranspositionCache for TranspositionTable {
    fn probe(&self, player: Player, key: u64, extra_info: u32, depth: i32, extensions: u8) -> Option<i32> {
        let score = self
            .table
            .get(&(player, key, extra_info, depth, extensions))
            .map(|entry| *entry.value());
        if score.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        }
        score
    }

    fn record(&self, player: Player, key: u64, extra_info: u32, score: i32, depth: i32, extensions: u8) {
        self.table.insert((player, key, extra_info, depth, extensions), score);
    }

    fn reset_hits(&self) {
        self.hits.store(0, Ordering::Relaxed);
    }

    fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }
}
