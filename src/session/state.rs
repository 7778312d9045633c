use rand::Rng;
use rand::seq::SliceRandom;

use crate::engine::dataset::PuzzleDataset;
use crate::engine::filter::DifficultyFilter;
use crate::engine::puzzle::{Puzzle, display_solution};
use crate::session::recency::RecencyTracker;

/// Current hand plus the recency window used to pick the next one.
///
/// Starts empty; the first successful [`SessionState::deal`] moves it to
/// holding a puzzle, and it never goes back.
#[derive(Clone, Debug, Default)]
pub struct SessionState {
    current_puzzle: Option<Puzzle>,
    current_index: Option<usize>,
    recent: RecencyTracker,
}

impl SessionState {
    pub fn new(max_recent: usize) -> Self {
        Self {
            current_puzzle: None,
            current_index: None,
            recent: RecencyTracker::new(max_recent),
        }
    }

    /// Deal the next hand from the puzzles the filter allows, avoiding the
    /// recency window. Returns `None` and leaves the state untouched when the
    /// filter matches nothing in the dataset.
    pub fn deal<R: Rng + ?Sized>(
        &mut self,
        dataset: &PuzzleDataset,
        filter: &DifficultyFilter,
        rng: &mut R,
    ) -> Option<&Puzzle> {
        let eligible = dataset.filtered(filter.selected());
        if eligible.is_empty() {
            tracing::warn!(selected = ?filter.selected(), "no puzzles match the difficulty filter");
            return None;
        }

        let mut candidates: Vec<&Puzzle> = eligible
            .iter()
            .copied()
            .filter(|p| !self.recent.contains(p))
            .collect();
        if candidates.is_empty() {
            tracing::debug!(eligible = eligible.len(), "recency window exhausted, resetting");
            self.recent.clear();
            candidates = eligible;
        }

        let picked = (*candidates.choose(rng)?).clone();
        self.recent.push(&picked);
        self.current_index = dataset.index_of(&picked);
        tracing::debug!(
            numbers = ?picked.numbers(),
            difficulty = %picked.difficulty(),
            index = ?self.current_index,
            candidates = candidates.len(),
            "dealt hand"
        );
        self.current_puzzle = Some(picked);
        self.current_puzzle.as_ref()
    }

    pub fn has_puzzle(&self) -> bool {
        self.current_puzzle.is_some()
    }

    pub fn current_puzzle(&self) -> Option<&Puzzle> {
        self.current_puzzle.as_ref()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    /// 1-based position of the current hand in the full dataset.
    pub fn hand_number(&self) -> Option<usize> {
        self.current_index.map(|i| i + 1)
    }

    pub fn formatted_solution(&self) -> String {
        self.current_puzzle
            .as_ref()
            .map(|p| display_solution(p.solution()))
            .unwrap_or_default()
    }

    pub fn recent(&self) -> &RecencyTracker {
        &self.recent
    }
}
