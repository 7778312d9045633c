use std::collections::VecDeque;

use crate::engine::puzzle::{CARDS_PER_HAND, Puzzle, canonical_key};

pub const DEFAULT_MAX_RECENT: usize = 5;

/// Bounded FIFO of recently dealt hands, keyed by number multiset.
#[derive(Clone, Debug)]
pub struct RecencyTracker {
    entries: VecDeque<[u8; CARDS_PER_HAND]>,
    capacity: usize,
}

impl Default for RecencyTracker {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RECENT)
    }
}

impl RecencyTracker {
    /// `capacity` is clamped to at least one.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, puzzle: &Puzzle) -> bool {
        let key = canonical_key(puzzle);
        self.entries.contains(&key)
    }

    pub fn push(&mut self, puzzle: &Puzzle) {
        self.entries.push_back(canonical_key(puzzle));
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &[u8; CARDS_PER_HAND]> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::puzzle::Difficulty;

    fn hand(n: u8) -> Puzzle {
        Puzzle::new(&[n, 1, 1, 1], "", Difficulty::Easy).unwrap()
    }

    #[test]
    fn test_evicts_oldest_past_capacity() {
        let mut tracker = RecencyTracker::new(3);
        for n in 1..=5 {
            tracker.push(&hand(n));
        }
        assert_eq!(tracker.len(), 3);
        assert!(!tracker.contains(&hand(1)));
        assert!(!tracker.contains(&hand(2)));
        assert!(tracker.contains(&hand(3)));
        assert!(tracker.contains(&hand(5)));
        let oldest = tracker.entries().next().unwrap();
        assert_eq!(oldest, &[1, 1, 1, 3]);
    }

    #[test]
    fn test_contains_matches_by_multiset() {
        let mut tracker = RecencyTracker::default();
        tracker.push(&Puzzle::new(&[8, 3, 8, 3], "8/(3-8/3)", Difficulty::Hardest).unwrap());
        let reordered = Puzzle::new(&[3, 3, 8, 8], "", Difficulty::Easy).unwrap();
        assert!(tracker.contains(&reordered));
    }

    #[test]
    fn test_zero_capacity_still_remembers_last_hand() {
        let mut tracker = RecencyTracker::new(0);
        assert_eq!(tracker.capacity(), 1);
        tracker.push(&hand(4));
        assert!(tracker.contains(&hand(4)));
        tracker.push(&hand(5));
        assert!(!tracker.contains(&hand(4)));
    }

    #[test]
    fn test_huge_capacity_does_not_preallocate() {
        let mut tracker = RecencyTracker::new(usize::MAX);
        assert_eq!(tracker.capacity(), usize::MAX);
        tracker.push(&hand(6));
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut tracker = RecencyTracker::default();
        tracker.push(&hand(2));
        tracker.clear();
        assert!(tracker.is_empty());
        assert_eq!(tracker.capacity(), DEFAULT_MAX_RECENT);
    }
}
