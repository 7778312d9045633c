use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::cards::DisplayCard;
use crate::engine::puzzle::Difficulty;

pub const DEFAULT_MAX_ENTRIES: usize = 20;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// 1-based, counts every hand recorded since the log was created or cleared.
    pub sequence: u64,
    pub hand_number: usize,
    pub cards: Vec<DisplayCard>,
    pub difficulty: Difficulty,
    pub solution: String,
    pub dealt_at: DateTime<Utc>,
}

/// Most recent hands, newest first.
#[derive(Clone, Debug)]
pub struct HistoryLog {
    entries: VecDeque<HistoryEntry>,
    max_entries: usize,
    total_hands_count: u64,
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES)
    }
}

impl HistoryLog {
    /// `max_entries` is clamped to at least one.
    pub fn new(max_entries: usize) -> Self {
        let max_entries = max_entries.max(1);
        Self {
            entries: VecDeque::new(),
            max_entries,
            total_hands_count: 0,
        }
    }

    pub fn record(
        &mut self,
        hand_number: usize,
        cards: Vec<DisplayCard>,
        difficulty: Difficulty,
        solution: impl Into<String>,
    ) -> &HistoryEntry {
        self.total_hands_count += 1;
        self.entries.push_front(HistoryEntry {
            sequence: self.total_hands_count,
            hand_number,
            cards,
            difficulty,
            solution: solution.into(),
            dealt_at: Utc::now(),
        });
        self.entries.truncate(self.max_entries);
        &self.entries[0]
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.total_hands_count = 0;
    }

    pub fn entries(&self) -> impl ExactSizeIterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn total_hands_count(&self) -> u64 {
        self.total_hands_count
    }
}
