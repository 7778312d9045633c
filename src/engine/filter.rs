use std::collections::BTreeSet;

use crate::engine::puzzle::Difficulty;
use crate::store::Store;

pub const SELECTED_DIFFICULTIES_KEY: &str = "selectedDifficulties";

/// The set of difficulties a deal may draw from. Never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DifficultyFilter {
    selected: BTreeSet<Difficulty>,
}

impl Default for DifficultyFilter {
    fn default() -> Self {
        Self {
            selected: Difficulty::all().iter().copied().collect(),
        }
    }
}

impl DifficultyFilter {
    /// Restore the saved selection, or select everything when nothing usable
    /// was saved.
    pub fn load(store: &dyn Store) -> Self {
        match store.get(SELECTED_DIFFICULTIES_KEY) {
            Some(raw) => Self::decode(&raw).unwrap_or_else(|| {
                tracing::debug!(raw = %raw, "ignoring malformed difficulty selection");
                Self::default()
            }),
            None => Self::default(),
        }
    }

    fn decode(raw: &str) -> Option<Self> {
        let tags: Vec<String> = serde_json::from_str(raw).ok()?;
        let selected: BTreeSet<Difficulty> =
            tags.iter().filter_map(|t| Difficulty::from_key(t)).collect();
        if selected.is_empty() {
            None
        } else {
            Some(Self { selected })
        }
    }

    fn encode(&self) -> String {
        let tags: Vec<&str> = self.selected.iter().map(|d| d.to_key()).collect();
        serde_json::Value::from(tags).to_string()
    }

    pub fn selected(&self) -> &BTreeSet<Difficulty> {
        &self.selected
    }

    pub fn is_selected(&self, difficulty: Difficulty) -> bool {
        self.selected.contains(&difficulty)
    }

    /// Flip `difficulty` and persist the result. Deselecting the only
    /// selected difficulty does nothing. Returns whether the set changed.
    pub fn toggle(&mut self, difficulty: Difficulty, store: &mut dyn Store) -> bool {
        if self.selected.contains(&difficulty) {
            if self.selected.len() == 1 {
                return false;
            }
            self.selected.remove(&difficulty);
        } else {
            self.selected.insert(difficulty);
        }
        tracing::debug!(%difficulty, selected = ?self.selected, "toggled difficulty");

        if let Err(e) = store.set(SELECTED_DIFFICULTIES_KEY, &self.encode()) {
            tracing::warn!(error = %e, "failed to persist difficulty selection");
        }
        true
    }
}
