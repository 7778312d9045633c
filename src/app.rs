use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::config::Config;
use crate::engine::cards;
use crate::engine::dataset::{DatasetError, PuzzleDataset};
use crate::engine::filter::DifficultyFilter;
use crate::engine::puzzle::{Difficulty, Puzzle};
use crate::preferences::{ColorScheme, Language, Preferences};
use crate::session::history::{HistoryEntry, HistoryLog};
use crate::session::state::SessionState;
use crate::store::Store;

/// One play session: owns every piece of mutable game state.
pub struct App {
    pub config: Config,
    dataset: PuzzleDataset,
    filter: DifficultyFilter,
    session: SessionState,
    history: HistoryLog,
    preferences: Preferences,
    store: Box<dyn Store>,
    rng: SmallRng,
}

impl App {
    pub fn new(config: Config, store: Box<dyn Store>) -> Result<Self, DatasetError> {
        let dataset = PuzzleDataset::embedded()?;
        Ok(Self::with_dataset(config, store, dataset))
    }

    pub fn with_dataset(mut config: Config, store: Box<dyn Store>, dataset: PuzzleDataset) -> Self {
        config.normalize();
        let filter = DifficultyFilter::load(store.as_ref());
        let preferences = Preferences::load(store.as_ref());
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self {
            session: SessionState::new(config.max_recent),
            history: HistoryLog::new(config.max_history),
            config,
            dataset,
            filter,
            preferences,
            store,
            rng,
        }
    }

    /// Deal the next hand and record it in the history with the cards in a
    /// fresh display order. `None` when the filter leaves nothing to deal.
    pub fn deal_hand(&mut self) -> Option<&HistoryEntry> {
        let puzzle = self
            .session
            .deal(&self.dataset, &self.filter, &mut self.rng)?
            .clone();
        let hand_number = self.session.hand_number()?;
        let cards = cards::shuffled_cards(puzzle.numbers(), &mut self.rng);
        Some(
            self.history
                .record(hand_number, cards, puzzle.difficulty(), puzzle.solution()),
        )
    }

    pub fn toggle_difficulty(&mut self, difficulty: Difficulty) -> bool {
        self.filter.toggle(difficulty, self.store.as_mut())
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn set_color_scheme(&mut self, scheme: ColorScheme) {
        self.preferences.set_color_scheme(scheme, self.store.as_mut());
    }

    pub fn set_language(&mut self, language: Language) {
        self.preferences.set_language(language, self.store.as_mut());
    }

    pub fn dataset(&self) -> &PuzzleDataset {
        &self.dataset
    }

    pub fn current_puzzle(&self) -> Option<&Puzzle> {
        self.session.current_puzzle()
    }

    pub fn formatted_solution(&self) -> String {
        self.session.formatted_solution()
    }

    pub fn hand_number(&self) -> Option<usize> {
        self.session.hand_number()
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn total_hands_count(&self) -> u64 {
        self.history.total_hands_count()
    }

    pub fn filter(&self) -> &DifficultyFilter {
        &self.filter
    }

    pub fn preferences(&self) -> Preferences {
        self.preferences
    }
}
