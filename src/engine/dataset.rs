use std::collections::{BTreeMap, BTreeSet};

use rust_embed::Embed;
use serde::Deserialize;
use thiserror::Error;

use crate::engine::expr::{self, ExprError};
use crate::engine::puzzle::{Difficulty, Puzzle, PuzzleError, canonical_key};

pub const TARGET: f64 = 24.0;
pub const TOLERANCE: f64 = 1e-4;

const BUNDLED_FILE: &str = "puzzles.toml";

#[derive(Embed)]
#[folder = "assets/"]
struct PuzzleAssets;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("bundled asset {0} is missing")]
    MissingAsset(&'static str),
    #[error("bundled asset is not valid UTF-8")]
    NotUtf8(#[from] std::str::Utf8Error),
    #[error("failed to parse puzzle table: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("puzzle #{index} is invalid: {source}")]
    InvalidPuzzle {
        index: usize,
        #[source]
        source: PuzzleError,
    },
}

#[derive(Deserialize)]
struct PuzzleFile {
    #[serde(default)]
    puzzle: Vec<PuzzleRecord>,
}

#[derive(Deserialize)]
struct PuzzleRecord {
    numbers: Vec<u8>,
    solution: String,
    difficulty: Difficulty,
}

#[derive(Debug, PartialEq)]
pub enum IntegrityProblem {
    Unparseable(ExprError),
    WrongValue(f64),
    NumbersMismatch { expected: Vec<u32>, found: Vec<u32> },
}

#[derive(Debug, PartialEq)]
pub struct IntegrityIssue {
    pub index: usize,
    pub solution: String,
    pub problem: IntegrityProblem,
}

/// Immutable, ordered list of pre-solved puzzles.
#[derive(Clone, Debug, Default)]
pub struct PuzzleDataset {
    puzzles: Vec<Puzzle>,
}

impl PuzzleDataset {
    pub fn new(puzzles: Vec<Puzzle>) -> Self {
        Self { puzzles }
    }

    /// Parse a `[[puzzle]]` table list. A single malformed entry fails the
    /// whole load.
    pub fn from_toml(content: &str) -> Result<Self, DatasetError> {
        let file: PuzzleFile = toml::from_str(content)?;
        let puzzles = file
            .puzzle
            .into_iter()
            .enumerate()
            .map(|(index, r)| {
                Puzzle::new(&r.numbers, r.solution, r.difficulty)
                    .map_err(|source| DatasetError::InvalidPuzzle { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { puzzles })
    }

    pub fn embedded() -> Result<Self, DatasetError> {
        let file = PuzzleAssets::get(BUNDLED_FILE).ok_or(DatasetError::MissingAsset(BUNDLED_FILE))?;
        let content = std::str::from_utf8(file.data.as_ref())?;
        let dataset = Self::from_toml(content)?;
        tracing::debug!(puzzles = dataset.len(), "loaded bundled puzzle dataset");
        Ok(dataset)
    }

    pub fn puzzles(&self) -> &[Puzzle] {
        &self.puzzles
    }

    pub fn len(&self) -> usize {
        self.puzzles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.puzzles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Puzzle> {
        self.puzzles.get(index)
    }

    /// Position of the first entry with the same number multiset.
    ///
    /// Entries sharing a multiset are indistinguishable here, so a lookup
    /// always resolves to the earliest one.
    pub fn index_of(&self, puzzle: &Puzzle) -> Option<usize> {
        let key = canonical_key(puzzle);
        self.puzzles.iter().position(|p| canonical_key(p) == key)
    }

    pub fn filtered(&self, difficulties: &BTreeSet<Difficulty>) -> Vec<&Puzzle> {
        self.puzzles
            .iter()
            .filter(|p| difficulties.contains(&p.difficulty()))
            .collect()
    }

    pub fn count_by_difficulty(&self) -> BTreeMap<Difficulty, usize> {
        let mut counts = BTreeMap::new();
        for p in &self.puzzles {
            *counts.entry(p.difficulty()).or_insert(0) += 1;
        }
        counts
    }

    /// Check every solution evaluates to 24 using exactly the puzzle's cards.
    pub fn verify(&self) -> Vec<IntegrityIssue> {
        let mut issues = Vec::new();
        for (index, puzzle) in self.puzzles.iter().enumerate() {
            let issue = |problem| IntegrityIssue {
                index,
                solution: puzzle.solution().to_string(),
                problem,
            };

            match expr::evaluate(puzzle.solution()) {
                Ok(value) if (value - TARGET).abs() > TOLERANCE => {
                    issues.push(issue(IntegrityProblem::WrongValue(value)));
                }
                Ok(_) => {}
                Err(e) => issues.push(issue(IntegrityProblem::Unparseable(e))),
            }

            let mut found = expr::literals(puzzle.solution());
            found.sort_unstable();
            let expected: Vec<u32> = canonical_key(puzzle).iter().map(|&n| u32::from(n)).collect();
            if found != expected {
                issues.push(issue(IntegrityProblem::NumbersMismatch { expected, found }));
            }
        }
        issues
    }
}
