use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CARDS_PER_HAND: usize = 4;
pub const MIN_CARD: u8 = 1;
pub const MAX_CARD: u8 = 13;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("invalid puzzle shape: expected 4 numbers, got {len}")]
    InvalidPuzzleShape { len: usize },
    #[error("card value {value} is outside 1..=13")]
    CardOutOfRange { value: u8 },
}

// --- Difficulty ---

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Hardest,
}

impl Difficulty {
    pub fn to_key(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Hardest => "hardest",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            "hardest" => Some(Difficulty::Hardest),
            _ => None,
        }
    }

    pub fn all() -> &'static [Difficulty] {
        &[
            Difficulty::Easy,
            Difficulty::Medium,
            Difficulty::Hard,
            Difficulty::Hardest,
        ]
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_key())
    }
}

// --- Puzzle ---

/// One dealt hand: four card values, a known solution, and a difficulty rating.
///
/// Equality is by number multiset only. Two puzzles with the same cards in
/// any order compare equal even if their solutions or difficulties differ.
#[derive(Clone, Debug)]
pub struct Puzzle {
    numbers: [u8; CARDS_PER_HAND],
    solution: String,
    difficulty: Difficulty,
}

impl Puzzle {
    pub fn new(
        numbers: &[u8],
        solution: impl Into<String>,
        difficulty: Difficulty,
    ) -> Result<Self, PuzzleError> {
        let numbers: [u8; CARDS_PER_HAND] = numbers
            .try_into()
            .map_err(|_| PuzzleError::InvalidPuzzleShape { len: numbers.len() })?;
        if let Some(&value) = numbers.iter().find(|&&n| !(MIN_CARD..=MAX_CARD).contains(&n)) {
            return Err(PuzzleError::CardOutOfRange { value });
        }
        Ok(Self {
            numbers,
            solution: solution.into(),
            difficulty,
        })
    }

    pub fn numbers(&self) -> &[u8; CARDS_PER_HAND] {
        &self.numbers
    }

    pub fn solution(&self) -> &str {
        &self.solution
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn key(&self) -> [u8; CARDS_PER_HAND] {
        canonical_key(self)
    }
}

impl PartialEq for Puzzle {
    fn eq(&self, other: &Self) -> bool {
        canonical_key(self) == canonical_key(other)
    }
}

impl Eq for Puzzle {}

/// Sorted card values. Used for recency tracking and dataset lookup.
pub fn canonical_key(puzzle: &Puzzle) -> [u8; CARDS_PER_HAND] {
    let mut key = puzzle.numbers;
    key.sort_unstable();
    key
}

/// Render a solution for display: `*` becomes `×`, `/` becomes `÷`.
pub fn display_solution(solution: &str) -> String {
    solution.replace('*', "×").replace('/', "÷")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_four_numbers_build() {
        let p = Puzzle::new(&[1, 2, 3, 4], "(1+2+3)*4", Difficulty::Easy).unwrap();
        assert_eq!(p.numbers(), &[1, 2, 3, 4]);
        assert_eq!(p.difficulty(), Difficulty::Easy);
    }

    #[test]
    fn test_wrong_length_is_invalid_shape() {
        for numbers in [&[][..], &[1][..], &[1, 2, 3][..], &[1, 2, 3, 4, 5][..]] {
            let err = Puzzle::new(numbers, "", Difficulty::Easy).unwrap_err();
            assert_eq!(err, PuzzleError::InvalidPuzzleShape { len: numbers.len() });
        }
    }

    #[test]
    fn test_card_out_of_range() {
        let err = Puzzle::new(&[0, 2, 3, 4], "", Difficulty::Easy).unwrap_err();
        assert_eq!(err, PuzzleError::CardOutOfRange { value: 0 });
        let err = Puzzle::new(&[1, 2, 3, 14], "", Difficulty::Easy).unwrap_err();
        assert_eq!(err, PuzzleError::CardOutOfRange { value: 14 });
    }

    #[test]
    fn test_equality_ignores_order_solution_and_difficulty() {
        let a = Puzzle::new(&[4, 3, 2, 1], "(1+2+3)*4", Difficulty::Easy).unwrap();
        let b = Puzzle::new(&[1, 2, 3, 4], "1*2*3*4", Difficulty::Hard).unwrap();
        let c = Puzzle::new(&[1, 2, 3, 5], "x", Difficulty::Easy).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(canonical_key(&a), [1, 2, 3, 4]);
    }

    #[test]
    fn test_difficulty_keys_roundtrip() {
        for &d in Difficulty::all() {
            assert_eq!(Difficulty::from_key(d.to_key()), Some(d));
        }
        assert_eq!(Difficulty::from_key("impossible"), None);
        assert!(Difficulty::Easy < Difficulty::Hardest);
    }

    #[test]
    fn test_display_solution_replaces_operators() {
        assert_eq!(display_solution("(1+2)*(3+4)"), "(1+2)×(3+4)");
        assert_eq!(display_solution("8/(3-8/3)"), "8÷(3-8÷3)");
    }
}
