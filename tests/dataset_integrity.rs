use std::collections::HashSet;

use regex::Regex;

use twentyfour::engine::dataset::{PuzzleDataset, TARGET, TOLERANCE};
use twentyfour::engine::expr;
use twentyfour::engine::puzzle::{MAX_CARD, MIN_CARD};

fn bundled() -> PuzzleDataset {
    PuzzleDataset::embedded().unwrap_or_else(|e| panic!("bundled dataset failed to load: {e}"))
}

#[test]
fn every_solution_makes_24() {
    for (i, puzzle) in bundled().puzzles().iter().enumerate() {
        let value = expr::evaluate(puzzle.solution())
            .unwrap_or_else(|e| panic!("puzzle #{i} {:?}: {e}", puzzle.solution()));
        assert!(
            (value - TARGET).abs() <= TOLERANCE,
            "puzzle #{i} {:?} evaluates to {value}",
            puzzle.solution()
        );
    }
}

#[test]
fn every_solution_uses_exactly_its_cards() {
    let number = Regex::new(r"\d+").unwrap();
    for (i, puzzle) in bundled().puzzles().iter().enumerate() {
        let mut used: Vec<u8> = number
            .find_iter(puzzle.solution())
            .map(|m| m.as_str().parse().unwrap())
            .collect();
        used.sort_unstable();
        assert_eq!(used, puzzle.key(), "puzzle #{i} {:?}", puzzle.solution());
    }
}

#[test]
fn solutions_only_use_arithmetic_symbols() {
    let allowed = Regex::new(r"^[0-9+\-*/() ]+$").unwrap();
    for puzzle in bundled().puzzles() {
        assert!(allowed.is_match(puzzle.solution()), "{:?}", puzzle.solution());
    }
}

#[test]
fn card_values_in_range() {
    for puzzle in bundled().puzzles() {
        assert!(
            puzzle
                .numbers()
                .iter()
                .all(|n| (MIN_CARD..=MAX_CARD).contains(n))
        );
    }
}

#[test]
fn bundled_hands_are_unique() {
    // Duplicated multisets would make hand numbers ambiguous.
    let dataset = bundled();
    let keys: HashSet<[u8; 4]> = dataset.puzzles().iter().map(|p| p.key()).collect();
    assert_eq!(keys.len(), dataset.len());
    for (i, puzzle) in dataset.puzzles().iter().enumerate() {
        assert_eq!(dataset.index_of(puzzle), Some(i));
    }
}
