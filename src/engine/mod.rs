pub mod cards;
pub mod dataset;
pub mod expr;
pub mod filter;
pub mod puzzle;

pub use puzzle::{Difficulty, Puzzle};
