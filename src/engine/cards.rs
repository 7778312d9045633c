use std::collections::HashMap;
use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    pub fn symbol(self) -> char {
        match self {
            Suit::Spades => '♠',
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
        }
    }
}

/// A card as shown to the player. The suit is cosmetic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayCard {
    pub value: u8,
    pub suit: Suit,
}

impl DisplayCard {
    pub fn face(&self) -> String {
        match self.value {
            1 => "A".to_string(),
            11 => "J".to_string(),
            12 => "Q".to_string(),
            13 => "K".to_string(),
            v => v.to_string(),
        }
    }
}

impl fmt::Display for DisplayCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.face(), self.suit.symbol())
    }
}

/// Give each number a random suit, keeping suits distinct among equal values.
/// Card order follows `numbers`.
pub fn assign_suits<R: Rng + ?Sized>(numbers: &[u8], rng: &mut R) -> Vec<DisplayCard> {
    let mut remaining: HashMap<u8, Vec<Suit>> = HashMap::new();
    numbers
        .iter()
        .map(|&value| {
            let suits = remaining.entry(value).or_insert_with(|| {
                let mut suits = Suit::ALL.to_vec();
                suits.shuffle(rng);
                suits
            });
            // Wraps only past four copies of one value, which a hand cannot hold.
            let suit = suits.pop().unwrap_or(Suit::Spades);
            DisplayCard { value, suit }
        })
        .collect()
}

/// Suited cards in a random display order, independent of the puzzle's
/// stored number order.
pub fn shuffled_cards<R: Rng + ?Sized>(numbers: &[u8], rng: &mut R) -> Vec<DisplayCard> {
    let mut cards = assign_suits(numbers, rng);
    cards.shuffle(rng);
    cards
}
