use serde::{Deserialize, Serialize};

use crate::*;

/// Scrabble letter distribution plus two wildcards, 100 letters in total.
pub const STANDARD_BAG: &str = "AAAAAAAAABBCCDDDDEEEEEEEEEEEEFFGGGHHIIIIIIIIIJKLLLLMMNNNNNNOOOOOOOOPPQRRRRRRSSSSTTTTTTUUUUVVWWXYYZ**";

/// Letters a board is dealt from, in their original order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterBag(Vec<Letter>);

impl LetterBag {
    pub fn standard() -> Self {
        // the constant only holds valid letters
        Self(STANDARD_BAG.chars().filter_map(|ch| Letter::new(ch).ok()).collect())
    }

    pub fn parse(letters: &str) -> Result<Self> {
        letters
            .chars()
            .filter(|ch| !ch.is_whitespace())
            .map(Letter::new)
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }

    pub fn from_letters(letters: Vec<Letter>) -> Self {
        Self(letters)
    }

    pub fn letters(&self) -> &[Letter] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for LetterBag {
    fn default() -> Self {
        Self::standard()
    }
}
