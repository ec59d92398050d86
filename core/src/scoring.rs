use serde::{Deserialize, Serialize};

use crate::*;

/// Base score by word length (wildcards not counted), indexed by length.
/// Words longer than the table score nothing.
pub const LENGTH_SCORES: [u32; 25] = [
    0, 0, 1, 3, 5, 8, 12, 17, 23, 30, 38, 47, 57, 68, 80, 93, 107, 122, 138, 155, 173, 192, 212,
    233, 255,
];

/// Formula used to score an accepted word.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoringRule {
    /// Length score only, the original rules.
    LengthOnly,
    /// Length score multiplied by the sum of letter values.
    #[default]
    LengthTimesLetters,
}

impl ScoringRule {
    pub fn score(self, word: &str) -> Score {
        let length = length_score(word);
        let total = match self {
            Self::LengthOnly => length,
            Self::LengthTimesLetters => length * letter_score(word),
        };
        total as Score
    }
}

/// Length-table score, counting only non-wildcard characters.
pub fn length_score(word: &str) -> u32 {
    let length = word.chars().filter(|&ch| ch != '*').count();
    LENGTH_SCORES.get(length).copied().unwrap_or(0)
}

/// Sum of letter values, characters that are not letters count as zero.
pub fn letter_score(word: &str) -> u32 {
    word.chars()
        .filter_map(|ch| Letter::new(ch).ok())
        .map(Letter::points)
        .sum()
}
