//! Engine for a single-player word puzzle played on a three-layer stack of
//! overlapping letter tiles.
//!
//! Tiles deeper in the stack show once a tile covering them is gone and can be
//! picked once all of them are, or temporarily while every covering tile is
//! part of the word being built. A [`Session`] owns one game: the [`Board`],
//! the word in progress, the swap pool and the random stream that dealt it.

use serde::{Deserialize, Serialize};

pub use wordstack_protocol::{
    DailyRecord, Feedback, LayerSnapshot, RngCheckpoint, SessionSnapshot, Severity, TileKey,
    TileSnapshot, UsedWord,
};

pub use board::*;
pub use daily::*;
pub use dictionary::*;
pub use error::*;
pub use generator::*;
pub use scoring::*;
pub use selection::*;
pub use session::*;
pub use swap::*;
pub use tile::*;
pub use types::*;

mod board;
mod daily;
mod dictionary;
mod error;
mod generator;
mod scoring;
mod selection;
mod session;
mod swap;
mod tile;
mod types;

/// Rules of a game that stay fixed from deal to end.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    pub shape: BoardShape,
    pub scoring: ScoringRule,
    /// Swaps granted per game.
    pub swaps: u8,
    /// Subtracted per tile left on the board when the game ends.
    pub penalty_per_tile: Score,
    /// Smallest swap pool a deal leaves behind.
    pub min_swap_pool: usize,
}

impl GameConfig {
    pub const fn new(shape: BoardShape) -> Self {
        Self {
            shape,
            scoring: ScoringRule::LengthTimesLetters,
            swaps: 3,
            penalty_per_tile: 3,
            min_swap_pool: 20,
        }
    }

    pub const fn with_scoring(mut self, scoring: ScoringRule) -> Self {
        self.scoring = scoring;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(BoardShape::Main)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_fills_missing_fields_with_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{"shape":"mini"}"#).unwrap();

        assert_eq!(config.shape, BoardShape::Mini);
        assert_eq!(config.swaps, 3);
        assert_eq!(config.penalty_per_tile, 3);
        assert_eq!(config.scoring, ScoringRule::LengthTimesLetters);
    }

    #[test]
    fn scoring_rule_can_be_swapped_in() {
        let config = GameConfig::new(BoardShape::Pyramid).with_scoring(ScoringRule::LengthOnly);
        assert_eq!(config.scoring, ScoringRule::LengthOnly);
        assert_eq!(config.min_swap_pool, 20);
    }
}
