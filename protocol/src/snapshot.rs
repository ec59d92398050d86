use serde::{Deserialize, Serialize};

use crate::{Feedback, RngCheckpoint, UsedWord};

/// Anchor cell `[x, y, z]` of a tile, which is also its identity.
pub type TileKey = [u8; 3];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileSnapshot {
    pub anchor: TileKey,
    pub letter: char,
    pub selected: bool,
    pub visible: bool,
    pub selectable: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerSnapshot {
    pub size: u8,
    pub offset: u8,
    pub tiles: Vec<TileSnapshot>,
}

/// Mid-session state of a game, saved so a daily puzzle can be resumed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    /// Milliseconds since the unix epoch, used by the staleness window.
    pub saved_at_ms: u64,
    /// Game configuration as written by the engine.
    pub config: serde_json::Value,
    pub date: Option<String>,
    pub seed: Option<u32>,
    pub rng: Option<RngCheckpoint>,
    pub current_word: String,
    pub selected: Vec<TileKey>,
    pub layers: Vec<LayerSnapshot>,
    pub all_visible: bool,
    pub used_words: Vec<UsedWord>,
    pub best_word: Option<UsedWord>,
    pub total_score: i32,
    pub swaps_remaining: u8,
    pub swap_mode: bool,
    pub swap_pool: Vec<char>,
    pub original_bag_len: usize,
    pub feedback: Feedback,
    pub game_over: bool,
    pub show_end_game_confirmation: bool,
    pub final_score: i32,
    pub penalty_score: i32,
}

impl SessionSnapshot {
    /// Whether the snapshot is older than `ttl_ms` at time `now_ms`.
    pub fn is_stale(&self, now_ms: u64, ttl_ms: u64) -> bool {
        now_ms.saturating_sub(self.saved_at_ms) >= ttl_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(saved_at_ms: u64) -> SessionSnapshot {
        SessionSnapshot {
            saved_at_ms,
            config: serde_json::Value::Null,
            date: None,
            seed: None,
            rng: None,
            current_word: String::new(),
            selected: Vec::new(),
            layers: Vec::new(),
            all_visible: false,
            used_words: Vec::new(),
            best_word: None,
            total_score: 0,
            swaps_remaining: 3,
            swap_mode: false,
            swap_pool: Vec::new(),
            original_bag_len: 100,
            feedback: Feedback::default(),
            game_over: false,
            show_end_game_confirmation: false,
            final_score: 0,
            penalty_score: 0,
        }
    }

    #[test]
    fn staleness_is_measured_from_save_time() {
        let snap = snapshot(1_000);

        assert!(!snap.is_stale(1_000, 500));
        assert!(!snap.is_stale(1_499, 500));
        assert!(snap.is_stale(1_500, 500));
    }

    #[test]
    fn clock_going_backwards_is_not_stale() {
        assert!(!snapshot(10_000).is_stale(5_000, 500));
    }
}
