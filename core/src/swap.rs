use serde::{Deserialize, Serialize};

use crate::*;

/// Letters left over after dealing, the only source of swap replacements.
///
/// Order matters for daily replays: draws index into the sequence.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapPool(Vec<Letter>);

impl SwapPool {
    pub fn new(letters: Vec<Letter>) -> Self {
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

    /// Removes one letter chosen by `rng`. Draws nothing from `rng` when empty.
    pub fn draw<R: RandomSource>(&mut self, rng: &mut R) -> Option<Letter> {
        if self.0.is_empty() {
            return None;
        }
        let index = rng.pick_index(self.0.len());
        Some(self.0.remove(index))
    }

    /// Letters the next `count` draws would produce, leaving both pool and `rng` untouched.
    pub fn preview<R: RandomSource + Clone>(&self, rng: &R, count: usize) -> Vec<Letter> {
        let mut pool = self.clone();
        let mut rng = rng.clone();
        (0..count).map_while(|_| pool.draw(&mut rng)).collect()
    }

    /// Display summary against the `original` bag size.
    pub fn status(&self, original: usize) -> PoolStatus {
        PoolStatus {
            remaining: self.len(),
            original,
            preview: self.0.iter().take(POOL_STATUS_PREVIEW).copied().collect(),
        }
    }
}

/// Pool letters listed in [`PoolStatus::preview`].
pub const POOL_STATUS_PREVIEW: usize = 10;

/// Summary of the swap pool for display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolStatus {
    pub remaining: usize,
    pub original: usize,
    /// Leading pool letters in pool order, not the order swaps draw them.
    pub preview: Vec<Letter>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(letters: &str) -> SwapPool {
        SwapPool::new(LetterBag::parse(letters).unwrap().letters().to_vec())
    }

    #[test]
    fn draw_shrinks_pool_by_one() {
        let mut pool = pool("ABCDE");
        let mut rng = SeededRandom::new(8);

        let letter = pool.draw(&mut rng).unwrap();

        assert_eq!(pool.len(), 4);
        assert!(!pool.letters().contains(&letter));
        assert_eq!(rng.calls(), 1);
    }

    #[test]
    fn empty_pool_draws_nothing() {
        let mut pool = SwapPool::default();
        let mut rng = SeededRandom::new(8);

        assert_eq!(pool.draw(&mut rng), None);
        assert_eq!(rng.calls(), 0);
    }

    #[test]
    fn preview_matches_real_draws_without_consuming() {
        let mut pool = pool("QWERTYUIOP");
        let mut rng = SeededRandom::new(31);
        rng.fast_forward(5);

        let preview = pool.preview(&rng, 3);
        assert_eq!(pool.len(), 10);
        assert_eq!(rng.calls(), 5);

        let drawn: Vec<_> = (0..3).filter_map(|_| pool.draw(&mut rng)).collect();
        assert_eq!(preview, drawn);
    }

    #[test]
    fn status_lists_leading_letters() {
        let status = pool("ABCDEFGHIJKLMN").status(100);

        assert_eq!(status.remaining, 14);
        assert_eq!(status.original, 100);
        let preview: String = status.preview.iter().map(|letter| letter.as_char()).collect();
        assert_eq!(preview, "ABCDEFGHIJ");

        assert_eq!(pool("XY").status(2).preview.len(), 2);
    }

    #[test]
    fn preview_stops_when_pool_runs_out() {
        let pool = pool("AB");
        let preview = pool.preview(&SeededRandom::new(1), 5);
        assert_eq!(preview.len(), 2);
    }
}
