use rand::prelude::*;
use wordstack_protocol::RngCheckpoint;

/// Source of uniform values in `[0, 1)` driving generation and swap draws.
///
/// Board generation and swaps only ever consume values through these
/// methods, so for the seeded source the number of calls made by a game is
/// fully determined by the documented algorithms.
pub trait RandomSource {
    /// Next value in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Uniform integer in `min..=max`.
    fn next_int(&mut self, min: u32, max: u32) -> u32 {
        let span = f64::from(max - min + 1);
        (self.next_f64() * span).floor() as u32 + min
    }

    /// Uniform index into a collection of `len` items, `len` must be positive.
    fn pick_index(&mut self, len: usize) -> usize {
        let index = (self.next_f64() * len as f64).floor() as usize;
        index.min(len.saturating_sub(1))
    }

    /// Fisher–Yates, one call per position from the last index down to 1.
    fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.next_int(0, i as u32) as usize;
            items.swap(i, j);
        }
    }
}

const MULTIPLIER: u64 = 9301;
const INCREMENT: u64 = 49297;
const MODULUS: u64 = 233_280;

/// Small linear congruential generator behind the daily puzzle.
///
/// The sequence is part of the puzzle definition: changing the constants or
/// the way values are consumed changes every past and future daily board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeededRandom {
    state: u64,
    calls: u64,
}

impl SeededRandom {
    pub const fn new(seed: u32) -> Self {
        Self {
            state: seed as u64,
            calls: 0,
        }
    }

    /// Resumes from a saved position. The state is taken modulo the
    /// generator's modulus, which yields the same sequence.
    pub fn restore(checkpoint: RngCheckpoint) -> Self {
        Self {
            state: checkpoint.state % MODULUS,
            calls: checkpoint.calls,
        }
    }

    pub fn checkpoint(&self) -> RngCheckpoint {
        RngCheckpoint {
            state: self.state,
            calls: self.calls,
        }
    }

    /// Number of values drawn since seeding.
    pub fn calls(&self) -> u64 {
        self.calls
    }

    /// Discards `calls` values, used to replay a known history.
    ///
    /// Composes the affine step with itself by squaring, so the cost is
    /// logarithmic in `calls`.
    pub fn fast_forward(&mut self, calls: u64) {
        if calls == 0 {
            return;
        }
        let (mut mul, mut add) = (1, 0);
        let (mut step_mul, mut step_add) = (MULTIPLIER, INCREMENT);
        let mut remaining = calls;
        while remaining > 0 {
            if remaining & 1 == 1 {
                mul = mul * step_mul % MODULUS;
                add = (add * step_mul + step_add) % MODULUS;
            }
            step_add = (step_add * step_mul + step_add) % MODULUS;
            step_mul = step_mul * step_mul % MODULUS;
            remaining >>= 1;
        }
        self.state = (self.state % MODULUS * mul + add) % MODULUS;
        self.calls = self.calls.saturating_add(calls);
    }

    fn step(&mut self) -> u64 {
        self.state = (self.state % MODULUS * MULTIPLIER + INCREMENT) % MODULUS;
        self.calls = self.calls.saturating_add(1);
        self.state
    }
}

impl RandomSource for SeededRandom {
    fn next_f64(&mut self) -> f64 {
        self.step() as f64 / MODULUS as f64
    }
}

/// Non-reproducible source for free play, seeded by the host.
#[derive(Clone, Debug)]
pub struct EntropySource(SmallRng);

impl EntropySource {
    pub fn from_seed(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }
}

impl RandomSource for EntropySource {
    fn next_f64(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}

/// Seed of the daily puzzle for a `YYYY-MM-DD` string.
///
/// Rolling `hash * 31 + code unit` over UTF-16 code units with 32-bit
/// wrap-around, then the absolute value. Must never change once puzzles have
/// been played.
pub fn daily_seed(date: &str) -> u32 {
    date.encode_utf16()
        .fold(0i32, |hash, unit| {
            hash.wrapping_mul(31).wrapping_add(i32::from(unit))
        })
        .unsigned_abs()
}
