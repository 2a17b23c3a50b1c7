//! Deterministic PRNG for deck shuffling, reward rolls and map generation.
//!
//! Every random decision in a run flows through one seeded [`Rng`] owned by
//! the game, so a run is fully reproducible from its seed.

/// Deterministic PRNG using xorshift64.
#[derive(Debug, Clone, Copy)]
pub struct Rng {
    state: u64,
}

impl Rng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        // Ensure non-zero state
        let state = if seed == 0 { 0x5555_5555_5555_5555 } else { seed };
        Self { state }
    }

    /// Generate next random u64.
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Generate random u32 in [0, max).
    #[allow(clippy::cast_possible_truncation)]
    pub fn next_u32(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        (self.next_u64() % u64::from(max)) as u32
    }

    /// Generate random usize in [0, max).
    pub fn next_index(&mut self, max: usize) -> usize {
        if max == 0 {
            return 0;
        }
        usize::try_from(self.next_u64() % max as u64).unwrap_or(0)
    }

    /// Roll a percentage in [0, 100).
    pub fn percent(&mut self) -> u32 {
        self.next_u32(100)
    }

    /// Flip a fair coin.
    pub fn coin_flip(&mut self) -> bool {
        self.next_u64() & 1 == 0
    }

    /// Shuffle a slice in place with Fisher-Yates.
    ///
    /// Each of the `n!` orderings is equally likely (up to the negligible
    /// modulo bias of `next_index` for slice lengths far below `u64::MAX`).
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.next_index(i + 1);
            items.swap(i, j);
        }
    }
}
