//! Seedable random source for every randomized engine rule.
//! Seeded mode runs Mulberry32 over a 32-bit state so daily runs replay bit-for-bit.
//! Unseeded mode draws from a ChaCha stream keyed by runtime entropy.

use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

const MULBERRY_INCREMENT: u32 = 0x6D2B_79F5;
const TWO_POW_32: f64 = 4_294_967_296.0;
const WARM_UP_DRAWS: usize = 2;

#[derive(Clone, Debug)]
enum Stream {
    Seeded { state: u32 },
    Entropy(ChaCha8Rng),
}

/// One instance per game. Two games never share a source.
#[derive(Clone, Debug)]
pub struct RandomSource {
    stream: Stream,
}

impl RandomSource {
    /// Unseeded source backed by runtime entropy.
    pub fn new() -> Self {
        Self { stream: entropy_stream() }
    }

    pub fn seeded(seed: u32) -> Self {
        let mut source = Self::new();
        source.set_seed(seed);
        source
    }

    /// Re-arms deterministic mode. The first draws of Mulberry32 from small seeds are
    /// poorly mixed, so they are discarded.
    pub fn set_seed(&mut self, seed: u32) {
        self.stream = Stream::Seeded { state: seed };
        for _ in 0..WARM_UP_DRAWS {
            self.next_u32();
        }
    }

    pub fn disable_seeded(&mut self) {
        self.stream = entropy_stream();
    }

    pub fn is_seeded(&self) -> bool {
        matches!(self.stream, Stream::Seeded { .. })
    }

    pub fn next_u32(&mut self) -> u32 {
        match &mut self.stream {
            Stream::Seeded { state } => {
                *state = state.wrapping_add(MULBERRY_INCREMENT);
                let mut t = *state;
                t = (t ^ (t >> 15)).wrapping_mul(t | 1);
                t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
                t ^ (t >> 14)
            }
            Stream::Entropy(rng) => rng.next_u32(),
        }
    }

    /// Uniform float in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / TWO_POW_32
    }

    /// Uniform float in `[min, max)`.
    pub fn range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Uniform integer in `[min, max]`, both ends inclusive.
    pub fn int_range(&mut self, min: i64, max: i64) -> i64 {
        assert!(min <= max, "int_range called with min {min} > max {max}");
        let span = (max - min + 1) as f64;
        min + (self.next_f64() * span).floor() as i64
    }

    /// Uniform index in `0..len`.
    pub fn index(&mut self, len: usize) -> usize {
        assert!(len > 0, "cannot pick an index from an empty range");
        ((self.next_f64() * len as f64).floor() as usize).min(len - 1)
    }

    /// Returns `None` without consuming a draw when `items` is empty.
    pub fn choice<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.index(items.len());
        items.get(idx)
    }

    /// In-place Fisher-Yates, walking from the back.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.index(i + 1);
            items.swap(i, j);
        }
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::new()
    }
}

fn entropy_stream() -> Stream {
    Stream::Entropy(ChaCha8Rng::seed_from_u64(generate_runtime_seed()))
}

static GENERATED_SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Entropy for unseeded play. Distinct across calls within one process.
pub fn generate_runtime_seed() -> u64 {
    let now_nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0_u128, |duration| duration.as_nanos());
    let pid = u64::from(process::id());
    let counter = GENERATED_SEED_COUNTER.fetch_add(1, Ordering::Relaxed);

    let entropy = (now_nanos as u64)
        ^ ((now_nanos >> 64) as u64)
        ^ pid.rotate_left(17)
        ^ counter.rotate_left(7);

    mix_seed(entropy)
}

/// SplitMix64 finalizer.
pub(crate) fn mix_seed(mut value: u64) -> u64 {
    value ^= value >> 30;
    value = value.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    value ^= value >> 27;
    value = value.wrapping_mul(0x94D0_49BB_1331_11EB);
    value ^ (value >> 31)
}
