use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::foundation::math::{Fnv1a64, mix64};

/// Numeric input that fully determines one render's random choices.
///
/// Any finite number is accepted; values outside `[0, 1)` are normalized by the RNG.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Seed(f64);

impl Seed {
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Map 53 random bits onto `[0, 1)`.
    pub fn from_bits(bits: u64) -> Self {
        Self((bits >> 11) as f64 / (1u64 << 53) as f64)
    }
}

impl std::fmt::Display for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Supplier of fresh seeds for startup, forge and shuffle.
pub trait SeedSource: Send {
    fn next_seed(&mut self) -> Seed;
}

/// Non-reproducible seeds from wall clock, process id and a per-process counter.
#[derive(Debug, Default)]
pub struct EntropySeeds {
    _private: (),
}

static ENTROPY_COUNTER: AtomicU64 = AtomicU64::new(0);

impl EntropySeeds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SeedSource for EntropySeeds {
    fn next_seed(&mut self) -> Seed {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos() as u64;
        let mut h = Fnv1a64::new_default();
        h.write_u64(nanos);
        h.write_u64(u64::from(std::process::id()));
        h.write_u64(ENTROPY_COUNTER.fetch_add(1, Ordering::Relaxed));
        Seed::from_bits(mix64(h.finish()))
    }
}

/// Reproducible seed stream: a splitmix sequence from a fixed starting value.
#[derive(Debug, Clone)]
pub struct SequenceSeeds {
    state: u64,
}

impl SequenceSeeds {
    pub fn new(start: u64) -> Self {
        Self { state: start }
    }
}

impl SeedSource for SequenceSeeds {
    fn next_seed(&mut self) -> Seed {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        Seed::from_bits(mix64(self.state))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/random/seed.rs"]
mod tests;
