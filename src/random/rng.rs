use crate::random::seed::Seed;

const MODULUS: i64 = 2_147_483_647;

/// 32-bit xorshift stream producing draws in `[0, 1)`.
///
/// State arithmetic is fixed-width `i32` with wraparound, so a given seed yields the same
/// infinite sequence on every platform. A render builds exactly one instance and threads it
/// through every layer in paint order.
#[derive(Clone, Debug)]
pub struct SeededRng {
    state: i32,
    draws: u64,
}

impl SeededRng {
    pub fn new(seed: Seed) -> Self {
        let state = match normalize_seed(seed.value()) {
            0 => 1,
            s => s,
        };
        Self { state, draws: 0 }
    }

    /// Next draw in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        let mut t = self.state;
        t ^= t.wrapping_shl(13);
        t ^= ((t as u32) >> 17) as i32;
        t ^= t.wrapping_shl(5);
        self.state = t;
        self.draws += 1;

        let magnitude = i64::from(t.unsigned_abs());
        (magnitude % MODULUS) as f64 / MODULUS as f64
    }

    /// Draw uniformly from `[lo, hi)`.
    pub fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }

    /// `base + floor(draw * span)`: an integer in `[base, base + span)`.
    pub fn count(&mut self, base: u32, span: u32) -> u32 {
        base + (self.next_f64() * f64::from(span)).floor() as u32
    }

    /// Number of draws consumed so far.
    pub fn draws(&self) -> u64 {
        self.draws
    }
}

/// `floor(seed * (2^31 - 1))` reduced to `i32` with two's-complement wraparound.
pub fn normalize_seed(seed: f64) -> i32 {
    let scaled = (seed * MODULUS as f64).floor();
    if !scaled.is_finite() {
        return 0;
    }
    scaled.rem_euclid(4_294_967_296.0) as u32 as i32
}

#[cfg(test)]
#[path = "../../tests/unit/random/rng.rs"]
mod tests;
