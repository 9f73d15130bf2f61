//! Deterministic randomness: the seeded draw stream, the uniform selector, and sources of
//! fresh seeds for forge/shuffle.

pub(crate) mod rng;
pub(crate) mod seed;
pub(crate) mod select;
