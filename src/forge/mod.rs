//! The orchestrator: last-used state, forge/shuffle, debounced resize and export.

pub(crate) mod debounce;
pub mod export;
pub mod orchestrator;
