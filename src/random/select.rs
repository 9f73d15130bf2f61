use crate::foundation::error::{ForgeError, ForgeResult};
use crate::random::rng::SeededRng;

/// Pick `options[floor(draw * len)]`, consuming exactly one draw.
///
/// `what` names the option set in the error. An empty set is a programming defect: every set
/// the pipeline selects from is a non-empty constant, so no draw is consumed in that case.
pub fn pick<'a, T>(options: &'a [T], rng: &mut SeededRng, what: &'static str) -> ForgeResult<&'a T> {
    if options.is_empty() {
        return Err(ForgeError::EmptySelection(what));
    }
    let idx = (rng.next_f64() * options.len() as f64).floor() as usize;
    // draws are < 1.0, the min only guards float edge cases on huge slices
    Ok(&options[idx.min(options.len() - 1)])
}

#[cfg(test)]
#[path = "../../tests/unit/random/select.rs"]
mod tests;
