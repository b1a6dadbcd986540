//! Slice planning.
//!
//! The distance-sorted cloud is processed in slices rather than as a
//! whole, so every stride only searches a bounded neighbourhood:
//!
//! ```text
//! [0, 2000) [2000, 6000) [6000, 14000) [14000, 30000) [30000, 62000)
//! [62000, 94000) [94000, 126000) ...
//! ```
//!
//! Slices grow exponentially while the cloud is small, then continue at
//! a fixed width. Half of every slice but the last is carried over into
//! the next one to keep the path continuous across the boundary.

use std::ops::Range;

use crate::types::SpiralConfig;

/// Number of breakpoints `base·(2^k − 1)`, `k = 1..=4`. Each one that
/// lies below the node count adds one exponential slice.
const EXPONENT_BREAKPOINTS: u32 = 4;

/// Number of exponential slices planned for `n` nodes.
///
/// One more for every breakpoint (`2000, 6000, 14000, 30000` with the
/// default base) strictly below `n`.
#[must_use]
pub fn max_exponent(n: usize, base: usize) -> u32 {
    let crossed = (1..=EXPONENT_BREAKPOINTS)
        .filter(|&k| n > exponential_end(base, k))
        .count();
    1 + u32::try_from(crossed).unwrap_or(EXPONENT_BREAKPOINTS)
}

/// `base·(2^k − 1)`: the end of exponential slice `k − 1`, saturating at
/// `usize::MAX`.
const fn exponential_end(base: usize, k: u32) -> usize {
    base.saturating_mul((1 << k) - 1)
}

/// Plan the slices covering `n` distance-sorted nodes.
///
/// Slices are contiguous, ordered, non-empty and together cover exactly
/// `0..n`. The final slice is clipped to `n`.
#[must_use]
pub fn compute_slices(n: usize, config: &SpiralConfig) -> Vec<Range<usize>> {
    let exponents = max_exponent(n, config.base);
    let exponential =
        (0..exponents).map(|k| exponential_end(config.base, k)..exponential_end(config.base, k + 1));

    let fixed_start = exponential_end(config.base, exponents);
    let fixed = (fixed_start..n)
        .step_by(config.const_window.max(1))
        .map(|start| start..start.saturating_add(config.const_window));

    exponential
        .chain(fixed)
        .take_while(|slice| slice.start < n)
        .map(|slice| slice.start..slice.end.min(n))
        .collect()
}

/// Number of nodes of `slice` left over for the next slice.
#[must_use]
pub const fn half_slice(slice: &Range<usize>) -> usize {
    (slice.end - slice.start) / 2
}
