//! Shape of a switching network as a pure function of its size.
//!
//! Every network for `n` elements has the same fixed grid of switch cells, regardless of the
//! permutation being routed: [`level_count`] columns of [`width`] switches each. The routing
//! recursion addresses sub-networks as offset ranges inside this one grid instead of
//! allocating per-sub-problem arrays, which leaves a few cells unused at outer levels but
//! keeps every switch addressable as a plain `(level, position)` pair.

/// Number of switch levels for a network of `n` elements: `2 * ceil(log2(n)) - 1`.
///
/// # Panics
/// If `n < 2`.
pub fn level_count(n: usize) -> usize {
    assert!(n >= 2, "switching networks need at least 2 elements");
    2 * ceil_log2(n) - 1
}

/// Number of switches per level for a network of `n` elements: `floor(n / 2)`.
pub fn width(n: usize) -> usize {
    n / 2
}

/// `ceil(log2(n))` for `n >= 2`.
pub(crate) fn ceil_log2(n: usize) -> usize {
    (usize::BITS - (n - 1).leading_zeros()) as usize
}

/// Rotates the low `bits` bits of `i` right by one position.
///
/// This maps a wire index (pair index plus a top/bottom bit in the lowest position) to the
/// slot the wire occupies in the next recursion level: even wires keep their pair index and
/// stay in the top half, odd wires move their low bit to the high position and land in the
/// bottom half.
pub(crate) fn right_cycle_shift(i: usize, bits: usize) -> usize {
    ((i & 1) << (bits - 1)) | (i >> 1)
}
