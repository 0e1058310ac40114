//! Validated permutation maps.
//!
//! A [`PermutationMap`] is the sole input to network construction, so all validation happens
//! here, once, at the boundary: every map that exists is a true bijection on `{0, .., n-1}`
//! with `n >= 2`.

use std::ops::Deref;

use rand::{Rng, seq::SliceRandom};
use thiserror::Error;

/// The ways an integer sequence can fail to be a usable permutation map.
///
/// None of these are retryable; the caller has to fix the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidPermutationError {
    /// Networks are only defined for 2 or more elements.
    #[error("a permutation map needs at least 2 entries, got {0}")]
    TooShort(usize),
    /// An entry points outside `0..n`.
    #[error("entry {entry} at position {position} is out of range for a permutation of {n}")]
    OutOfRange {
        /// Position of the offending entry.
        position: usize,
        /// The out-of-range destination.
        entry: usize,
        /// Size of the map.
        n: usize,
    },
    /// Two sources share the same destination slot.
    #[error("destination {entry} is used more than once")]
    Duplicate {
        /// The duplicated destination.
        entry: usize,
    },
}

/// A bijection on `{0, .., n-1}`: entry `i` is the destination slot of source slot `i`.
///
/// Immutable once constructed. Dereferences to `&[usize]` for read access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermutationMap(Vec<usize>);

impl PermutationMap {
    /// Validates `map` and wraps it as a permutation.
    pub fn new(map: Vec<usize>) -> Result<Self, InvalidPermutationError> {
        let n = map.len();
        if n < 2 {
            return Err(InvalidPermutationError::TooShort(n));
        }
        let mut seen = vec![false; n];
        for (position, &entry) in map.iter().enumerate() {
            if entry >= n {
                return Err(InvalidPermutationError::OutOfRange { position, entry, n });
            }
            if seen[entry] {
                return Err(InvalidPermutationError::Duplicate { entry });
            }
            seen[entry] = true;
        }
        Ok(Self(map))
    }

    /// Samples a uniformly random permutation of `n` elements.
    ///
    /// # Panics
    /// If `n < 2`.
    pub fn random(n: usize, rng: &mut impl Rng) -> Self {
        assert!(n >= 2, "a permutation map needs at least 2 entries");
        let mut map: Vec<usize> = (0..n).collect();
        map.shuffle(rng);
        Self(map)
    }

    /// The number of elements being permuted.
    pub fn n(&self) -> usize {
        self.0.len()
    }

    /// The raw destination slots.
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// The inverse bijection: routing through `self` and then [`Self::inverse`] is a no-op.
    pub fn inverse(&self) -> Self {
        let mut inv = vec![0; self.0.len()];
        for (i, &dest) in self.0.iter().enumerate() {
            inv[dest] = i;
        }
        Self(inv)
    }

    /// The composition "`self`, then `other`": entry `i` of the result is `other[self[i]]`.
    ///
    /// # Panics
    /// If the two maps have different sizes.
    pub fn compose(&self, other: &Self) -> Self {
        assert_eq!(
            self.0.len(),
            other.0.len(),
            "composed permutation maps must have the same size"
        );
        Self(self.0.iter().map(|&dest| other.0[dest]).collect())
    }
}

impl Deref for PermutationMap {
    type Target = [usize];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
