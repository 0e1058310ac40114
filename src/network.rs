//! The switching network descriptor: a routed grid of switch settings.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::apply::routed_sources;
use crate::perm::{InvalidPermutationError, PermutationMap};
use crate::route::route_settings;
use crate::topology::{level_count, width};

/// A vector of the wrong length was handed to [`BenesNetwork::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("input vector has {actual} elements but the network routes {expected}")]
pub struct DimensionMismatchError {
    /// The network's size `n`.
    pub expected: usize,
    /// The length of the rejected input.
    pub actual: usize,
}

/// A switching network realizing one fixed permutation of `n` elements.
///
/// The network is a grid of boolean switches, `level_count` columns of `width` cells each.
/// A setting of `false` passes the switch's two wires straight through, `true` crosses them.
/// The grid is filled once during construction and immutable afterwards; sharing a network
/// between concurrent appliers needs no synchronization.
///
/// An oblivious evaluator consumes the grid through [`Self::switch_at`] or [`Self::level`],
/// visiting positions `0..width` of levels `0..level_count` in order, exactly as
/// [`Self::apply`] does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenesNetwork {
    n: usize,
    levels: usize,
    width: usize,
    settings: Vec<bool>,
}

impl BenesNetwork {
    /// Validates `map` and routes it into a network.
    ///
    /// This is the whole construction surface: the only failure is an invalid permutation,
    /// and routing itself is total once the map is validated.
    pub fn build(map: &[usize]) -> Result<Self, InvalidPermutationError> {
        let perm = PermutationMap::new(map.to_vec())?;
        Ok(Self::for_permutation(&perm))
    }

    /// Routes an already validated permutation into a network.
    pub fn for_permutation(perm: &PermutationMap) -> Self {
        let n = perm.n();
        let network = BenesNetwork {
            n,
            levels: level_count(n),
            width: width(n),
            settings: route_settings(perm),
        };
        debug!(
            n,
            levels = network.levels,
            width = network.width,
            "routed switching network"
        );
        network
    }

    /// The number of elements this network permutes.
    pub fn n(&self) -> usize {
        self.n
    }

    /// The number of switch levels: `2 * ceil(log2(n)) - 1`.
    pub fn level_count(&self) -> usize {
        self.levels
    }

    /// The number of switches per level: `floor(n / 2)`.
    pub fn width(&self) -> usize {
        self.width
    }

    /// The total number of switch cells, `level_count * width`; the number of oblivious-swap
    /// gates a secure evaluator has to provision.
    pub fn switch_count(&self) -> usize {
        self.settings.len()
    }

    /// The setting of the switch at `position` within `level`: `false` passes through,
    /// `true` crosses.
    ///
    /// # Panics
    /// If `level >= level_count` or `position >= width`.
    pub fn switch_at(&self, level: usize, position: usize) -> bool {
        assert!(level < self.levels, "level {level} out of range");
        assert!(position < self.width, "position {position} out of range");
        self.settings[level * self.width + position]
    }

    /// All switch settings of one level, in position order.
    ///
    /// # Panics
    /// If `level >= level_count`.
    pub fn level(&self, level: usize) -> &[bool] {
        assert!(level < self.levels, "level {level} out of range");
        &self.settings[level * self.width..(level + 1) * self.width]
    }

    /// For each output slot, the input slot routed to it. This is the permutation the
    /// settings grid realizes, and the oracle an oblivious evaluator is checked against.
    pub fn routed_sources(&self) -> Vec<usize> {
        routed_sources(self)
    }

    /// Sends `input` through the network, returning the permuted sequence.
    ///
    /// Elements are opaque: they are moved to their destinations, never inspected. Fails
    /// only if `input.len()` differs from [`Self::n`].
    pub fn apply<T>(&self, input: Vec<T>) -> Result<Vec<T>, DimensionMismatchError> {
        if input.len() != self.n {
            return Err(DimensionMismatchError {
                expected: self.n,
                actual: input.len(),
            });
        }
        let sources = self.routed_sources();
        let mut slots: Vec<Option<T>> = input.into_iter().map(Some).collect();
        let output = sources
            .into_iter()
            .map(|source| {
                slots[source]
                    .take()
                    .expect("routed a source to two output slots")
            })
            .collect();
        Ok(output)
    }
}
