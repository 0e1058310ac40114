//! Oblivious switching networks (generalized Benes networks) for secure multi-party computation.
//!
//! A switching network realizes an arbitrary permutation of `n` items as a grid of boolean
//! 2×1 switches: `2 * ceil(log2(n)) - 1` levels with `n / 2` switches per level, where each
//! switch either passes its two inputs through or crosses them. Because the permutation is
//! fully encoded in the switch settings, a secure protocol can shuffle secret-shared data by
//! evaluating each switch as an oblivious-swap gate, without any party learning the
//! permutation itself.
//!
//! This crate provides the plaintext core of that construction:
//!
//! * [`perm`]: validated permutation maps and small utilities on them.
//! * [`topology`]: the level/width formulas that fix the shape of every network.
//! * [`network`]: [`BenesNetwork`], which routes a permutation into switch settings and can
//!   replay those settings over a plaintext input vector. The replay doubles as the
//!   reference oracle for an oblivious evaluator, which consumes the same settings
//!   gate-for-gate via [`BenesNetwork::switch_at`] and [`BenesNetwork::level`].
//!
//! Cryptographic primitives, transports and the secure evaluation of switches live in the
//! surrounding toolkit, not here.
//!
//! # Example
//!
//! ```
//! use permnet::{BenesNetwork, PermutationMap};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Entry `i` of the map is the destination slot of input `i`.
//! let perm = PermutationMap::new(vec![2, 0, 3, 1])?;
//! let network = BenesNetwork::for_permutation(&perm);
//! let output = network.apply(vec!["a", "b", "c", "d"])?;
//! assert_eq!(output, vec!["b", "d", "a", "c"]);
//! # Ok(())
//! # }
//! ```
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod network;
pub mod perm;
pub mod topology;

mod apply;
mod route;

pub use network::{BenesNetwork, DimensionMismatchError};
pub use perm::{InvalidPermutationError, PermutationMap};
