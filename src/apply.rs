//! Replaying switch settings over an input sequence.
//!
//! The exact structural mirror of [`crate::route`]: the same recursive decomposition with the
//! same base cases, offsets and odd split, but reading settings from the grid instead of
//! computing them. An oblivious evaluator follows this template gate-for-gate, replacing
//! "read the setting and swap" with an oblivious swap over secret shares.
//!
//! The recursion permutes wire indices rather than caller elements, so generic payloads are
//! moved exactly once when the final reordering is materialized in
//! [`crate::network::BenesNetwork::apply`].

use crate::network::BenesNetwork;
use crate::topology::ceil_log2;

/// For each output slot, the input slot whose element ends up there under `network`'s
/// settings.
pub(crate) fn routed_sources(network: &BenesNetwork) -> Vec<usize> {
    let indices: Vec<usize> = (0..network.n()).collect();
    apply_indices(network, ceil_log2(network.n()), 0, 0, indices)
}

fn apply_indices(
    network: &BenesNetwork,
    sub_log_n: usize,
    level: usize,
    perm_idx: usize,
    mut wires: Vec<usize>,
) -> Vec<usize> {
    let sub_n = wires.len();
    if sub_n == 2 {
        // The padded pair base case keeps its single switch in the middle of 3 levels.
        let cross = if sub_log_n == 1 {
            network.switch_at(level, perm_idx)
        } else {
            network.switch_at(level + 1, perm_idx)
        };
        if cross {
            wires.swap(0, 1);
        }
        return wires;
    }
    if sub_n == 3 {
        if network.switch_at(level, perm_idx) {
            wires.swap(0, 1);
        }
        if network.switch_at(level + 1, perm_idx) {
            wires.swap(1, 2);
        }
        if network.switch_at(level + 2, perm_idx) {
            wires.swap(0, 1);
        }
        return wires;
    }

    let sub_levels = 2 * sub_log_n - 1;
    let sub_top_n = sub_n / 2;
    let mut top = Vec::with_capacity(sub_top_n);
    let mut bottom = Vec::with_capacity(sub_n - sub_top_n);
    for k in 0..sub_top_n {
        let (mut even, mut odd) = (wires[2 * k], wires[2 * k + 1]);
        if network.switch_at(level, perm_idx + k) {
            std::mem::swap(&mut even, &mut odd);
        }
        top.push(even);
        bottom.push(odd);
    }
    if sub_n % 2 == 1 {
        bottom.push(wires[sub_n - 1]);
    }

    let top = apply_indices(network, sub_log_n - 1, level + 1, perm_idx, top);
    let bottom = apply_indices(
        network,
        sub_log_n - 1,
        level + 1,
        perm_idx + sub_n / 4,
        bottom,
    );

    let out_level = level + sub_levels - 1;
    let mut out = vec![0; sub_n];
    for k in 0..sub_top_n {
        let (mut even, mut odd) = (top[k], bottom[k]);
        if network.switch_at(out_level, perm_idx + k) {
            std::mem::swap(&mut even, &mut odd);
        }
        out[2 * k] = even;
        out[2 * k + 1] = odd;
    }
    if sub_n % 2 == 1 {
        out[sub_n - 1] = bottom[sub_n / 2];
    }
    out
}
