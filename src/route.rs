//! Routing a permutation into switch settings.
//!
//! This is the construction half of the network: given a validated permutation map, fill the
//! `level_count(n) * width(n)` settings grid so that replaying it moves every element to its
//! destination. The recursion splits each sub-problem into an input switch column, a top and
//! a bottom half-size sub-network, and an output switch column; deciding which half each
//! element crosses is a 2-coloring of the permutation's cycle structure.
//!
//! The application half in [`crate::apply`] mirrors this recursion step for step. Any change
//! to the decomposition here (base cases, odd split, offsets) must be made there as well.

use crate::topology::{ceil_log2, level_count, right_cycle_shift, width};

/// Color of a wire that the 2-coloring pass has not reached yet.
const UNASSIGNED: u8 = u8::MAX;

/// Computes the flat `level * width + position` settings grid realizing `perm`.
///
/// `perm` must already be validated; entry `i` is the destination slot of source slot `i`.
pub(crate) fn route_settings(perm: &[usize]) -> Vec<bool> {
    let n = perm.len();
    let mut router = Router {
        settings: vec![false; level_count(n) * width(n)],
        width: width(n),
        dest_pos: vec![0; n],
    };
    let srcs: Vec<usize> = (0..n).collect();
    // Output slot `perm[i]` must produce label `i`.
    let mut dests = vec![0; n];
    for (i, &dest) in perm.iter().enumerate() {
        dests[dest] = i;
    }
    router.route(ceil_log2(n), 0, 0, &srcs, &dests);
    router.settings
}

struct Router {
    settings: Vec<bool>,
    width: usize,
    /// Scratch lookup from element label to output position of the current sub-problem.
    /// Rewritten by every sub-problem before use, so stale entries are never read.
    dest_pos: Vec<usize>,
}

impl Router {
    fn set(&mut self, level: usize, position: usize, setting: bool) {
        self.settings[level * self.width + position] = setting;
    }

    /// Routes the sub-problem carrying labels `srcs` (in input order) to `dests` (in output
    /// order). `level` and `perm_idx` locate the sub-network's cells inside the shared grid;
    /// `sub_log_n` is the depth budget, which can exceed `ceil_log2(srcs.len())` when a
    /// sibling sub-network of the same depth is larger.
    fn route(
        &mut self,
        sub_log_n: usize,
        level: usize,
        perm_idx: usize,
        srcs: &[usize],
        dests: &[usize],
    ) {
        debug_assert_eq!(srcs.len(), dests.len());
        match srcs.len() {
            2 => self.route_pair(sub_log_n, level, perm_idx, srcs, dests),
            3 => self.route_triple(level, perm_idx, srcs, dests),
            _ => self.route_general(sub_log_n, level, perm_idx, srcs, dests),
        }
    }

    /// A 2-element sub-problem is a single switch: pass or cross.
    ///
    /// With a depth budget of 1 the switch sits at `level`. With a budget of 2 the pair was
    /// reached one level early (its sibling sub-network has 3 elements), so it must still
    /// span 3 physical levels to stay aligned: the switch sits in the middle column and the
    /// outer two cells keep their default pass-through setting.
    fn route_pair(
        &mut self,
        sub_log_n: usize,
        level: usize,
        perm_idx: usize,
        srcs: &[usize],
        dests: &[usize],
    ) {
        let cross = srcs[0] != dests[0];
        if sub_log_n == 1 {
            self.set(level, perm_idx, cross);
        } else {
            debug_assert_eq!(sub_log_n, 2, "pair base case past its depth budget");
            self.set(level + 1, perm_idx, cross);
        }
    }

    /// A 3-element sub-problem occupies one switch in each of 3 levels: the first and last
    /// swap wires 0 and 1, the middle swaps wires 1 and 2. The fixed case analysis keys on
    /// which output slot `srcs[0]` is bound for, then on whether the remaining two labels
    /// keep their order; together that covers all 6 permutations of 3 elements.
    fn route_triple(&mut self, level: usize, perm_idx: usize, srcs: &[usize], dests: &[usize]) {
        let (first, middle, last) = if srcs[0] == dests[0] {
            (false, srcs[1] != dests[1], false)
        } else if srcs[0] == dests[1] {
            (false, srcs[1] == dests[2], true)
        } else {
            (true, true, srcs[2] == dests[0])
        };
        self.set(level, perm_idx, first);
        self.set(level + 1, perm_idx, middle);
        self.set(level + 2, perm_idx, last);
    }

    fn route_general(
        &mut self,
        sub_log_n: usize,
        level: usize,
        perm_idx: usize,
        srcs: &[usize],
        dests: &[usize],
    ) {
        let sub_n = srcs.len();
        let sub_levels = 2 * sub_log_n - 1;
        let sub_top_n = sub_n / 2;
        let sub_bottom_n = sub_n - sub_top_n;
        let half = 1 << (sub_log_n - 1);

        // The permutation restricted to local wire indices, plus its inverse.
        for (pos, &label) in dests.iter().enumerate() {
            self.dest_pos[label] = pos;
        }
        let perms: Vec<usize> = srcs.iter().map(|&label| self.dest_pos[label]).collect();
        let mut inv_perms = vec![0; sub_n];
        for (i, &o) in perms.iter().enumerate() {
            inv_perms[o] = i;
        }

        // 2-color the wires: 0 sends a wire through the top sub-network, 1 through the
        // bottom. Wires sharing an input switch must split, as must wires feeding the two
        // sides of an output switch.
        let mut path = vec![UNASSIGNED; sub_n];
        if sub_n % 2 == 1 {
            // The lone last wire has no input switch; it runs straight into the bottom
            // sub-network, and so does the wire feeding the lone last output.
            path[sub_n - 1] = 1;
            let feeder = inv_perms[sub_n - 1];
            path[feeder] = 1;
            if feeder != sub_n - 1 {
                color_cycle(&mut path, &perms, &inv_perms, feeder ^ 1, 0);
            }
        }
        for i in 0..sub_n {
            if path[i] == UNASSIGNED {
                color_cycle(&mut path, &perms, &inv_perms, i, 0);
            }
        }
        debug_assert!(
            path.iter().all(|&color| color <= 1),
            "2-coloring left a wire unassigned"
        );

        let mut top_srcs = vec![0; sub_top_n];
        let mut bottom_srcs = vec![0; sub_bottom_n];
        let mut top_dests = vec![0; sub_top_n];
        let mut bottom_dests = vec![0; sub_bottom_n];

        // Input switch column: a pair crosses exactly when its even wire is colored for the
        // bottom half. Each wire's slot in its sub-network is its pair index.
        for i in (0..sub_n - 1).step_by(2) {
            self.set(level, perm_idx + i / 2, path[i] == 1);
            for wire in [i, i + 1] {
                let slot = right_cycle_shift((wire & !1) | path[wire] as usize, sub_log_n);
                if slot < half {
                    top_srcs[slot] = srcs[wire];
                } else {
                    bottom_srcs[slot - half] = srcs[wire];
                }
            }
        }
        // Output switch column, set symmetrically from the colors of the feeding wires.
        let out_level = level + sub_levels - 1;
        for o in (0..sub_n - 1).step_by(2) {
            self.set(out_level, perm_idx + o / 2, path[inv_perms[o]] == 1);
            for wire in [o, o + 1] {
                let slot =
                    right_cycle_shift((wire & !1) | path[inv_perms[wire]] as usize, sub_log_n);
                if slot < half {
                    top_dests[slot] = dests[wire];
                } else {
                    bottom_dests[slot - half] = dests[wire];
                }
            }
        }
        if sub_n % 2 == 1 {
            bottom_srcs[sub_bottom_n - 1] = srcs[sub_n - 1];
            bottom_dests[sub_bottom_n - 1] = dests[sub_n - 1];
        }

        self.route(sub_log_n - 1, level + 1, perm_idx, &top_srcs, &top_dests);
        self.route(
            sub_log_n - 1,
            level + 1,
            perm_idx + sub_n / 4,
            &bottom_srcs,
            &bottom_dests,
        );
    }
}

/// Propagates colors along one connected component of the constraint graph, alternating at
/// every step. Two kinds of edges leave a wire: its input-switch sibling `wire ^ 1`, and the
/// wire feeding the sibling of its output slot, `inv_perms[perms[wire] ^ 1]`.
///
/// Every wire has at most two neighbors, so components are simple paths or even-length
/// cycles and the alternating assignment is always consistent. Implemented with an explicit
/// stack: component sizes grow with `n` and would overflow the call stack as native
/// recursion.
fn color_cycle(path: &mut [u8], perms: &[usize], inv_perms: &[usize], start: usize, color: u8) {
    let mut stack = vec![(start, color)];
    while let Some((wire, color)) = stack.pop() {
        if path[wire] != UNASSIGNED {
            debug_assert_eq!(path[wire], color, "inconsistent 2-coloring");
            continue;
        }
        path[wire] = color;
        let sibling = wire ^ 1;
        if sibling < path.len() && path[sibling] == UNASSIGNED {
            stack.push((sibling, color ^ 1));
        }
        let out_sibling = perms[wire] ^ 1;
        if out_sibling < path.len() {
            let feeder = inv_perms[out_sibling];
            if path[feeder] == UNASSIGNED {
                stack.push((feeder, color ^ 1));
            }
        }
    }
}
