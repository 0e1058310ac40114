use permnet::{BenesNetwork, PermutationMap};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn init() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Builds the network for `map` and checks that routing the identity vector through it
/// lands every element in its destination slot.
fn check_network(map: &[usize]) {
    let network = BenesNetwork::build(map).unwrap();
    let output = network.apply((0..map.len()).collect::<Vec<_>>()).unwrap();
    for (i, &dest) in map.iter().enumerate() {
        assert_eq!(output[dest], i, "wrong routing for map {map:?}");
    }
}

/// Decodes `code` (in `0..n!`) into the `code`-th permutation of `n` elements.
fn nth_permutation(n: usize, mut code: usize) -> Vec<usize> {
    let mut pool: Vec<usize> = (0..n).collect();
    let mut map = vec![0; n];
    for slot in (0..n).rev() {
        let k = code % (slot + 1);
        code /= slot + 1;
        map[slot] = pool[k];
        pool[k] = pool[slot];
    }
    map
}

#[test]
fn routes_every_permutation_up_to_seven() {
    init();
    for n in 2..=7 {
        let count: usize = (1..=n).product();
        for code in 0..count {
            check_network(&nth_permutation(n, code));
        }
    }
}

#[test]
fn routes_random_permutations_of_larger_sizes() {
    init();
    let mut rng = ChaCha20Rng::seed_from_u64(0x5eed);
    for n in [9, 16, 27, 64, 100, 255, 256, 257, 1000] {
        for _ in 0..8 {
            let perm = PermutationMap::random(n, &mut rng);
            check_network(&perm);
        }
    }
}

#[test]
fn inverse_network_undoes_the_permutation() {
    init();
    let mut rng = ChaCha20Rng::seed_from_u64(0xfeed);
    for n in [2, 3, 7, 32, 97, 256] {
        let perm = PermutationMap::random(n, &mut rng);
        let forward = BenesNetwork::for_permutation(&perm);
        let backward = BenesNetwork::for_permutation(&perm.inverse());
        let input: Vec<usize> = (0..n).map(|i| i * 3 + 1).collect();
        let shuffled = forward.apply(input.clone()).unwrap();
        let restored = backward.apply(shuffled).unwrap();
        assert_eq!(restored, input);
    }
}

#[test]
fn switch_enumeration_replays_to_the_same_routing() {
    init();
    // Re-route by consuming the network only through its per-level enumeration, the way an
    // oblivious evaluator would, and compare against `routed_sources`.
    let mut rng = ChaCha20Rng::seed_from_u64(3);
    let perm = PermutationMap::random(40, &mut rng);
    let network = BenesNetwork::for_permutation(&perm);
    let mut levels = Vec::with_capacity(network.level_count());
    for level in 0..network.level_count() {
        levels.push(network.level(level).to_vec());
    }
    let rebuilt = BenesNetwork::build(perm.as_slice()).unwrap();
    for (level, row) in levels.iter().enumerate() {
        for (position, &setting) in row.iter().enumerate() {
            assert_eq!(setting, rebuilt.switch_at(level, position));
        }
    }
    assert_eq!(network.routed_sources(), rebuilt.routed_sources());
}

#[test]
fn descriptor_survives_a_serde_round_trip() {
    init();
    let network = BenesNetwork::build(&[4, 2, 0, 3, 1]).unwrap();
    let bytes = bincode::serialize(&network).unwrap();
    let restored: BenesNetwork = bincode::deserialize(&bytes).unwrap();
    assert_eq!(network, restored);
    assert_eq!(restored.routed_sources(), network.routed_sources());
}

proptest! {
    #[test]
    fn routes_arbitrary_permutations(
        map in (2usize..96).prop_flat_map(|n| Just((0..n).collect::<Vec<usize>>()).prop_shuffle())
    ) {
        let network = BenesNetwork::build(&map).unwrap();
        let output = network.apply((0..map.len()).collect::<Vec<_>>()).unwrap();
        for (i, &dest) in map.iter().enumerate() {
            prop_assert_eq!(output[dest], i);
        }
    }

    #[test]
    fn composed_networks_match_the_composed_map(
        map in (4usize..48).prop_flat_map(|n| Just((0..n).collect::<Vec<usize>>()).prop_shuffle())
    ) {
        let n = map.len();
        let first = PermutationMap::new(map).unwrap();
        let second = PermutationMap::new((0..n).map(|i| (i + 1) % n).collect()).unwrap();
        let step_one = BenesNetwork::for_permutation(&first)
            .apply((0..n).collect::<Vec<_>>())
            .unwrap();
        let step_two = BenesNetwork::for_permutation(&second).apply(step_one).unwrap();
        let at_once = BenesNetwork::for_permutation(&first.compose(&second))
            .apply((0..n).collect::<Vec<_>>())
            .unwrap();
        prop_assert_eq!(step_two, at_once);
    }
}
