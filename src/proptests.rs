use super::*;

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use std::collections::BTreeSet;

const UNIVERSE: usize = 300;

#[derive(Clone, Debug, Arbitrary)]
enum Op {
    #[proptest(weight = 3)]
    Insert(#[proptest(strategy = "0..UNIVERSE")] usize),
    Contains(#[proptest(strategy = "0..UNIVERSE + 8")] usize),
    Enumerate,
}

fn universe_and_keys() -> impl Strategy<Value = (usize, Vec<usize>)> {
    (1usize..=600).prop_flat_map(|u| (Just(u), prop::collection::vec(0..u, 0..=200)))
}

fn build(universe: usize, keys: &[usize]) -> VebTree {
    let mut t = VebTree::new(universe).unwrap();
    for &k in keys {
        t.insert(k).unwrap();
    }
    t
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 50_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence(ops in prop::collection::vec(any::<Op>(), 0..=1000)) {
        let mut t = VebTree::new(UNIVERSE).unwrap();
        let mut m: BTreeSet<usize> = BTreeSet::new();

        for op in ops {
            match op {
                Op::Insert(key) => {
                    prop_assert_eq!(t.insert(key).unwrap(), m.insert(key));
                }
                Op::Contains(key) => {
                    prop_assert_eq!(t.contains(key), m.contains(&key));
                }
                Op::Enumerate => {
                    let expected: Vec<usize> = m.iter().copied().collect();
                    prop_assert_eq!(t.enumerate(), expected);
                }
            }

            prop_assert_eq!(t.len(), m.len());
            prop_assert_eq!(t.min(), m.first().copied());
            prop_assert_eq!(t.max(), m.last().copied());
        }

        prop_assert_eq!(veb::validate(&t), m.len());
    }

    #[test]
    fn prop_membership_round_trip((universe, keys) in universe_and_keys()) {
        let t = build(universe, &keys);
        let set: BTreeSet<usize> = keys.iter().copied().collect();
        for k in 0..universe {
            prop_assert_eq!(t.contains(k), set.contains(&k), "key {}", k);
        }
        prop_assert_eq!(t.enumerate(), set.iter().copied().collect::<Vec<_>>());
    }

    #[test]
    fn prop_insertion_order_does_not_matter(
        (universe, keys) in universe_and_keys(),
        seed in any::<u64>(),
    ) {
        use rand::rngs::StdRng;
        use rand::seq::SliceRandom;
        use rand::SeedableRng;

        let mut shuffled = keys.clone();
        shuffled.shuffle(&mut StdRng::seed_from_u64(seed));

        let a = build(universe, &keys);
        let b = build(universe, &shuffled);
        prop_assert_eq!(a.enumerate(), b.enumerate());
        prop_assert_eq!((a.min(), a.max()), (b.min(), b.max()));
        validate_pair(&a, &b);
    }

    #[test]
    fn prop_double_insert_is_invisible((universe, keys) in universe_and_keys()) {
        let once = build(universe, &keys);
        let doubled: Vec<usize> = keys.iter().flat_map(|&k| [k, k]).collect();
        let twice = build(universe, &doubled);

        prop_assert_eq!(once.enumerate(), twice.enumerate());
        prop_assert_eq!(once.len(), twice.len());
        for k in 0..universe {
            prop_assert_eq!(once.contains(k), twice.contains(k));
        }
        validate_pair(&once, &twice);
    }
}

fn validate_pair(a: &VebTree, b: &VebTree) {
    assert_eq!(veb::validate(a), a.len());
    assert_eq!(veb::validate(b), b.len());
}

fn for_each_permutation<T: Clone>(items: &[T], mut f: impl FnMut(Vec<T>)) {
    fn rec<T: Clone>(items: &[T], used: &mut [bool], out: &mut Vec<T>, f: &mut impl FnMut(Vec<T>)) {
        if out.len() == items.len() {
            f(out.clone());
            return;
        }
        for i in 0..items.len() {
            if used[i] {
                continue;
            }
            used[i] = true;
            out.push(items[i].clone());
            rec(items, used, out, f);
            out.pop();
            used[i] = false;
        }
    }

    let mut used = vec![false; items.len()];
    let mut out = Vec::with_capacity(items.len());
    rec(items, &mut used, &mut out, &mut f);
}

#[test]
fn exhaustive_insert_order_small_set() {
    // Spread across clusters, with both universe ends and a shared cluster.
    let keys = [0usize, 1, 15, 16, 63, 40];

    for universe in [64usize, 65, 100] {
        for_each_permutation(&keys, |perm| {
            let t = build(universe, &perm);
            assert_eq!(t.enumerate(), vec![0, 1, 15, 16, 40, 63]);
            assert_eq!(t.min(), Some(0));
            assert_eq!(t.max(), Some(63));
            assert_eq!(veb::validate(&t), keys.len());
        });
    }
}

#[test]
fn exhaustive_small_universes() {
    // Every subset of every universe up to 9, inserted ascending and descending.
    for universe in 1usize..=9 {
        for mask in 0u32..(1 << universe) {
            let subset: Vec<usize> = (0..universe).filter(|&k| mask & (1 << k) != 0).collect();
            let mut reversed = subset.clone();
            reversed.reverse();

            for keys in [&subset, &reversed] {
                let t = build(universe, keys);
                assert_eq!(t.enumerate(), subset, "u={universe} keys={keys:?}");
                for k in 0..universe {
                    assert_eq!(t.contains(k), subset.contains(&k));
                }
                assert_eq!(veb::validate(&t), subset.len());
            }
        }
    }
}
