#![cfg(test)]

// Property tests for DenseHashMap kept inside the crate so they can run the
// whole-map invariant checker after every operation.

use crate::map::DenseHashMap;
use proptest::prelude::*;
use std::collections::HashMap;
use std::hash::{BuildHasher, Hasher};

// Small key domain so puts, updates, and removals keep colliding on the same
// keys; op lists shrink in length, keys shrink toward zero.
#[derive(Clone, Debug)]
enum Op {
    Put(u32, u32),
    Get(u32),
    Remove(u32),
    Contains(u32),
}

fn arb_ops(max_key: u32, max_len: usize) -> impl Strategy<Value = Vec<Op>> {
    let op = prop_oneof![
        (0..max_key, any::<u32>()).prop_map(|(k, v)| Op::Put(k, v)),
        (0..max_key).prop_map(Op::Get),
        (0..max_key).prop_map(Op::Remove),
        (0..max_key).prop_map(Op::Contains),
    ];
    proptest::collection::vec(op, 1..max_len)
}

fn run_state_machine<S>(ops: Vec<Op>, mut sut: DenseHashMap<u32, u32, S>) -> Result<(), TestCaseError>
where
    S: BuildHasher,
{
    let mut model: HashMap<u32, u32> = HashMap::new();
    for op in ops {
        match op {
            Op::Put(k, v) => {
                let previous = sut.put(k, v).expect("allocation failed");
                prop_assert_eq!(previous, model.insert(k, v));
            }
            Op::Get(k) => {
                prop_assert_eq!(sut.get(&k).copied(), model.get(&k).copied());
            }
            Op::Remove(k) => {
                prop_assert_eq!(sut.remove(&k), model.remove(&k));
            }
            Op::Contains(k) => {
                prop_assert_eq!(sut.contains_key(&k), model.contains_key(&k));
            }
        }

        // Post-conditions after each op: size parity, structural invariants
        // (slot/position bijection, load bound, probe monotonicity).
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        sut.check_invariants();
    }

    // Final sweep: the maps agree on every key either ever touched or not.
    for (k, v) in &model {
        prop_assert_eq!(sut.get(k), Some(v));
    }
    prop_assert_eq!(sut.iter().count(), model.len());
    Ok(())
}

// Property: state-machine equivalence against std::collections::HashMap
// across random put/get/remove/contains sequences, including update-in-place
// puts and removals that trigger tail moves and backward shifts.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine(ops in arb_ops(24, 120)) {
        run_state_machine(ops, DenseHashMap::new())?;
    }
}

// Property: the same equivalence with enough distinct keys to force several
// index rebuilds mid-sequence.
proptest! {
    #![proptest_config(ProptestConfig { cases: 32, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_across_rebuilds(ops in arb_ops(512, 400)) {
        run_state_machine(ops, DenseHashMap::new())?;
    }
}

// Worst-case collision behavior: a constant hasher drives every key through
// one probe run, stressing Robin Hood displacement and backward-shift repair.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions(ops in arb_ops(24, 120)) {
        run_state_machine(ops, DenseHashMap::with_hasher(ConstBuildHasher))?;
    }
}
