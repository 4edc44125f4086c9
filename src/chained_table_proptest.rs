#![cfg(test)]

// Property tests for ChainedTable kept inside the crate so they can call
// the structural invariant checker.

use crate::chained_table::ChainedTable;
use crate::config::TableConfig;
use proptest::prelude::*;
use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Put(usize, u32),
    Delete(usize),
    Get(usize),
    Mutate(usize, u32),
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-zA-Z]{0,4}", 1..=24).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            3 => (idx.clone(), any::<u32>()).prop_map(|(i, v)| OpI::Put(i, v)),
            1 => idx.clone().prop_map(OpI::Delete),
            1 => idx.clone().prop_map(OpI::Get),
            1 => (idx.clone(), any::<u32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            1 => Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..120).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn arb_config() -> impl Strategy<Value = TableConfig> {
    (2usize..=8, 2usize..=3, prop_oneof![Just(0.5), Just(0.75), Just(1.0), Just(2.0)]).prop_map(
        |(cap, growth, lf)| {
            TableConfig::new()
                .with_initial_capacity(cap)
                .with_growth_factor(growth)
                .with_max_load_factor(lf)
        },
    )
}

// Property: State-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - `get` agrees with the model; missing keys are `None`.
// - `put` on an existing key keeps `len` and disposes the old value.
// - `delete` disposes exactly the removed value; absent keys are no-ops.
// - Every entry sits in the bucket its hash selects, `len` equals the
//   number of reachable entries, and the load threshold holds after each op.
// - Teardown disposes exactly the values still live.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine(config in arb_config(), (pool, ops) in arb_scenario()) {
        let disposed: Rc<RefCell<Vec<u32>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = disposed.clone();
        let mut sut: ChainedTable<u32, _> =
            ChainedTable::with_config(config, move |v: u32| sink.borrow_mut().push(v))
                .expect("valid config");
        let mut model: HashMap<String, u32> = HashMap::new();
        let mut expected_disposed: Vec<u32> = Vec::new();

        for op in ops {
            match op {
                OpI::Put(i, v) => {
                    let k = &pool[i];
                    let before = sut.capacity();
                    sut.put(k.as_str(), v).expect("put");
                    if let Some(old) = model.insert(k.clone(), v) {
                        expected_disposed.push(old);
                        prop_assert_eq!(sut.capacity(), before, "overwrite must not grow");
                    }
                    prop_assert!(sut.capacity() >= before, "capacity never shrinks");
                }
                OpI::Delete(i) => {
                    let k = &pool[i];
                    let removed = sut.delete(k);
                    match model.remove(k) {
                        Some(old) => {
                            prop_assert!(removed);
                            expected_disposed.push(old);
                        }
                        None => prop_assert!(!removed),
                    }
                }
                OpI::Get(i) => {
                    let k = &pool[i];
                    prop_assert_eq!(sut.get(k), model.get(k));
                    prop_assert_eq!(sut.contains_key(k), model.contains_key(k));
                }
                OpI::Mutate(i, d) => {
                    let k = &pool[i];
                    match (sut.get_mut(k), model.get_mut(k)) {
                        (Some(a), Some(b)) => {
                            *a = a.wrapping_add(d);
                            *b = b.wrapping_add(d);
                        }
                        (None, None) => {}
                        (a, b) => prop_assert!(false, "presence mismatch: {:?} vs {:?}", a, b),
                    }
                }
                OpI::Iterate => {
                    let seen: BTreeSet<(String, u32)> =
                        sut.iter().map(|(k, v)| (k.to_string(), *v)).collect();
                    let expected: BTreeSet<(String, u32)> =
                        model.iter().map(|(k, v)| (k.clone(), *v)).collect();
                    prop_assert_eq!(sut.iter().len(), model.len());
                    prop_assert_eq!(seen, expected);
                }
            }
            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(&*disposed.borrow(), &expected_disposed);
            sut.check_invariants();
        }

        drop(sut);
        let mut live: Vec<u32> = model.into_values().collect();
        let mut tail: Vec<u32> = disposed.borrow()[expected_disposed.len()..].to_vec();
        live.sort_unstable();
        tail.sort_unstable();
        prop_assert_eq!(tail, live);
    }
}
