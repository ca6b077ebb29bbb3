//! Fuzz harness for skip list operation streams
//!
//! Each pair of input bytes is one operation (insert, remove, search or
//! clear) checked against a `BTreeSet`. The first byte picks the level cap.

#![no_main]

use std::collections::BTreeSet;

use libfuzzer_sys::fuzz_target;
use strata_prng::Lcg;
use strata_skiplist::{SkipList, SkipListError};

fuzz_target!(|data: &[u8]| {
    let Some((&cap, ops)) = data.split_first() else {
        return;
    };

    let max_level = usize::from(cap % 8);
    let Ok(mut list) = SkipList::with_params(max_level, 0.5, Lcg::new(u64::from(cap))) else {
        return;
    };
    let mut model = BTreeSet::new();

    for chunk in ops.chunks_exact(2) {
        let value = chunk[1];
        match chunk[0] % 7 {
            0..=2 => assert_eq!(list.insert(value), model.insert(value)),
            3 | 4 => {
                let expected = if model.remove(&value) {
                    Ok(value)
                } else {
                    Err(SkipListError::NotFound)
                };
                assert_eq!(list.remove(&value), expected);
            }
            5 => assert_eq!(list.search(&value), model.get(&value)),
            _ => {
                list.clear();
                model.clear();
            }
        }
        assert_eq!(list.len(), model.len());
        assert!(list.level() <= max_level);
    }

    assert!(list.iter().eq(model.iter()));
});
