#![no_main]

use bitwindow::ds::IntrusiveList;
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary operation sequences on IntrusiveList
//
// Tests random sequences of try_push_front, pop_back, splice_merge and clear,
// mirroring every operation on a VecDeque model (front = newest).
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let capacity = 1 + usize::from(data[0] % 16);
    let mut list: IntrusiveList<u32> = IntrusiveList::with_fixed_capacity(capacity);
    let mut model: std::collections::VecDeque<u32> = std::collections::VecDeque::new();

    for pair in data[1..].chunks_exact(2) {
        let op = pair[0] % 4;
        let value = u32::from(pair[1]);

        match op {
            0 => {
                // try_push_front
                let result = list.try_push_front(value);
                if model.len() < capacity {
                    assert!(result.is_ok());
                    model.push_front(value);
                } else {
                    assert!(result.is_err());
                }
            }
            1 => {
                // pop_back
                assert_eq!(list.pop_back(), model.pop_back());
            }
            2 => {
                // splice_merge at a position chosen by value
                let ids = list.debug_snapshot_ids();
                if ids.len() >= 2 {
                    let pos = (value as usize) % (ids.len() - 1);
                    let (newer, older) = (ids[pos], ids[pos + 1]);
                    assert!(list.splice_merge(older, newer, |kept, absorbed| {
                        *kept = kept.wrapping_add(absorbed)
                    }));
                    let absorbed = model.remove(pos + 1).unwrap();
                    model[pos] = model[pos].wrapping_add(absorbed);

                    // `older` is released now, so it can no longer be spliced.
                    assert!(!list.splice_merge(newer, older, |_, _| {}));
                }
            }
            3 => {
                // clear
                list.clear();
                model.clear();
            }
            _ => unreachable!(),
        }

        assert_eq!(list.len(), model.len());
        assert!(list.iter().copied().eq(model.iter().copied()));
        list.debug_validate_invariants();
    }
});
