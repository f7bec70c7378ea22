#![no_main]

use bitwindow::ds::SlotArena;
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary operation sequences on the fixed-capacity SlotArena
//
// Tests random sequences of try_insert, remove, get_mut and clear, checking
// that the arena never grows and that the free list accounts for every slot.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let capacity = usize::from(data[0] % 32);
    let mut arena: SlotArena<u32> = SlotArena::with_fixed_capacity(capacity);
    let mut all_ids = Vec::new();

    for pair in data[1..].chunks_exact(2) {
        let op = pair[0] % 5;
        let value = u32::from(pair[1]);

        match op {
            0 => {
                // try_insert
                let was_full = arena.is_full();
                match arena.try_insert(value) {
                    Ok(id) => {
                        assert!(!was_full);
                        assert!(id.index() < capacity);
                        assert_eq!(arena.get(id), Some(&value));
                        all_ids.push(id);
                    }
                    Err(err) => {
                        assert!(was_full);
                        assert_eq!(err.capacity(), capacity);
                        assert_eq!(arena.len(), capacity);
                    }
                }
            }
            1 => {
                // remove
                if !all_ids.is_empty() {
                    let id = all_ids[(value as usize) % all_ids.len()];
                    let old_len = arena.len();
                    if arena.remove(id).is_some() {
                        assert_eq!(arena.len(), old_len - 1);
                        assert!(!arena.contains(id));
                    } else {
                        assert_eq!(arena.len(), old_len);
                    }
                }
            }
            2 => {
                // get_mut
                if !all_ids.is_empty() {
                    let id = all_ids[(value as usize) % all_ids.len()];
                    if let Some(slot) = arena.get_mut(id) {
                        *slot = value;
                        assert_eq!(arena.get(id), Some(&value));
                    }
                }
            }
            3 => {
                // clear
                arena.clear();
                all_ids.clear();
                assert!(arena.is_empty());
            }
            4 => {
                // iter agrees with len
                assert_eq!(arena.iter().count(), arena.len());
            }
            _ => unreachable!(),
        }

        assert_eq!(arena.capacity(), capacity);
        assert!(arena.len() <= capacity);
        arena.debug_validate_invariants();
    }
});
