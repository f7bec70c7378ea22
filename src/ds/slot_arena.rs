//! Fixed-capacity slot arena with an intrusive free list.
//!
//! All slots are allocated once at construction. Vacant slots are chained
//! through their own storage, so acquiring and releasing a slot is a pop or
//! push on the free-list head and never touches the allocator.
//!
//! ## Architecture
//!
//! ```text
//!   slots: Vec<Slot<T>>   (len == capacity, never grows)
//!   ┌─────┬──────────────────────────┐
//!   │ idx │ slot                     │
//!   ├─────┼──────────────────────────┤
//!   │  0  │ Occupied(A)              │
//!   │  1  │ Vacant { next_free: 3 }  │ ◄── free_head
//!   │  2  │ Occupied(B)              │
//!   │  3  │ Vacant { next_free: - }  │
//!   └─────┴──────────────────────────┘
//! ```
//!
//! ## Performance
//! - `try_insert` / `remove`: O(1)
//! - `get` / `get_mut` / `contains`: O(1)
//! - `iter` / `clear`: O(capacity)
use std::mem;

use crate::error::CapacityError;

/// Stable handle to a slot in a [`SlotArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(pub(crate) usize);

impl SlotId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
enum Slot<T> {
    Occupied(T),
    Vacant { next_free: Option<usize> },
}

/// Pre-sized pool of `T` slots addressed by [`SlotId`].
#[derive(Debug)]
pub struct SlotArena<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<usize>,
    len: usize,
}

impl<T> SlotArena<T> {
    /// Creates an arena with exactly `capacity` slots, all on the free list.
    pub fn with_fixed_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.extend((0..capacity).map(|idx| Slot::Vacant {
            next_free: (idx + 1 < capacity).then_some(idx + 1),
        }));
        Self {
            slots,
            free_head: (capacity > 0).then_some(0),
            len: 0,
        }
    }

    /// Stores `value` in the slot at the free-list head.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError`] when every slot is occupied.
    pub fn try_insert(&mut self, value: T) -> Result<SlotId, CapacityError> {
        let idx = self
            .free_head
            .ok_or_else(|| CapacityError::new(self.slots.len()))?;
        let previous = mem::replace(&mut self.slots[idx], Slot::Occupied(value));
        self.free_head = match previous {
            Slot::Vacant { next_free } => next_free,
            Slot::Occupied(_) => unreachable!("free list points at an occupied slot"),
        };
        self.len += 1;
        Ok(SlotId(idx))
    }

    /// Takes the value out of `id` and pushes the slot onto the free list.
    ///
    /// Returns `None` if `id` is out of range or already vacant.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let slot = self.slots.get_mut(id.0)?;
        if matches!(slot, Slot::Vacant { .. }) {
            return None;
        }
        let taken = mem::replace(
            slot,
            Slot::Vacant {
                next_free: self.free_head,
            },
        );
        self.free_head = Some(id.0);
        self.len -= 1;
        match taken {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        match self.slots.get(id.0)? {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        match self.slots.get_mut(id.0)? {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant { .. } => None,
        }
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if no free slot is left.
    pub fn is_full(&self) -> bool {
        self.free_head.is_none()
    }

    /// Returns the fixed number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Releases every slot and re-threads the free list in index order.
    pub fn clear(&mut self) {
        let capacity = self.slots.len();
        for (idx, slot) in self.slots.iter_mut().enumerate() {
            *slot = Slot::Vacant {
                next_free: (idx + 1 < capacity).then_some(idx + 1),
            };
        }
        self.free_head = (capacity > 0).then_some(0);
        self.len = 0;
    }

    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| match slot {
                Slot::Occupied(value) => Some((SlotId(idx), value)),
                Slot::Vacant { .. } => None,
            })
    }

    /// Returns the bytes of slot storage committed at construction.
    pub fn approx_bytes(&self) -> usize {
        self.slots.capacity() * mem::size_of::<Slot<T>>()
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        let mut free = 0usize;
        let mut current = self.free_head;
        while let Some(idx) = current {
            free += 1;
            assert!(free <= self.slots.len(), "free list cycle");
            match self.slots[idx] {
                Slot::Vacant { next_free } => current = next_free,
                Slot::Occupied(_) => panic!("free list reaches occupied slot {idx}"),
            }
        }
        assert_eq!(free + self.len, self.slots.len());
        assert_eq!(self.iter().count(), self.len);
    }
}
