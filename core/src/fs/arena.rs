//! Generational node storage
//!
//! Nodes live in slots addressed by an [`Id`]. Freed slots are reused, and
//! every reuse bumps the slot's generation so an id held past a removal
//! resolves to nothing instead of to the slot's new occupant.

use alloc::vec::Vec;

/// Handle to a slot in an [`Arena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id {
    index: u32,
    generation: u32,
}

impl Id {
    /// Slot index, stable while the node is alive
    pub const fn index(&self) -> usize {
        self.index as usize
    }
}

enum Slot<T> {
    Occupied { generation: u32, value: T },
    Free { generation: u32, next_free: Option<u32> },
}

/// Fixed-capacity arena with generation-checked handles
pub struct Arena<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<u32>,
    len: usize,
    capacity: usize,
}

impl<T> Arena<T> {
    /// Create an arena that holds at most `capacity` live values
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::new(),
            free_head: None,
            len: 0,
            capacity,
        }
    }

    /// Create an arena whose first slot holds `value`
    pub fn with_first(capacity: usize, value: T) -> (Self, Id) {
        let mut slots = Vec::new();
        slots.push(Slot::Occupied { generation: 0, value });
        let arena = Self {
            slots,
            free_head: None,
            len: 1,
            capacity: capacity.max(1),
        };
        (arena, Id { index: 0, generation: 0 })
    }

    /// Number of live values
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if nothing is stored
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Maximum number of live values
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Store `value`, or hand it back when the arena is full
    pub fn insert(&mut self, value: T) -> Result<Id, T> {
        if self.len >= self.capacity {
            return Err(value);
        }

        if let Some(index) = self.free_head {
            let slot = &mut self.slots[index as usize];
            let (generation, next_free) = match slot {
                Slot::Free { generation, next_free } => (generation.wrapping_add(1), *next_free),
                Slot::Occupied { .. } => return Err(value),
            };
            *slot = Slot::Occupied { generation, value };
            self.free_head = next_free;
            self.len += 1;
            return Ok(Id { index, generation });
        }

        if self.slots.try_reserve(1).is_err() {
            return Err(value);
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot::Occupied { generation: 0, value });
        self.len += 1;
        Ok(Id { index, generation: 0 })
    }

    /// Borrow the value behind `id` if it is still alive
    pub fn get(&self, id: Id) -> Option<&T> {
        match self.slots.get(id.index())? {
            Slot::Occupied { generation, value } if *generation == id.generation => Some(value),
            _ => None,
        }
    }

    /// Mutably borrow the value behind `id` if it is still alive
    pub fn get_mut(&mut self, id: Id) -> Option<&mut T> {
        match self.slots.get_mut(id.index())? {
            Slot::Occupied { generation, value } if *generation == id.generation => Some(value),
            _ => None,
        }
    }

    /// Remove and return the value behind `id`
    pub fn remove(&mut self, id: Id) -> Option<T> {
        let slot = self.slots.get_mut(id.index())?;
        match slot {
            Slot::Occupied { generation, .. } if *generation == id.generation => {}
            _ => return None,
        }

        let freed = Slot::Free {
            generation: id.generation,
            next_free: self.free_head,
        };
        let old = core::mem::replace(slot, freed);
        self.free_head = Some(id.index);
        self.len -= 1;
        match old {
            Slot::Occupied { value, .. } => Some(value),
            Slot::Free { .. } => None,
        }
    }

    /// Drop every value; outstanding ids become stale
    pub fn clear(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if let Slot::Occupied { generation, .. } = slot {
                let generation = *generation;
                *slot = Slot::Free {
                    generation,
                    next_free: self.free_head,
                };
                self.free_head = Some(index as u32);
            }
        }
        self.len = 0;
    }
}
