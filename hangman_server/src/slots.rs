// Fixed-capacity admission table.
//
// Each slot is either free or held by one running session. The mutex guards
// only the scan-and-flip of slot flags; it is never held across socket I/O.
// `acquire` hands out a `SlotLease` that frees its slot when dropped, so a
// handler thread releases its slot on every exit path, including panics.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use hangman_protocol::SlotId;
use hangman_protocol::types::MAX_CLIENTS;

/// Shared handle to the slot table.
#[derive(Clone, Debug)]
pub struct SlotPool {
    slots: Arc<Mutex<Vec<bool>>>,
}

impl Default for SlotPool {
    fn default() -> Self {
        Self::new(MAX_CLIENTS)
    }
}

impl SlotPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Arc::new(Mutex::new(vec![false; capacity])),
        }
    }

    fn table(&self) -> MutexGuard<'_, Vec<bool>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn capacity(&self) -> usize {
        self.table().len()
    }

    /// Number of slots currently held.
    pub fn occupied(&self) -> usize {
        self.table().iter().filter(|&&held| held).count()
    }

    /// Claim the lowest free slot, or `None` when every slot is held.
    pub fn acquire(&self) -> Option<SlotLease> {
        let mut table = self.table();
        let index = table.iter().position(|&held| !held)?;
        table[index] = true;
        Some(SlotLease {
            id: SlotId(index),
            pool: self.clone(),
        })
    }

    /// Mark a slot free. Releasing a free or unknown slot does nothing.
    pub fn release(&self, id: SlotId) {
        if let Some(held) = self.table().get_mut(id.0) {
            *held = false;
        }
    }
}

/// Ownership of one slot; frees it on drop.
#[derive(Debug)]
pub struct SlotLease {
    id: SlotId,
    pool: SlotPool,
}

impl SlotLease {
    pub fn id(&self) -> SlotId {
        self.id
    }
}

impl Drop for SlotLease {
    fn drop(&mut self) {
        self.pool.release(self.id);
    }
}
