//! Blocking adapter for synchronous `read`/`take`
//!
//! Each blocking call creates a fresh one-shot slot: the sending half is
//! registered with the space as an ordinary [`Callback`], the receiving
//! half parks the caller on a private condition variable. The engine
//! lock is never held while the slot is filled, and the waiter never
//! touches the engine lock while parked.

use crate::callback::Callback;
use crate::types::EventMode;
use linda_types::Tuple;
use parking_lot::{Condvar, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Default)]
struct Slot {
    value: Mutex<Option<Tuple>>,
    ready: Condvar,
}

/// Sending half of a one-shot slot
pub struct BlockingCallback {
    slot: Arc<Slot>,
}

/// Receiving half of a one-shot slot
pub struct BlockingWait {
    slot: Arc<Slot>,
}

/// Create a connected callback/waiter pair
pub fn blocking_pair() -> (BlockingCallback, BlockingWait) {
    let slot = Arc::new(Slot::default());
    (
        BlockingCallback { slot: slot.clone() },
        BlockingWait { slot },
    )
}

impl Callback for BlockingCallback {
    fn call(self: Box<Self>, tuple: Tuple) {
        let mut value = self.slot.value.lock();
        *value = Some(tuple);
        self.slot.ready.notify_one();
    }
}

impl BlockingWait {
    /// Park until the slot is filled
    ///
    /// There is no timeout. Wakeups that find the slot still empty are
    /// spurious and the wait resumes.
    pub fn wait(self) -> Tuple {
        let mut value = self.slot.value.lock();
        loop {
            if let Some(tuple) = value.take() {
                return tuple;
            }
            self.slot.ready.wait(&mut value);
        }
    }
}

/// Counts of threads currently inside blocking `read` and `take`
#[derive(Debug, Default)]
pub struct ParkedCounts {
    reads: AtomicUsize,
    takes: AtomicUsize,
}

impl ParkedCounts {
    fn counter(&self, mode: EventMode) -> &AtomicUsize {
        match mode {
            EventMode::Read => &self.reads,
            EventMode::Take => &self.takes,
        }
    }

    /// Count the calling thread for `mode` until the guard drops
    pub fn enter(&self, mode: EventMode) -> ParkedGuard<'_> {
        self.counter(mode).fetch_add(1, Ordering::SeqCst);
        ParkedGuard { counts: self, mode }
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn takes(&self) -> usize {
        self.takes.load(Ordering::SeqCst)
    }
}

/// Releases one parked count on drop
pub struct ParkedGuard<'a> {
    counts: &'a ParkedCounts,
    mode: EventMode,
}

impl Drop for ParkedGuard<'_> {
    fn drop(&mut self) {
        self.counts.counter(self.mode).fetch_sub(1, Ordering::SeqCst);
    }
}
