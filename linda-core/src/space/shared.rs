//! Shared-memory tuple space
//!
//! All state (the store and both pending registries) sits behind one
//! mutex, the engine lock. Every decision about where a tuple goes is
//! made while holding it; callbacks are collected during the decision
//! and invoked only after the lock is released.

use super::Linda;
use crate::blocking::{blocking_pair, ParkedCounts};
use crate::callback::Callback;
use crate::registry::{PendingRegistry, Registration};
use crate::snapshot::{PendingQueue, SpaceSnapshot};
use crate::store::{TupleStore, VecStore};
use crate::types::{EventMode, EventTiming};
use linda_types::{Template, Tuple};
use parking_lot::Mutex;

struct SpaceState<S> {
    store: S,
    pending_reads: PendingRegistry,
    pending_takes: PendingRegistry,
}

impl<S> SpaceState<S> {
    fn registry(&self, mode: EventMode) -> &PendingRegistry {
        match mode {
            EventMode::Read => &self.pending_reads,
            EventMode::Take => &self.pending_takes,
        }
    }

    fn registry_mut(&mut self, mode: EventMode) -> &mut PendingRegistry {
        match mode {
            EventMode::Read => &mut self.pending_reads,
            EventMode::Take => &mut self.pending_takes,
        }
    }
}

/// A registration paired with the tuple it is about to receive
struct Delivery {
    registration: Registration,
    tuple: Tuple,
}

fn deliver_all(deliveries: Vec<Delivery>) {
    for Delivery {
        registration,
        tuple,
    } in deliveries
    {
        tracing::trace!("delivering {} to {}", tuple, registration.id);
        registration.deliver(tuple);
    }
}

fn pending_queues(registry: &PendingRegistry) -> Vec<PendingQueue> {
    let mut queues: Vec<PendingQueue> = registry
        .queues()
        .map(|(template, waiting)| PendingQueue {
            template: template.clone(),
            waiting,
        })
        .collect();
    // Registry iteration order is arbitrary; keep reports stable
    queues.sort_by_cached_key(|q| q.template.to_string());
    queues
}

/// A shared-memory tuple space
///
/// Share it between threads with an `Arc`. The store type defaults to
/// the insertion-ordered [`VecStore`].
///
/// # Example
///
/// ```
/// use linda_core::{Linda, SharedSpace};
/// use linda_types::{Field, FieldType, Template, Tuple, Value};
/// use std::sync::Arc;
/// use std::thread;
///
/// let space = Arc::new(SharedSpace::new());
/// let any_int = Template::new(vec![Field::wildcard(FieldType::Integer)]);
///
/// let consumer = {
///     let space = space.clone();
///     let any_int = any_int.clone();
///     thread::spawn(move || space.take(&any_int))
/// };
///
/// space.write(Tuple::new(vec![Value::from(42)]));
/// assert_eq!(consumer.join().unwrap(), Tuple::new(vec![Value::from(42)]));
/// assert_eq!(space.try_read(&any_int), None);
/// ```
pub struct SharedSpace<S: TupleStore = VecStore> {
    name: String,
    state: Mutex<SpaceState<S>>,
    parked: ParkedCounts,
}

impl SharedSpace<VecStore> {
    /// Create an empty space with the default store
    pub fn new() -> Self {
        Self::named("linda")
    }

    /// Create an empty, named space with the default store
    pub fn named(name: impl Into<String>) -> Self {
        Self::with_store(name, VecStore::new())
    }
}

impl Default for SharedSpace<VecStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: TupleStore> SharedSpace<S> {
    /// Create a space over a custom store
    pub fn with_store(name: impl Into<String>, store: S) -> Self {
        Self {
            name: name.into(),
            state: Mutex::new(SpaceState {
                store,
                pending_reads: PendingRegistry::new(),
                pending_takes: PendingRegistry::new(),
            }),
            parked: ParkedCounts::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of resident tuples
    pub fn size(&self) -> usize {
        self.state.lock().store.len()
    }

    /// Threads currently blocked in `read`
    pub fn pending_reads(&self) -> usize {
        self.parked.reads()
    }

    /// Threads currently blocked in `take`
    pub fn pending_takes(&self) -> usize {
        self.parked.takes()
    }

    /// Threads currently blocked in `read` or `take`
    pub fn active_processes(&self) -> usize {
        self.pending_reads() + self.pending_takes()
    }

    /// Number of registrations queued in the given grouping
    ///
    /// Unlike [`pending_reads`](Self::pending_reads) this includes
    /// callback registrations, not only blocked threads.
    pub fn queued(&self, mode: EventMode) -> usize {
        self.state.lock().registry(mode).waiting()
    }

    /// Capture the store and both registries under the engine lock
    pub fn snapshot(&self) -> SpaceSnapshot {
        let state = self.state.lock();
        SpaceSnapshot {
            name: self.name.clone(),
            tuples: state.store.iter().cloned().collect(),
            pending_reads: pending_queues(&state.pending_reads),
            pending_takes: pending_queues(&state.pending_takes),
            parked_reads: self.parked.reads(),
            parked_takes: self.parked.takes(),
        }
    }

    /// Register through `event_register` and park until delivery
    fn block_on(&self, mode: EventMode, template: &Template) -> Tuple {
        let _parked = self.parked.enter(mode);
        let (callback, wait) = blocking_pair();
        self.event_register(mode, EventTiming::Immediate, template.clone(), Box::new(callback));
        let tuple = wait.wait();
        tracing::debug!("{}: {} {} resumed with {}", self.name, mode, template, tuple);
        tuple
    }
}

impl<S: TupleStore> Linda for SharedSpace<S> {
    fn write(&self, tuple: Tuple) {
        tracing::trace!("{}: write {}", self.name, tuple);

        let deliveries = {
            let mut state = self.state.lock();

            let readers = state.pending_reads.drain_matching(&tuple);
            if !readers.is_empty() {
                tracing::debug!(
                    "{}: {} served {} pending reads",
                    self.name,
                    tuple,
                    readers.len()
                );
                readers
                    .into_iter()
                    .map(|registration| Delivery {
                        registration,
                        tuple: tuple.clone(),
                    })
                    .collect()
            } else if let Some(registration) = state.pending_takes.pop_first_match(&tuple) {
                tracing::debug!(
                    "{}: {} served pending take {}",
                    self.name,
                    tuple,
                    registration.id
                );
                vec![Delivery {
                    registration,
                    tuple,
                }]
            } else {
                state.store.insert(tuple);
                Vec::new()
            }
        };

        deliver_all(deliveries);
    }

    fn read(&self, template: &Template) -> Tuple {
        self.block_on(EventMode::Read, template)
    }

    fn take(&self, template: &Template) -> Tuple {
        self.block_on(EventMode::Take, template)
    }

    fn try_read(&self, template: &Template) -> Option<Tuple> {
        self.state.lock().store.first_match(template)
    }

    fn try_take(&self, template: &Template) -> Option<Tuple> {
        self.state.lock().store.remove_first_match(template)
    }

    fn read_all(&self, template: &Template) -> Vec<Tuple> {
        self.state.lock().store.matching(template)
    }

    fn event_register(
        &self,
        mode: EventMode,
        timing: EventTiming,
        template: Template,
        callback: Box<dyn Callback>,
    ) {
        let mut state = self.state.lock();

        let resident = match (timing, mode) {
            (EventTiming::Immediate, EventMode::Take) => state.store.remove_first_match(&template),
            (EventTiming::Immediate, EventMode::Read) => state.store.first_match(&template),
            (EventTiming::Future, _) => None,
        };

        match resident {
            Some(tuple) => {
                drop(state);
                tracing::trace!("{}: {} {} satisfied immediately", self.name, mode, template);
                callback.call(tuple);
            }
            None => {
                let registration = Registration::new(callback);
                tracing::debug!(
                    "{}: queued {} {} as {}",
                    self.name,
                    mode,
                    template,
                    registration.id
                );
                state.registry_mut(mode).enqueue(template, registration);
            }
        }
    }

    fn debug(&self, label: &str) {
        print!("{}", self.snapshot().render(label));
    }
}
