//! Pending registrations grouped by template
//!
//! A `PendingRegistry` maps each distinct template to a FIFO queue of
//! waiting callbacks. The space keeps two of them, one for reads and one
//! for takes.
//!
//! Lookups against an incoming tuple scan every template key with
//! `matches`: one tuple can satisfy many structurally different
//! templates once wildcards are involved, so a keyed lookup would miss
//! waiters.

use crate::callback::Callback;
use crate::types::RegistrationId;
use linda_types::{Template, Tuple};
use std::collections::{HashMap, VecDeque};
use std::fmt;

/// A queued callback together with its identifier
pub struct Registration {
    pub id: RegistrationId,
    callback: Box<dyn Callback>,
}

impl Registration {
    pub fn new(callback: Box<dyn Callback>) -> Self {
        Self {
            id: RegistrationId::new(),
            callback,
        }
    }

    /// Deliver the tuple, consuming the registration
    pub fn deliver(self, tuple: Tuple) {
        self.callback.call(tuple);
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration").field("id", &self.id).finish()
    }
}

/// Template-keyed FIFO queues of waiting registrations
#[derive(Debug, Default)]
pub struct PendingRegistry {
    queues: HashMap<Template, VecDeque<Registration>>,
}

impl PendingRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a registration to the queue of an equal template,
    /// creating the queue if needed
    pub fn enqueue(&mut self, template: Template, registration: Registration) {
        self.queues.entry(template).or_default().push_back(registration);
    }

    /// Pop the head of the first queue whose template the tuple matches
    ///
    /// The queue entry is dropped once it runs empty.
    pub fn pop_first_match(&mut self, tuple: &Tuple) -> Option<Registration> {
        let template = self.queues.keys().find(|t| tuple.matches(t))?.clone();
        let queue = self.queues.get_mut(&template)?;
        let registration = queue.pop_front();
        if queue.is_empty() {
            self.queues.remove(&template);
        }
        registration
    }

    /// Remove every queue whose template the tuple matches and return
    /// all of their registrations, each queue in FIFO order
    pub fn drain_matching(&mut self, tuple: &Tuple) -> Vec<Registration> {
        let templates: Vec<Template> = self
            .queues
            .keys()
            .filter(|t| tuple.matches(t))
            .cloned()
            .collect();

        templates
            .iter()
            .filter_map(|t| self.queues.remove(t))
            .flatten()
            .collect()
    }

    /// Number of distinct templates with waiters
    pub fn len(&self) -> usize {
        self.queues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queues.is_empty()
    }

    /// Total number of queued registrations across all templates
    pub fn waiting(&self) -> usize {
        self.queues.values().map(VecDeque::len).sum()
    }

    /// Templates with their queue depths (for diagnostics)
    pub fn queues(&self) -> impl Iterator<Item = (&Template, usize)> {
        self.queues.iter().map(|(t, q)| (t, q.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linda_types::{Field, FieldType, Value};
    use std::sync::{Arc, Mutex};

    type Log = Arc<Mutex<Vec<(&'static str, Tuple)>>>;

    fn recorder(log: &Log, tag: &'static str) -> Registration {
        let log = log.clone();
        Registration::new(Box::new(move |tuple: Tuple| {
            log.lock().unwrap().push((tag, tuple));
        }))
    }

    fn int(n: i64) -> Tuple {
        Tuple::new(vec![Value::from(n)])
    }

    fn any_int() -> Template {
        Template::new(vec![Field::wildcard(FieldType::Integer)])
    }

    #[test]
    fn test_equal_templates_share_a_queue() {
        let log = Log::default();
        let mut registry = PendingRegistry::new();

        registry.enqueue(any_int(), recorder(&log, "a"));
        registry.enqueue(any_int(), recorder(&log, "b"));
        registry.enqueue(Template::from(int(1)), recorder(&log, "c"));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.waiting(), 3);
    }

    #[test]
    fn test_pop_is_fifo_and_cleans_up() {
        let log = Log::default();
        let mut registry = PendingRegistry::new();
        registry.enqueue(any_int(), recorder(&log, "first"));
        registry.enqueue(any_int(), recorder(&log, "second"));

        registry.pop_first_match(&int(1)).unwrap().deliver(int(1));
        assert_eq!(registry.len(), 1);
        registry.pop_first_match(&int(2)).unwrap().deliver(int(2));
        assert!(registry.is_empty());
        assert!(registry.pop_first_match(&int(3)).is_none());

        let log = log.lock().unwrap();
        assert_eq!(log[0], ("first", int(1)));
        assert_eq!(log[1], ("second", int(2)));
    }

    #[test]
    fn test_wildcard_keys_are_found_by_scan() {
        let log = Log::default();
        let mut registry = PendingRegistry::new();
        registry.enqueue(
            Template::new(vec![Field::bound("job"), Field::wildcard(FieldType::Integer)]),
            recorder(&log, "worker"),
        );

        let job = Tuple::new(vec![Value::from("job"), Value::from(4)]);
        assert!(registry.pop_first_match(&int(4)).is_none());
        assert!(registry.pop_first_match(&job).is_some());
    }

    #[test]
    fn test_drain_takes_every_matching_queue() {
        let log = Log::default();
        let mut registry = PendingRegistry::new();
        registry.enqueue(any_int(), recorder(&log, "wild-1"));
        registry.enqueue(any_int(), recorder(&log, "wild-2"));
        registry.enqueue(Template::from(int(9)), recorder(&log, "exact"));
        registry.enqueue(Template::from(int(8)), recorder(&log, "other"));

        let drained = registry.drain_matching(&int(9));
        assert_eq!(drained.len(), 3);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.waiting(), 1);

        for registration in drained {
            registration.deliver(int(9));
        }
        let tags: Vec<_> = log.lock().unwrap().iter().map(|(tag, _)| *tag).collect();
        let wild_1 = tags.iter().position(|t| *t == "wild-1").unwrap();
        let wild_2 = tags.iter().position(|t| *t == "wild-2").unwrap();
        assert!(wild_1 < wild_2);
    }
}
