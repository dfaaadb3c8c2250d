//! Tuple space abstraction
//!
//! A tuple space is a shared multiset of tuples that threads coordinate
//! through by pattern:
//! - Writing tuples (never fails, never blocks)
//! - Reading or taking a tuple that matches a template, either waiting
//!   for one to appear or polling
//! - Registering a callback to be told about a match later
//!
//! This module provides:
//! - `Linda` trait: The operations every space offers
//! - `SharedSpace`: The shared-memory implementation

mod shared;

pub use shared::SharedSpace;

use crate::callback::Callback;
use crate::error::Result;
use crate::types::{EventMode, EventTiming};
use linda_types::{Template, Tuple};

/// Core trait for tuple space implementations
///
/// The trait is object safe so that drivers such as script
/// interpreters can work against `&dyn Linda`.
pub trait Linda: Send + Sync {
    /// Deposit a tuple
    ///
    /// Every waiting reader on a matching template is served. If no reader
    /// matched, the oldest waiting taker on the first matching template
    /// gets it instead; only if nobody was waiting is the tuple stored.
    fn write(&self, tuple: Tuple);

    /// Block until a tuple matching the template exists and return a
    /// copy of it; the tuple stays in the space
    fn read(&self, template: &Template) -> Tuple;

    /// Block until a tuple matching the template exists and remove it
    fn take(&self, template: &Template) -> Tuple;

    /// Copy of a matching tuple if one is resident right now
    fn try_read(&self, template: &Template) -> Option<Tuple>;

    /// Remove a matching tuple if one is resident right now
    fn try_take(&self, template: &Template) -> Option<Tuple>;

    /// Atomic snapshot of every resident tuple matching the template
    fn read_all(&self, template: &Template) -> Vec<Tuple>;

    /// Remove matching tuples until none are left
    ///
    /// Each removal is atomic but the loop as a whole is not: tuples
    /// written concurrently may or may not be collected.
    fn take_all(&self, template: &Template) -> Vec<Tuple> {
        std::iter::from_fn(|| self.try_take(template)).collect()
    }

    /// Register a callback for a matching tuple
    ///
    /// With [`EventTiming::Immediate`] a resident tuple is delivered
    /// right away if one matches. With [`EventTiming::Future`] only a
    /// later write can satisfy the registration.
    fn event_register(
        &self,
        mode: EventMode,
        timing: EventTiming,
        template: Template,
        callback: Box<dyn Callback>,
    );

    /// Print the space contents and waiters, each line prefixed by `label`
    fn debug(&self, label: &str);

    /// Write a template that must be fully bound
    ///
    /// Fails with a contract violation if any field is a wildcard;
    /// nothing is written in that case.
    fn write_template(&self, template: &Template) -> Result<()> {
        let tuple = template.to_tuple()?;
        self.write(tuple);
        Ok(())
    }
}
