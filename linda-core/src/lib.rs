//! linda-core - shared-memory Linda tuple space
//!
//! This crate provides the coordination engine: a multiset of tuples
//! that threads write to, read from, and take from by template.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      SharedSpace                         │
//! │               (one engine lock over all state)           │
//! ├──────────────────────────────────────────────────────────┤
//! │  ┌──────────────┐  ┌────────────────┐  ┌────────────────┐│
//! │  │  TupleStore  │  │ pending reads  │  │ pending takes  ││
//! │  │  (resident)  │  │ template→FIFO  │  │ template→FIFO  ││
//! │  └──────────────┘  └────────────────┘  └────────────────┘│
//! └───────────────────────────┬──────────────────────────────┘
//!                             │ callbacks, outside the lock
//!                  ┌──────────┴──────────┐
//!                  │  BlockingCallback   │ → parked read/take
//!                  │  user closures      │ → event_register
//!                  └─────────────────────┘
//! ```
//!
//! # Core Concepts
//!
//! ## Writes
//!
//! A write is offered, in order, to every pending reader whose template
//! matches, otherwise to the first pending taker whose template matches,
//! otherwise it is stored.
//!
//! ## Blocking operations
//!
//! `read` and `take` park the calling thread until a match arrives.
//! There is no timeout; a waiter is only released by a matching write.
//!
//! ## Registrations
//!
//! `event_register` queues a one-shot callback. Takers on one template
//! are served strictly first come, first served; readers on one
//! template are all served by the same write.
//!
//! # Example
//!
//! ```rust
//! use linda_core::{EventMode, EventTiming, Linda, SharedSpace};
//! use linda_types::{Field, FieldType, Template, Tuple, Value};
//! use std::sync::mpsc;
//!
//! let space = SharedSpace::new();
//! space.write(Tuple::new(vec![Value::from(2)]));
//! space.write(Tuple::new(vec![Value::from(3)]));
//!
//! let any_int = Template::new(vec![Field::wildcard(FieldType::Integer)]);
//! assert_eq!(space.read_all(&any_int).len(), 2);
//!
//! // Hear only about tuples written from now on
//! let (tx, rx) = mpsc::channel();
//! space.event_register(
//!     EventMode::Read,
//!     EventTiming::Future,
//!     any_int.clone(),
//!     Box::new(move |tuple: Tuple| {
//!         let _ = tx.send(tuple);
//!     }),
//! );
//! space.write(Tuple::new(vec![Value::from(5)]));
//! assert_eq!(rx.recv().unwrap(), Tuple::new(vec![Value::from(5)]));
//! ```

// Modules
pub mod blocking;
pub mod callback;
pub mod error;
pub mod registry;
pub mod snapshot;
pub mod space;
pub mod store;
pub mod types;

// Re-exports for convenience
pub use callback::Callback;
pub use error::{LindaError, Result};
pub use snapshot::{PendingQueue, SpaceSnapshot};
pub use space::{Linda, SharedSpace};
pub use store::{TupleStore, VecStore};
pub use types::{EventMode, EventTiming, RegistrationId};
