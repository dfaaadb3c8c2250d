//! One-shot delivery callbacks
//!
//! A callback is handed to the space with a registration and invoked
//! exactly once with the delivered tuple. The space never holds its
//! engine lock while a callback runs, so a callback may call back into
//! the space. It must not block indefinitely: the delivering thread is
//! usually a writer.

use linda_types::Tuple;

/// Trait for receiving a delivered tuple
pub trait Callback: Send {
    /// Consume the callback with the tuple it was waiting for
    fn call(self: Box<Self>, tuple: Tuple);
}

impl<F> Callback for F
where
    F: FnOnce(Tuple) + Send,
{
    fn call(self: Box<Self>, tuple: Tuple) {
        (*self)(tuple)
    }
}
