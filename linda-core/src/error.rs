//! Error types for the tuple space engine
//!
//! Lookups never fail: a missing match is `None` from the `try_*`
//! operations or continued blocking from `read`/`take`. Errors exist
//! only for callers that break the tuple contract.

use linda_types::TupleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LindaError {
    /// A tuple or template violated the tuple contract
    #[error("Tuple contract violation: {0}")]
    Contract(#[from] TupleError),
}

/// Result type using LindaError
pub type Result<T> = std::result::Result<T, LindaError>;
