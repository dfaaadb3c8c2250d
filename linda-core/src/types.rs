//! Identity and mode types for the tuple space

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Which grouping a registration waits in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventMode {
    /// Non-destructive: the matching tuple stays in the space
    Read,
    /// Destructive: the matching tuple is removed
    Take,
}

/// When a registration may be satisfied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTiming {
    /// Check resident tuples first, wait only if none match
    Immediate,
    /// Ignore resident tuples, fire only on a later write
    Future,
}

impl fmt::Display for EventMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventMode::Read => f.write_str("read"),
            EventMode::Take => f.write_str("take"),
        }
    }
}

/// Registration identifier
///
/// Assigned to every pending registration so deliveries can be traced
/// back to the call that queued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegistrationId(pub u64);

static REGISTRATION_COUNTER: AtomicU64 = AtomicU64::new(1);

impl RegistrationId {
    /// Create a new unique registration ID
    pub fn new() -> Self {
        Self(REGISTRATION_COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl Default for RegistrationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "reg:{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_id_ordering() {
        let r1 = RegistrationId::new();
        let r2 = RegistrationId::new();
        assert!(r1 < r2);
    }
}
