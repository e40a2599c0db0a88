//! Primary and secondary credentials for one endpoint

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Ordered credential list with a rotating cursor
///
/// Index 0 is the primary key. Rotation walks the secondaries and wraps
/// back to the primary.
pub struct CredentialRing {
    keys: Vec<String>,
    current: AtomicUsize,
}

impl CredentialRing {
    pub fn new(primary: impl Into<String>, secondaries: Vec<String>) -> Self {
        let mut keys = Vec::with_capacity(1 + secondaries.len());
        keys.push(primary.into());
        keys.extend(secondaries);

        Self {
            keys,
            current: AtomicUsize::new(0),
        }
    }

    /// Credential in use right now
    pub fn current(&self) -> &str {
        &self.keys[self.index()]
    }

    pub fn index(&self) -> usize {
        self.current.load(Ordering::Relaxed) % self.keys.len()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Advance to the next credential and return its index
    pub fn rotate(&self) -> usize {
        let len = self.keys.len();
        let previous = self
            .current
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |i| Some((i + 1) % len))
            .unwrap_or_else(|i| i);
        (previous + 1) % len
    }
}

impl fmt::Debug for CredentialRing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialRing")
            .field("keys", &format_args!("[{} redacted]", self.keys.len()))
            .field("current", &self.index())
            .finish()
    }
}
