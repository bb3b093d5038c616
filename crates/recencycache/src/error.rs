//! Error types for recencycache

use std::fmt;

/// Error returned by a listener callback
pub type ListenerError = Box<dyn std::error::Error + Send + Sync>;

/// Result type alias for recencycache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced by cache operations
///
/// Lookups that miss and evictions from an empty cache are not errors. The
/// only failure is a listener rejecting an event, which is reported after the
/// mutation that raised the event has been applied.
#[derive(Debug)]
pub enum Error {
    /// The put listener failed; the insert or update is already applied
    PutListener(ListenerError),

    /// The eviction listener failed; the entry is already removed
    EvictionListener(ListenerError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::PutListener(e) => write!(f, "Put listener failed: {}", e),
            Error::EvictionListener(e) => write!(f, "Eviction listener failed: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::PutListener(e) | Error::EvictionListener(e) => Some(&**e),
        }
    }
}
