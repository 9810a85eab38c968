//! Ports for the relay gateway.

pub mod outbound;

pub use outbound::{BackendError, JournalBackend, SystemTimeSource, TimeSource};
