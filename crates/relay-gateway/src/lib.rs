//! # Relay Gateway - HTTP surface of the journal relay.
//!
//! Four endpoints behind permissive CORS:
//!
//! - `POST /submit_journal` - sign and submit a new entry
//! - `GET  /journal_entries` - filtered, sorted, paginated listing
//! - `POST /vote_journal` - vote on an existing entry
//! - `GET  /health` - wallet / node / store diagnostics
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     RELAY GATEWAY                        │
//! ├──────────────────────────────────────────────────────────┤
//! │   Router (axum) ── CORS layer ── per-request handlers    │
//! │                        │                                 │
//! │              JournalBackend (outbound port)              │
//! │               ┌────────┴─────────┐                       │
//! │        LedgerBackend       MemoryBackend                 │
//! │   (sign + submit via RPC)  (in-process list)             │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The active backend is selected by configuration at startup; the HTTP
//! contract is identical either way. All mutable state lives behind the
//! port, handlers receive the service context by axum `State`.

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod adapters;
pub mod domain;
pub mod middleware;
pub mod ports;
pub mod router;
pub mod service;

// Re-exports for public API
pub use domain::config::{BackendMode, GatewayConfig, HttpConfig, LedgerConfig};
pub use domain::error::{ApiError, GatewayError};
pub use domain::types::*;
pub use ports::outbound::{BackendError, JournalBackend, SystemTimeSource, TimeSource};
pub use router::{build_router, AppState};
pub use service::GatewayService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
