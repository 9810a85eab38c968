//! Domain types for the relay gateway: configuration, error taxonomy, and
//! the request/response DTOs with the pure listing pipeline.

pub mod config;
pub mod error;
pub mod types;

pub use config::{BackendMode, ConfigError, GatewayConfig, HttpConfig, LedgerConfig};
pub use error::{ApiError, GatewayError};
pub use types::*;
