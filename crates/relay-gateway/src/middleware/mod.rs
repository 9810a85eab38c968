//! Middleware stack for the relay gateway.

pub mod cors;

pub use cors::create_cors_layer;
