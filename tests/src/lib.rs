//! # Journal Relay Test Suite
//!
//! End-to-end tests that spawn the gateway on an ephemeral port and drive
//! it over real HTTP with reqwest.

pub mod integration;
