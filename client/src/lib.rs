//! Nutrilog Client Library
//!
//! The client state orchestrator and the effects it drives: the HTTP API
//! client, the local identity store, the transient banner and the overwrite
//! confirmation seam. Exposed as a library for the binary and the tests.

pub mod api;
pub mod banner;
pub mod cli;
pub mod config;
pub mod confirm;
pub mod error;
pub mod orchestrator;
pub mod storage;

pub use orchestrator::Orchestrator;
