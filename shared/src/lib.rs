//! Nutrilog Shared Library
//!
//! This crate contains the wire models, client-side validation, and the
//! pure client state machine shared by the terminal client and the WASM
//! bindings. Nothing in here performs I/O.

pub mod errors;
pub mod models;
pub mod state;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use models::*;
pub use state::{ClientState, DatePick, LoadingFlags, SubmissionPlan};
pub use types::*;
