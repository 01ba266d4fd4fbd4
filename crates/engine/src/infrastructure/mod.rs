//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod chat_completions;
pub mod clock;
pub mod config;
pub mod ports;
pub mod speech;
