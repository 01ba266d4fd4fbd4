//! API layer - HTTP entry points for the presentation client.

pub mod http;
mod views;

pub use http::{routes, ApiError};
