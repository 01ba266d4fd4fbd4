//! Growing Together Engine library.
//!
//! This crate contains all server-side code for the parenting simulation.
//!
//! ## Structure
//!
//! - `use_cases/` - Turn sequencing, content generation and narration
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
