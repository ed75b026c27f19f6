//! Core domain model and shared types for TermHub.
//!
//! This crate holds the pieces every other TermHub crate agrees on: the
//! `Term` and `Holiday` records, the core error type, and the wire date
//! helpers (`YYYY-MM-DD`). It deliberately has no I/O dependencies.

pub mod dates;
pub mod error;
pub mod model;

pub use dates::{format_date, parse_date};
pub use error::CoreError;
pub use model::{Holiday, Term};
