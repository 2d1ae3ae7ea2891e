//! Prelude module for persian_datetime crate.
//!
//! Re-exports the derive macros shared across modules.

pub use derive_more::Display;
