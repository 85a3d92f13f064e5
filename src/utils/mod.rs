//! Shared helpers: identifier generation and list searching.

pub mod ids;
pub mod search;
