//! Shared domain types, errors, and generation policy for pixshift.

pub mod error;
pub mod generation;
pub mod types;
