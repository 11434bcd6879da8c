//! Client for the external image-editing inference provider.
//!
//! The provider accepts a public image URL plus a text instruction and
//! returns a transformed image. Predictions are awaited synchronously
//! (`Prefer: wait`); the polymorphic response shape is normalized by
//! [`output::normalize_output`].

mod client;
mod output;

pub use client::{EditImageRequest, InferenceClient, InferenceError};
pub use output::normalize_output;
