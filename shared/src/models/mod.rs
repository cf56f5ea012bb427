//! Data models
//!
//! `Product` is the canonical local shape read by every view.
//! `RawProduct` is whatever the upstream API sent, before normalization.

pub mod product;

// Re-exports
pub use product::*;
