//! Shared types for the catalog editor
//!
//! Canonical product model and the record normalizer used by both the
//! remote client and the synchronization engine.

pub mod models;
pub mod normalize;

// Re-exports
pub use models::{Product, ProductDraft, ProductId, RawProduct, StockTier, PLACEHOLDER_IMAGE};
pub use normalize::{NormalizeError, normalize};
pub use serde::{Deserialize, Serialize};
