//! Catalog Client - HTTP client for the remote product catalog
//!
//! One network round trip per operation, no automatic retries. Transport and
//! server outcomes are reported as a typed [`ClientError`].

pub mod api;
pub mod config;
pub mod connectivity;
pub mod error;
pub mod http;
mod types;

pub use api::CatalogApi;
pub use config::ClientConfig;
pub use connectivity::{AlwaysOnline, Connectivity, ConnectivityFlag};
pub use error::{ClientError, ClientResult, FailureKind};
pub use http::HttpCatalogClient;

// Re-export shared types for convenience
pub use shared::{Product, ProductDraft, ProductId};
