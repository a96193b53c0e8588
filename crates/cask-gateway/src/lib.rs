//! Key-serialized blob operations for the Cask gateway.
//!
//! [`BlobGateway`] wraps any [`cask_store::BlobStore`] and serializes all
//! lock-requiring operations (fetch, store, replace) per key: two operations
//! on the same key never overlap their backend-call windows, while unrelated
//! keys proceed fully in parallel. Remove is deliberately lock-free by
//! default -- see [`gateway::GatewayOptions::serialized_remove`] for that
//! asymmetry and the switch that closes it.
//!
//! The crate also carries the pure classification helpers in [`media`]:
//! extension-derived type tags for writes, magic-number content sniffing for
//! read responses.

pub mod error;
pub mod gateway;
pub mod media;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{GatewayError, GatewayResult};
pub use gateway::{BlobGateway, FetchedBlob, GatewayOptions};
pub use media::{sniff_content_type, type_tag, FALLBACK_TYPE_TAG};
